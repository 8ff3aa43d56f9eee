use egui::{emath::TSTransform, Rect, Vec2};

pub trait Drawable {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform);
}

/// Fit a field of the given size into the canvas, keeping its aspect ratio and centering it.
pub fn field_transform(field: Vec2, canvas: Rect) -> TSTransform {
    let scale = (canvas.width() / field.x).min(canvas.height() / field.y);
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };

    TSTransform {
        scaling: scale,
        translation: canvas.center().to_vec2() - 0.5 * field * scale,
    }
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use super::*;

    #[test]
    fn test_field_transform_letterboxes() {
        let field = Vec2::new(800.0, 600.0);
        let canvas = Rect::from_min_size(Pos2::new(0.0, 20.0), Vec2::new(1600.0, 800.0));

        let transform = field_transform(field, canvas);
        assert_eq!(transform.scaling, 800.0 / 600.0);

        let center = transform.mul_pos(Pos2::new(400.0, 300.0));
        assert!((center - canvas.center()).length() < 1e-3);

        let back = transform.inverse().mul_pos(center);
        assert!((back - Pos2::new(400.0, 300.0)).length() < 1e-3);
    }
}
