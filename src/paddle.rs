use egui::{emath::TSTransform, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::drawable::Drawable;

pub const WIDTH: f32 = 120.0;
pub const HEIGHT: f32 = 20.0;
pub const SPEED: f32 = 15.0;

/// Distance between the bottom of the field and the top of the paddle.
pub const BOTTOM_OFFSET: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    /// Paddle centered horizontally near the bottom of a field of the given size.
    pub fn centered(field: Vec2) -> Self {
        Self {
            x: field.x / 2.0 - WIDTH / 2.0,
            y: field.y - BOTTOM_OFFSET,
            width: WIDTH,
            height: HEIGHT,
            speed: SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn move_left(&mut self, field_width: f32) {
        self.set_x(self.x - self.speed, field_width);
    }

    pub fn move_right(&mut self, field_width: f32) {
        self.set_x(self.x + self.speed, field_width);
    }

    /// Center the paddle under a pointer x coordinate.
    pub fn follow_pointer(&mut self, pointer_x: f32, field_width: f32) {
        self.set_x(pointer_x - self.width / 2.0, field_width);
    }

    fn set_x(&mut self, x: f32, field_width: f32) {
        let max_x = (field_width - self.width).max(0.0);
        self.x = x.clamp(0.0, max_x);
    }
}

impl Drawable for Paddle {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        let rect = transform.mul_rect(self.rect());
        let rounding = 0.5 * rect.height();

        let fill = ctx.style().visuals.selection.bg_fill;
        painter.rect_filled(rect, rounding, fill);
    }
}
