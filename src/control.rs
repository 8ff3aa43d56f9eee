use egui::{emath::TSTransform, Key, Pos2, Rect};

/// Paddle input sampled once per frame and applied on every tick of that frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PaddleInput {
    pub left: bool,
    pub right: bool,
    /// Pointer x in field units, only set when the pointer moved this frame.
    pub pointer_x: Option<f32>,
}

/// Everything the games read from egui in one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameInput {
    pub paddle: PaddleInput,
    pub launch: bool,
    /// Primary clicks this frame, in field units.
    pub clicks: Vec<Pos2>,
    /// Latest pointer position over the canvas, in field units.
    pub pointer: Option<Pos2>,
    pub escape: bool,
}

impl FrameInput {
    /// Gather input, mapping pointer positions from screen space back into the field.
    ///
    /// Pointer activity outside `canvas` is ignored so clicks on surrounding widgets don't reach
    /// the game.
    pub fn capture(ctx: &egui::Context, canvas: Rect, to_field: TSTransform) -> Self {
        ctx.input(|i| {
            let on_canvas = |pos: &Pos2| canvas.contains(*pos);

            let pointer = i
                .pointer
                .hover_pos()
                .filter(on_canvas)
                .map(|pos| to_field.mul_pos(pos));
            let moved = i.pointer.delta() != egui::Vec2::ZERO;

            let clicks: Vec<Pos2> = if i.pointer.primary_clicked() {
                i.pointer
                    .interact_pos()
                    .filter(on_canvas)
                    .map(|pos| to_field.mul_pos(pos))
                    .into_iter()
                    .collect()
            } else {
                Vec::new()
            };

            Self {
                paddle: PaddleInput {
                    left: i.key_down(Key::ArrowLeft),
                    right: i.key_down(Key::ArrowRight),
                    pointer_x: pointer.filter(|_| moved).map(|pos| pos.x),
                },
                launch: i.key_pressed(Key::Space) || !clicks.is_empty(),
                clicks,
                pointer,
                escape: i.key_pressed(Key::Escape),
            }
        })
    }
}
