use egui::{emath::TSTransform, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::{drawable::Drawable, paddle::Paddle};

pub const RADIUS: f32 = 10.0;

/// Gap between the attached ball and the top of the paddle.
pub const ATTACH_MARGIN: f32 = 5.0;

/// Velocity, in field units per tick, given to the ball whenever it is (re)attached.
pub const LAUNCH_VELOCITY: Vec2 = Vec2::new(5.0, -5.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum State {
    /// Riding on the paddle, waiting for a launch.
    Attached,
    Free,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Ball {
    pub center: Pos2,
    pub radius: f32,
    pub velocity: Vec2,
    pub speed_multiplier: f32,
    pub state: State,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            center: Pos2::ZERO,
            radius: RADIUS,
            velocity: LAUNCH_VELOCITY,
            speed_multiplier: 1.0,
            state: State::Attached,
        }
    }
}

impl Ball {
    pub fn attached_to(paddle: &Paddle) -> Self {
        let mut ball = Self::default();
        ball.follow(paddle);
        ball
    }

    pub fn is_attached(&self) -> bool {
        self.state == State::Attached
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(2.0 * self.radius))
    }

    /// Place the ball on top of the paddle, centered.
    pub fn follow(&mut self, paddle: &Paddle) {
        self.center = Pos2::new(
            paddle.center_x(),
            paddle.y - self.radius - ATTACH_MARGIN,
        );
    }

    /// Release the ball from the paddle. Returns false if it was already free.
    pub fn launch(&mut self) -> bool {
        if self.is_attached() {
            self.state = State::Free;
            true
        } else {
            false
        }
    }

    /// Put the ball back on the paddle with the default launch velocity.
    pub fn reset(&mut self, paddle: &Paddle) {
        self.state = State::Attached;
        self.velocity = LAUNCH_VELOCITY;
        self.follow(paddle);
    }

    pub fn update(&mut self) {
        self.center += self.velocity * self.speed_multiplier;
    }
}

impl Drawable for Ball {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        let center = transform.mul_pos(self.center);
        let radius = self.radius * transform.scaling;

        let fill = ctx.style().visuals.strong_text_color();
        painter.add(egui::Shape::circle_filled(center, radius, fill));
    }
}
