//! Velocity-only collision response for the brick breaker.
//!
//! Nothing in here moves the ball. Each check looks at the ball where the last movement step left
//! it and flips or replaces velocity components; the next tick's movement shows the result.

use egui::Vec2;

use crate::{
    ball::Ball,
    brick::{Brick, Hit},
    paddle::Paddle,
};

/// Largest horizontal speed a paddle bounce can produce.
pub const MAX_DEFLECTION: f32 = 5.0;

/// Bounce off the left, right and top edges of the field.
///
/// Only velocity pointing into a wall is reversed, so a ball that is still overlapping the wall
/// after bouncing does not get turned back into it on the following tick.
pub fn resolve_walls(ball: &mut Ball, field: Vec2) -> bool {
    let rect = ball.rect();
    let mut bounced = false;

    let into_left = rect.min.x <= 0.0 && ball.velocity.x < 0.0;
    let into_right = rect.max.x >= field.x && ball.velocity.x > 0.0;
    if into_left || into_right {
        ball.velocity.x = -ball.velocity.x;
        bounced = true;
    }

    if rect.min.y <= 0.0 && ball.velocity.y < 0.0 {
        ball.velocity.y = -ball.velocity.y;
        bounced = true;
    }

    bounced
}

/// Where along the paddle the ball's center lies, clamped to `[0, 1]`.
pub fn hit_fraction(ball: &Ball, paddle: &Paddle) -> f32 {
    ((ball.center.x - paddle.x) / paddle.width).clamp(0.0, 1.0)
}

/// Bounce off the paddle when the ball is falling onto it.
///
/// The outgoing horizontal speed depends only on the hit position: the left edge sends the ball
/// left at full deflection, the center sends it straight up.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.velocity.y <= 0.0 || !ball.rect().intersects(paddle.rect()) {
        return false;
    }

    ball.velocity.y = -ball.velocity.y;
    ball.velocity.x = (hit_fraction(ball, paddle) - 0.5) * 2.0 * MAX_DEFLECTION;
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickCollision {
    pub index: usize,
    pub hit: Hit,
}

/// Strike the first live brick touching the ball, in layout order.
///
/// At most one brick is hit per call. The bounce axis is whichever of the center-to-center
/// offsets is larger; ties bounce vertically.
pub fn resolve_bricks(ball: &mut Ball, bricks: &mut [Brick]) -> Option<BrickCollision> {
    let ball_rect = ball.rect();

    let (index, brick) = bricks
        .iter_mut()
        .enumerate()
        .find(|(_, brick)| !brick.destroyed && ball_rect.intersects(brick.rect))?;

    let hit = brick.hit()?;

    let offset = ball.center - brick.rect.center();
    if offset.x.abs() > offset.y.abs() {
        ball.velocity.x = -ball.velocity.x;
    } else {
        ball.velocity.y = -ball.velocity.y;
    }

    Some(BrickCollision { index, hit })
}

/// True once the ball's top edge is below the bottom of the field.
pub fn exited_bottom(ball: &Ball, field: Vec2) -> bool {
    ball.rect().min.y > field.y
}
