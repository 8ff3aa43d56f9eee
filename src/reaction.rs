//! Reaction game: pop a shrinking target before its timer runs out.

use egui::{emath::TSTransform, Color32, Pos2, Vec2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ringbuffer::{AllocRingBuffer, RingBuffer};

use crate::drawable::Drawable;

pub const INITIAL_RADIUS: f32 = 75.0;
pub const MIN_RADIUS: f32 = 20.0;
pub const RADIUS_STEP: f32 = 3.0;

/// Seconds a target stays up before the game ends.
pub const TIME_LIMIT: f32 = 2.0;

/// Opacity change per second while a target fades in or out.
pub const FADE_RATE: f32 = 5.0;

/// Clear space kept around a target, beyond its radius.
const SPAWN_MARGIN: f32 = 20.0;
/// Extra room at the top for the score read-out.
const HEADER: f32 = 60.0;

pub const TRAIL_LENGTH: usize = 10;
/// The trail keeps this fraction of its opacity every `TRAIL_FADE_PERIOD` seconds.
const TRAIL_DECAY: f32 = 0.85;
const TRAIL_FADE_PERIOD: f32 = 0.05;
const TRAIL_CUTOFF: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Playing,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    In,
    Steady,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub center: Pos2,
    pub radius: f32,
    pub opacity: f32,
    pub fade: Fade,
    /// Seconds left before this target ends the game.
    pub remaining: f32,
}

impl Target {
    pub fn contains(&self, point: Pos2) -> bool {
        (point - self.center).length() <= self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub pos: Pos2,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct Session {
    pub field: Vec2,
    pub score: u32,
    phase: Phase,
    target: Option<Target>,
    trail: AllocRingBuffer<TrailPoint>,
    rng: StdRng,
}

impl Session {
    pub fn new(field: Vec2, seed: u64) -> Self {
        Self {
            field,
            score: 0,
            phase: Phase::Ready,
            target: None,
            trail: AllocRingBuffer::new(TRAIL_LENGTH),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn trail(&self) -> impl Iterator<Item = &TrailPoint> {
        self.trail.iter()
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Ready {
            self.phase = Phase::Playing;
            self.score = 0;
            self.spawn_target();
        }
    }

    pub fn current_radius(&self) -> f32 {
        (INITIAL_RADIUS - self.score as f32 * RADIUS_STEP).max(MIN_RADIUS)
    }

    fn spawn_target(&mut self) {
        let radius = self.current_radius();
        let margin = radius + SPAWN_MARGIN;

        let x = self.random_between(margin, self.field.x - margin);
        let y = self.random_between(margin + HEADER, self.field.y - margin);

        self.target = Some(Target {
            center: Pos2::new(x, y),
            radius,
            opacity: 0.0,
            fade: Fade::In,
            remaining: TIME_LIMIT,
        });
    }

    fn random_between(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            low
        } else {
            self.rng.random_range(low..=high)
        }
    }

    /// Primary click at a field position. Returns true if it popped the target.
    pub fn click(&mut self, pos: Pos2) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        let Some(target) = self.target.as_mut() else {
            return false;
        };

        if target.fade == Fade::Out || !target.contains(pos) {
            return false;
        }

        target.fade = Fade::Out;
        self.score += 1;
        log::trace!("Target popped, score {}", self.score);
        true
    }

    pub fn pointer_moved(&mut self, pos: Pos2) {
        if self.phase == Phase::Playing {
            self.trail.push(TrailPoint { pos, opacity: 1.0 });
        }
    }

    /// Advance timers by `dt` seconds. Returns the final score on the update that ends the game.
    pub fn update(&mut self, dt: f32) -> Option<u32> {
        if self.phase != Phase::Playing {
            return None;
        }

        self.fade_trail(dt);

        let target = self.target.as_mut()?;

        match target.fade {
            Fade::In => {
                target.opacity = (target.opacity + FADE_RATE * dt).min(1.0);
                if target.opacity >= 1.0 {
                    target.fade = Fade::Steady;
                }
            }
            Fade::Steady => {}
            Fade::Out => {
                target.opacity = (target.opacity - FADE_RATE * dt).max(0.0);
                if target.opacity <= 0.0 {
                    self.spawn_target();
                }
                return None;
            }
        }

        target.remaining -= dt;
        if target.remaining <= 0.0 {
            self.phase = Phase::Over;
            self.target = None;
            self.trail.clear();
            log::info!("Reaction session over with score {}", self.score);
            return Some(self.score);
        }

        None
    }

    fn fade_trail(&mut self, dt: f32) {
        let factor = TRAIL_DECAY.powf(dt / TRAIL_FADE_PERIOD);
        for point in self.trail.iter_mut() {
            point.opacity *= factor;
        }

        // Oldest points are always the faintest
        while self
            .trail
            .front()
            .is_some_and(|point| point.opacity <= TRAIL_CUTOFF)
        {
            self.trail.dequeue();
        }
    }
}

impl Drawable for Session {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        let accent = ctx.style().visuals.selection.bg_fill;
        for point in self.trail() {
            let pos = transform.mul_pos(point.pos);
            painter.circle_filled(pos, 4.0, accent.gamma_multiply(point.opacity));
        }

        if let Some(target) = &self.target {
            let center = transform.mul_pos(target.center);
            let radius = target.radius * transform.scaling;

            let urgent = target.remaining < 0.5 && target.fade != Fade::Out;
            let fill = if urgent {
                ctx.style().visuals.error_fg_color
            } else {
                Color32::from_rgb(100, 200, 255)
            };
            painter.circle_filled(center, radius, fill.gamma_multiply(target.opacity));
        }
    }
}
