use egui::{emath::TSTransform, Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::drawable::Drawable;

pub const WIDTH: f32 = 80.0;
pub const HEIGHT: f32 = 30.0;
pub const SPACING: f32 = 5.0;
pub const ROWS: usize = 6;
pub const ORIGIN: Pos2 = Pos2::new(50.0, 100.0);

/// Horizontal room kept free around the grid when computing the column count.
const SIDE_MARGIN: f32 = 100.0;

/// Rows below this one need two hits.
const TOUGH_FROM_ROW: usize = 4;

pub const POINTS_DAMAGED: u32 = 5;
pub const POINTS_DESTROYED: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl BrickColor {
    pub const ALL: [BrickColor; 6] = [
        BrickColor::Red,
        BrickColor::Orange,
        BrickColor::Yellow,
        BrickColor::Green,
        BrickColor::Blue,
        BrickColor::Purple,
    ];

    pub fn for_row(row: usize) -> Self {
        Self::ALL[row % Self::ALL.len()]
    }

    pub fn color32(self) -> Color32 {
        match self {
            BrickColor::Red => Color32::from_rgb(255, 100, 100),
            BrickColor::Orange => Color32::from_rgb(255, 180, 100),
            BrickColor::Yellow => Color32::from_rgb(255, 255, 100),
            BrickColor::Green => Color32::from_rgb(100, 255, 100),
            BrickColor::Blue => Color32::from_rgb(100, 180, 255),
            BrickColor::Purple => Color32::from_rgb(180, 100, 255),
        }
    }
}

/// Result of striking a brick once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Damaged,
    Destroyed,
}

impl Hit {
    pub fn points(self) -> u32 {
        match self {
            Hit::Damaged => POINTS_DAMAGED,
            Hit::Destroyed => POINTS_DESTROYED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: BrickColor,
    pub hits_remaining: u32,
    pub max_hits: u32,
    pub destroyed: bool,
}

impl Brick {
    pub fn new(min: Pos2, color: BrickColor, hits: u32) -> Self {
        Self {
            rect: Rect::from_min_size(min, Vec2::new(WIDTH, HEIGHT)),
            color,
            hits_remaining: hits,
            max_hits: hits,
            destroyed: false,
        }
    }

    /// Take one hit. Returns `None` if the brick is already gone.
    pub fn hit(&mut self) -> Option<Hit> {
        if self.destroyed {
            return None;
        }

        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        if self.hits_remaining == 0 {
            self.destroyed = true;
            Some(Hit::Destroyed)
        } else {
            Some(Hit::Damaged)
        }
    }

    pub fn is_damaged(&self) -> bool {
        self.hits_remaining < self.max_hits
    }
}

pub fn columns_for_width(field_width: f32) -> usize {
    ((field_width - SIDE_MARGIN) / (WIDTH + SPACING)).floor().max(0.0) as usize
}

/// The brick grid for a field of the given width, in row-major order.
pub fn layout(field_width: f32) -> Vec<Brick> {
    let columns = columns_for_width(field_width);

    (0..ROWS)
        .flat_map(|row| {
            (0..columns).map(move |column| {
                let min = ORIGIN
                    + Vec2::new(
                        column as f32 * (WIDTH + SPACING),
                        row as f32 * (HEIGHT + SPACING),
                    );
                let hits = if row < TOUGH_FROM_ROW { 1 } else { 2 };
                Brick::new(min, BrickColor::for_row(row), hits)
            })
        })
        .collect()
}

impl Drawable for Brick {
    fn draw(&self, _ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        if self.destroyed {
            return;
        }

        let mut fill = self.color.color32();
        if self.is_damaged() {
            fill = fill.gamma_multiply(0.6);
        }

        let rect = transform.mul_rect(self.rect);
        painter.rect_filled(rect, 8.0 * transform.scaling, fill);
    }
}
