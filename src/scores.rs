use serde::{Deserialize, Serialize};

/// Storage key for the persisted best results.
pub const STORAGE_KEY: &str = "high_scores";

/// Stand-in best move count before any memory game has been finished.
pub const NO_MEMORY_RECORD: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GameKind {
    Reaction,
    Breakout,
    Memory,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Reaction, GameKind::Breakout, GameKind::Memory];

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Reaction => "Click Game",
            GameKind::Breakout => "Brick Game",
            GameKind::Memory => "Memory Game",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GameKind::Reaction => "🎯",
            GameKind::Breakout => "🧱",
            GameKind::Memory => "🧠",
        }
    }

    /// Memory results are move counts, so smaller is better.
    pub fn lower_is_better(self) -> bool {
        self == GameKind::Memory
    }
}

/// The single integer a finished session reports to the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    pub game: GameKind,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HighScores {
    pub click: u32,
    pub brick: u32,
    pub memory_moves: u32,
}

impl Default for HighScores {
    fn default() -> Self {
        Self {
            click: 0,
            brick: 0,
            memory_moves: NO_MEMORY_RECORD,
        }
    }
}

impl HighScores {
    /// Read the stored record. Anything missing or unreadable falls back to the defaults.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(storage) = storage else {
            return Self::default();
        };

        match storage.get_string(STORAGE_KEY) {
            None => {
                log::info!("No stored high scores, starting fresh");
                Self::default()
            }
            Some(raw) => eframe::get_value(storage, STORAGE_KEY).unwrap_or_else(|| {
                log::warn!("Ignoring unreadable high scores: {raw:?}");
                Self::default()
            }),
        }
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, self);
    }

    pub fn best(&self, game: GameKind) -> u32 {
        match game {
            GameKind::Reaction => self.click,
            GameKind::Breakout => self.brick,
            GameKind::Memory => self.memory_moves,
        }
    }

    /// Keep the result if it beats the current best. Returns true on a new record.
    pub fn record(&mut self, end: SessionEnd) -> bool {
        let best = self.best(end.game);
        let improved = if end.game.lower_is_better() {
            end.value < best
        } else {
            end.value > best
        };

        if !improved {
            return false;
        }

        match end.game {
            GameKind::Reaction => self.click = end.value,
            GameKind::Breakout => self.brick = end.value,
            GameKind::Memory => self.memory_moves = end.value,
        }
        true
    }
}
