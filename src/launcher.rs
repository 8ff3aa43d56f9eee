//! The launcher's owned state: best results and the one game that may be running.

use egui::Vec2;

use crate::{
    breakout,
    control::FrameInput,
    memory, reaction,
    scores::{GameKind, HighScores, SessionEnd},
    ticker::Ticker,
};

/// Seconds the finished game stays on screen before the menu comes back.
pub const RETURN_DELAY: f32 = 2.0;

#[derive(Debug)]
pub enum ActiveGame {
    Reaction(reaction::Session),
    Breakout(breakout::Session),
    Memory(memory::Session),
}

impl ActiveGame {
    pub fn new(kind: GameKind, field: Vec2, seed: u64) -> Self {
        match kind {
            GameKind::Reaction => ActiveGame::Reaction(reaction::Session::new(field, seed)),
            GameKind::Breakout => ActiveGame::Breakout(breakout::Session::new(field)),
            GameKind::Memory => ActiveGame::Memory(memory::Session::new(seed)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Reaction(_) => GameKind::Reaction,
            ActiveGame::Breakout(_) => GameKind::Breakout,
            ActiveGame::Memory(_) => GameKind::Memory,
        }
    }

    /// Run one fixed tick. Returns the session result on the tick that finishes it.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) -> Option<u32> {
        match self {
            ActiveGame::Reaction(session) => session.update(dt),
            ActiveGame::Breakout(session) => {
                let mut result = None;
                for event in session.tick(input.paddle) {
                    log::debug!("Brick event: {event:?}");
                    if let breakout::Event::Ended(_) = event {
                        result = Some(session.score);
                    }
                }
                result
            }
            ActiveGame::Memory(session) => session.update(dt),
        }
    }

    /// Handle the edge-triggered part of a frame's input, once per frame.
    pub fn handle_input(&mut self, input: &FrameInput) {
        match self {
            ActiveGame::Reaction(session) => {
                if let Some(pointer) = input.pointer.filter(|_| input.paddle.pointer_x.is_some()) {
                    session.pointer_moved(pointer);
                }
                for &click in &input.clicks {
                    session.click(click);
                }
            }
            ActiveGame::Breakout(session) => {
                if input.launch {
                    session.launch();
                }
            }
            // Cards are egui buttons and flip themselves
            ActiveGame::Memory(_) => {}
        }
    }
}

/// A running game together with the clock that drives it.
#[derive(Debug)]
pub struct ActiveSession {
    pub game: ActiveGame,
    pub ticker: Ticker,
    /// Counts down once the game has reported its result.
    return_in: Option<f32>,
}

impl ActiveSession {
    pub fn is_finished(&self) -> bool {
        self.return_in.is_some()
    }
}

#[derive(Debug, Default)]
pub struct Launcher {
    pub scores: HighScores,
    active: Option<ActiveSession>,
}

impl Launcher {
    pub fn new(scores: HighScores) -> Self {
        Self {
            scores,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveSession> {
        self.active.as_mut()
    }

    /// Start a new game, replacing any game that is still running.
    pub fn launch(&mut self, kind: GameKind, field: Vec2, seed: u64) -> &mut ActiveSession {
        if let Some(previous) = &self.active {
            log::debug!("Dropping {:?} to launch {kind:?}", previous.game.kind());
        }
        log::info!("Launching {} on a {:.0}x{:.0} field", kind.name(), field.x, field.y);

        self.active.insert(ActiveSession {
            game: ActiveGame::new(kind, field, seed),
            ticker: Ticker::default(),
            return_in: None,
        })
    }

    /// Close the running game. Its ticker goes with it, so no further ticks reach it.
    pub fn close(&mut self) {
        if let Some(session) = self.active.take() {
            log::info!("Closed {}", session.game.kind().name());
        }
    }

    /// Apply a session's final result. Returns true if it set a new record.
    pub fn finish(&mut self, end: SessionEnd) -> bool {
        let record = self.scores.record(end);
        if record {
            log::info!("New {} record: {}", end.game.name(), end.value);
        }

        if let Some(session) = self.active.as_mut() {
            session.return_in.get_or_insert(RETURN_DELAY);
        }

        record
    }

    /// Count down the return-to-menu delay. Returns true when the game was dismissed.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(return_in) = self.active.as_mut().and_then(|s| s.return_in.as_mut()) else {
            return false;
        };

        *return_in -= dt;
        if *return_in > 0.0 {
            return false;
        }

        self.close();
        true
    }
}
