//! Memory match: find all eight pairs in a shuffled 4×4 grid in as few moves as possible.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

pub const ICONS: [&str; 8] = ["🎮", "🎯", "🎨", "🎭", "🎪", "🎸", "🎹", "🎺"];
pub const PAIRS: usize = ICONS.len();
pub const COLUMNS: usize = 4;

/// Delay between turning the second card and comparing the pair.
pub const CHECK_DELAY: f32 = 0.6;
/// How long a mismatched pair stays visible after the comparison.
pub const FLIP_BACK_DELAY: f32 = 0.8;
/// Delay between the last match and reporting the result.
pub const FINISH_DELAY: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Down,
    Up,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub pair: usize,
    pub icon: &'static str,
    pub face: Face,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    None,
    Check { remaining: f32 },
    FlipBack { remaining: f32 },
    Finish { remaining: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// All pairs found, waiting out the finish delay.
    Complete,
    Over,
}

#[derive(Debug)]
pub struct Session {
    pub cards: Vec<Card>,
    pub moves: u32,
    pub matched_pairs: usize,
    /// Seconds since the first card was turned.
    pub elapsed: f32,
    started: bool,
    phase: Phase,
    first: Option<usize>,
    second: Option<usize>,
    pending: Pending,
    rng: StdRng,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let cards = deal(&mut rng);

        Self {
            cards,
            moves: 0,
            matched_pairs: 0,
            elapsed: 0.0,
            started: false,
            phase: Phase::Playing,
            first: None,
            second: None,
            pending: Pending::None,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Whether a card could be turned right now.
    pub fn accepts_flips(&self) -> bool {
        self.phase == Phase::Playing && self.second.is_none()
    }

    /// Reshuffle and start over.
    pub fn restart(&mut self) {
        self.cards = deal(&mut self.rng);
        self.moves = 0;
        self.matched_pairs = 0;
        self.elapsed = 0.0;
        self.started = false;
        self.phase = Phase::Playing;
        self.first = None;
        self.second = None;
        self.pending = Pending::None;
    }

    /// Turn the card at `index` face up. Returns false if the flip was refused.
    pub fn flip(&mut self, index: usize) -> bool {
        if !self.accepts_flips() {
            return false;
        }

        match self.cards.get_mut(index) {
            Some(card) if card.face == Face::Down => card.face = Face::Up,
            _ => return false,
        }

        self.started = true;

        if self.first.is_none() {
            self.first = Some(index);
        } else {
            self.second = Some(index);
            self.moves += 1;
            self.pending = Pending::Check {
                remaining: CHECK_DELAY,
            };
        }

        true
    }

    /// Advance the timers by `dt` seconds. Returns the move count on the update that ends the game.
    pub fn update(&mut self, dt: f32) -> Option<u32> {
        if self.phase == Phase::Over {
            return None;
        }

        if self.started && self.phase == Phase::Playing {
            self.elapsed += dt;
        }

        match &mut self.pending {
            Pending::None => None,
            Pending::Check { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.check_pair();
                }
                None
            }
            Pending::FlipBack { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.flip_back();
                }
                None
            }
            Pending::Finish { remaining } => {
                *remaining -= dt;
                if *remaining > 0.0 {
                    return None;
                }
                self.pending = Pending::None;
                self.phase = Phase::Over;
                log::info!("Memory session over in {} moves", self.moves);
                Some(self.moves)
            }
        }
    }

    fn check_pair(&mut self) {
        let (Some(first), Some(second)) = (self.first, self.second) else {
            self.pending = Pending::None;
            return;
        };

        if self.cards[first].pair == self.cards[second].pair {
            self.cards[first].face = Face::Matched;
            self.cards[second].face = Face::Matched;
            self.matched_pairs += 1;
            self.first = None;
            self.second = None;

            if self.matched_pairs == PAIRS {
                self.phase = Phase::Complete;
                self.pending = Pending::Finish {
                    remaining: FINISH_DELAY,
                };
            } else {
                self.pending = Pending::None;
            }
        } else {
            self.pending = Pending::FlipBack {
                remaining: FLIP_BACK_DELAY,
            };
        }
    }

    fn flip_back(&mut self) {
        for index in [self.first.take(), self.second.take()].into_iter().flatten() {
            if let Some(card) = self.cards.get_mut(index) {
                if card.face == Face::Up {
                    card.face = Face::Down;
                }
            }
        }
        self.pending = Pending::None;
    }
}

fn deal(rng: &mut StdRng) -> Vec<Card> {
    let mut cards: Vec<Card> = ICONS
        .into_iter()
        .enumerate()
        .flat_map(|(pair, icon)| {
            let card = Card {
                pair,
                icon,
                face: Face::Down,
            };
            [card, card]
        })
        .collect();

    cards.shuffle(rng);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;

    fn run(session: &mut Session, seconds: f32) -> Option<u32> {
        let mut result = None;
        let mut t = 0.0;
        while t < seconds {
            if let Some(moves) = session.update(DT) {
                assert!(result.is_none(), "session ended twice");
                result = Some(moves);
            }
            t += DT;
        }
        result
    }

    fn partner_of(session: &Session, index: usize) -> usize {
        let pair = session.cards[index].pair;
        (0..session.cards.len())
            .find(|&i| i != index && session.cards[i].pair == pair)
            .unwrap()
    }

    fn non_partner_of(session: &Session, index: usize) -> usize {
        let pair = session.cards[index].pair;
        (0..session.cards.len())
            .find(|&i| session.cards[i].pair != pair)
            .unwrap()
    }

    #[test]
    fn test_deal_has_eight_pairs() {
        let session = Session::new(3);
        assert_eq!(session.cards.len(), 16);

        for pair in 0..PAIRS {
            let count = session.cards.iter().filter(|c| c.pair == pair).count();
            assert_eq!(count, 2);
        }
        assert!(session.cards.iter().all(|c| c.face == Face::Down));
    }

    #[test]
    fn test_match_locks_then_unlocks() {
        let mut session = Session::new(3);
        let partner = partner_of(&session, 0);

        assert!(session.flip(0));
        assert!(!session.flip(0));
        assert!(session.flip(partner));
        assert_eq!(session.moves, 1);

        // Locked until the pair is compared
        assert!(!session.accepts_flips());
        run(&mut session, CHECK_DELAY + 0.05);

        assert!(session.accepts_flips());
        assert_eq!(session.matched_pairs, 1);
        assert_eq!(session.cards[0].face, Face::Matched);
        assert_eq!(session.cards[partner].face, Face::Matched);
        assert!(!session.flip(0));
    }

    #[test]
    fn test_mismatch_flips_back() {
        let mut session = Session::new(3);
        let other = non_partner_of(&session, 0);

        session.flip(0);
        session.flip(other);
        run(&mut session, CHECK_DELAY + 0.05);

        assert_eq!(session.cards[0].face, Face::Up);
        assert!(!session.accepts_flips());

        run(&mut session, FLIP_BACK_DELAY + 0.05);

        assert_eq!(session.cards[0].face, Face::Down);
        assert_eq!(session.cards[other].face, Face::Down);
        assert_eq!(session.matched_pairs, 0);
        assert_eq!(session.moves, 1);
        assert!(session.accepts_flips());
    }

    #[test]
    fn test_timer_starts_on_first_flip() {
        let mut session = Session::new(3);
        run(&mut session, 1.0);
        assert_eq!(session.elapsed, 0.0);

        session.flip(0);
        run(&mut session, 1.0);
        assert!(session.elapsed > 0.9);
    }

    #[test]
    fn test_complete_game_reports_moves_once() {
        let mut session = Session::new(11);

        // One wrong guess first
        let other = non_partner_of(&session, 0);
        session.flip(0);
        session.flip(other);
        assert_eq!(run(&mut session, CHECK_DELAY + FLIP_BACK_DELAY + 0.1), None);

        while session.matched_pairs < PAIRS {
            let index = session
                .cards
                .iter()
                .position(|c| c.face == Face::Down)
                .unwrap();
            let partner = partner_of(&session, index);
            assert!(session.flip(index));
            assert!(session.flip(partner));
            assert_eq!(run(&mut session, CHECK_DELAY + 0.05), None);
        }

        assert_eq!(session.moves, 9);
        assert_eq!(session.phase(), Phase::Complete);
        assert!(!session.flip(0));

        assert_eq!(run(&mut session, FINISH_DELAY + 0.1), Some(9));
        assert!(session.is_over());
        assert_eq!(run(&mut session, 1.0), None);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = Session::new(5);
        session.flip(0);
        session.flip(partner_of(&session, 0));
        run(&mut session, CHECK_DELAY + 0.05);

        session.restart();

        assert_eq!(session.moves, 0);
        assert_eq!(session.matched_pairs, 0);
        assert_eq!(session.elapsed, 0.0);
        assert!(session.cards.iter().all(|c| c.face == Face::Down));
        assert!(session.accepts_flips());
    }
}
