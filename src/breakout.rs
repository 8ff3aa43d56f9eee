//! Brick breaker session: one paddle, one ball, a fixed brick grid and three lives.

use egui::{emath::TSTransform, Vec2};

use crate::{
    ball::Ball,
    brick::{self, Brick},
    collision,
    control::PaddleInput,
    drawable::Drawable,
    paddle::Paddle,
};

pub const STARTING_LIVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but not started; ticks do nothing.
    Ready,
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    BrickHit {
        index: usize,
        destroyed: bool,
        points: u32,
    },
    LifeLost {
        remaining: u32,
    },
    Ended(Outcome),
}

#[derive(Debug, Clone)]
pub struct Session {
    pub field: Vec2,
    pub score: u32,
    pub lives: u32,
    pub bricks: Vec<Brick>,
    pub ball: Ball,
    pub paddle: Paddle,
    phase: Phase,
}

impl Session {
    pub fn new(field: Vec2) -> Self {
        Self::with_bricks(field, brick::layout(field.x))
    }

    pub fn with_bricks(field: Vec2, bricks: Vec<Brick>) -> Self {
        let paddle = Paddle::centered(field);

        Self {
            field,
            score: 0,
            lives: STARTING_LIVES,
            bricks,
            ball: Ball::attached_to(&paddle),
            paddle,
            phase: Phase::Ready,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost)
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Ready {
            log::debug!("Brick session started with {} bricks", self.bricks.len());
            self.phase = Phase::Playing;
        }
    }

    /// Release the ball if it is riding the paddle.
    pub fn launch(&mut self) -> bool {
        self.is_active() && self.ball.launch()
    }

    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|brick| !brick.destroyed).count()
    }

    /// Advance one fixed tick and report what happened during it.
    pub fn tick(&mut self, input: PaddleInput) -> Vec<Event> {
        let mut events = Vec::new();

        if !self.is_active() {
            return events;
        }

        self.move_paddle(input);

        if self.ball.is_attached() {
            self.ball.follow(&self.paddle);
            return events;
        }

        self.ball.update();

        collision::resolve_walls(&mut self.ball, self.field);
        collision::resolve_paddle(&mut self.ball, &self.paddle);

        if let Some(hit) = collision::resolve_bricks(&mut self.ball, &mut self.bricks) {
            let points = hit.hit.points();
            self.score += points;
            events.push(Event::BrickHit {
                index: hit.index,
                destroyed: hit.hit == brick::Hit::Destroyed,
                points,
            });
        }

        // A cleared field wins even if the same tick drops the last life
        let cleared = self.bricks.iter().all(|brick| brick.destroyed);

        if collision::exited_bottom(&self.ball, self.field) {
            self.lives = self.lives.saturating_sub(1);
            events.push(Event::LifeLost {
                remaining: self.lives,
            });

            if self.lives == 0 && !cleared {
                events.push(self.end(Outcome::Lost));
                return events;
            }

            self.ball.reset(&self.paddle);
        }

        if cleared {
            events.push(self.end(Outcome::Won));
        }

        events
    }

    fn move_paddle(&mut self, input: PaddleInput) {
        if input.left {
            self.paddle.move_left(self.field.x);
        }
        if input.right {
            self.paddle.move_right(self.field.x);
        }
        if let Some(pointer_x) = input.pointer_x {
            self.paddle.follow_pointer(pointer_x, self.field.x);
        }
    }

    fn end(&mut self, outcome: Outcome) -> Event {
        self.phase = match outcome {
            Outcome::Won => Phase::Won,
            Outcome::Lost => Phase::Lost,
        };
        log::info!("Brick session over ({outcome:?}) with score {}", self.score);
        Event::Ended(outcome)
    }
}

impl Drawable for Session {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        for brick in &self.bricks {
            brick.draw(ctx, painter, transform);
        }
        self.paddle.draw(ctx, painter, transform);
        self.ball.draw(ctx, painter, transform);
    }
}

#[cfg(test)]
mod tests {
    use egui::Pos2;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        ball::{self, LAUNCH_VELOCITY},
        brick::BrickColor,
    };

    const FIELD: Vec2 = Vec2::new(800.0, 600.0);

    fn playing(bricks: Vec<Brick>) -> Session {
        let mut session = Session::with_bricks(FIELD, bricks);
        session.start();
        session
    }

    fn single_brick(hits: u32) -> Vec<Brick> {
        vec![Brick::new(Pos2::new(100.0, 100.0), BrickColor::Red, hits)]
    }

    /// Place the ball so that after one movement step it sits at `center` with `velocity`.
    fn aim(session: &mut Session, center: Pos2, velocity: Vec2) {
        session.ball.state = ball::State::Free;
        session.ball.velocity = velocity;
        session.ball.center = center - velocity;
    }

    #[test]
    fn test_inactive_session_ignores_ticks() {
        let mut session = Session::new(FIELD);
        let before = session.paddle;

        let events = session.tick(PaddleInput {
            left: true,
            ..Default::default()
        });

        assert!(events.is_empty());
        assert_eq!(session.paddle, before);
        assert!(!session.launch());
    }

    #[test]
    fn test_attached_ball_follows_paddle() {
        let mut session = playing(brick::layout(FIELD.x));

        session.tick(PaddleInput {
            right: true,
            ..Default::default()
        });

        assert_eq!(session.paddle.x, 355.0);
        assert!(session.ball.is_attached());
        assert_eq!(session.ball.center, Pos2::new(415.0, 485.0));
    }

    #[test]
    fn test_launch_frees_ball() {
        let mut session = playing(brick::layout(FIELD.x));
        let start = session.ball.center;

        assert!(session.launch());
        session.tick(PaddleInput::default());

        assert!(!session.ball.is_attached());
        assert_eq!(session.ball.center, start + LAUNCH_VELOCITY);
    }

    #[test]
    fn test_center_paddle_hit_bounces_straight_up() {
        let mut session = playing(single_brick(1));
        assert_eq!(session.paddle.x, 340.0);

        aim(&mut session, Pos2::new(400.0, 495.0), Vec2::new(2.0, 5.0));
        session.tick(PaddleInput::default());

        assert_eq!(session.ball.velocity, Vec2::new(0.0, -5.0));
        assert_eq!(session.ball.center, Pos2::new(400.0, 495.0));
    }

    #[test]
    fn test_two_hit_brick_scores_fifteen() {
        let mut session = playing(vec![
            Brick::new(Pos2::new(100.0, 100.0), BrickColor::Purple, 2),
            Brick::new(Pos2::new(600.0, 100.0), BrickColor::Red, 1),
        ]);

        aim(&mut session, Pos2::new(140.0, 135.0), Vec2::new(0.0, -5.0));
        let events = session.tick(PaddleInput::default());
        assert_eq!(
            events,
            vec![Event::BrickHit {
                index: 0,
                destroyed: false,
                points: 5
            }]
        );
        assert_eq!(session.bricks[0].hits_remaining, 1);
        assert!(!session.bricks[0].destroyed);
        assert_eq!(session.score, 5);

        aim(&mut session, Pos2::new(140.0, 135.0), Vec2::new(0.0, -5.0));
        let events = session.tick(PaddleInput::default());
        assert_eq!(
            events,
            vec![Event::BrickHit {
                index: 0,
                destroyed: true,
                points: 10
            }]
        );
        assert_eq!(session.bricks[0].hits_remaining, 0);
        assert!(session.bricks[0].destroyed);
        assert_eq!(session.score, 15);

        // Gone for good: the ball now passes through where it was
        aim(&mut session, Pos2::new(140.0, 135.0), Vec2::new(0.0, -5.0));
        assert!(session.tick(PaddleInput::default()).is_empty());
        assert_eq!(session.score, 15);
        assert_eq!(session.ball.velocity, Vec2::new(0.0, -5.0));
    }

    #[test]
    fn test_bottom_exit_costs_a_life() {
        let mut session = playing(single_brick(1));

        aim(&mut session, Pos2::new(200.0, 615.0), Vec2::new(3.0, 5.0));
        let events = session.tick(PaddleInput::default());

        assert_eq!(events, vec![Event::LifeLost { remaining: 2 }]);
        assert_eq!(session.lives, 2);
        assert!(session.is_active());
        assert!(session.ball.is_attached());
        assert_eq!(session.ball.velocity, LAUNCH_VELOCITY);
        assert_eq!(session.ball.center, Pos2::new(400.0, 485.0));
    }

    #[test]
    fn test_last_life_ends_once() {
        let mut session = playing(single_brick(1));
        session.lives = 1;
        session.score = 40;

        aim(&mut session, Pos2::new(200.0, 615.0), Vec2::new(3.0, 5.0));
        let events = session.tick(PaddleInput::default());

        assert_eq!(
            events,
            vec![
                Event::LifeLost { remaining: 0 },
                Event::Ended(Outcome::Lost)
            ]
        );
        assert_eq!(session.phase(), Phase::Lost);

        for _ in 0..10 {
            assert!(session.tick(PaddleInput::default()).is_empty());
        }
        assert_eq!(session.lives, 0);
        assert_eq!(session.score, 40);
    }

    #[test]
    fn test_win_fires_on_last_brick_tick() {
        let mut session = playing(single_brick(1));

        aim(&mut session, Pos2::new(140.0, 135.0), Vec2::new(0.0, -5.0));
        let events = session.tick(PaddleInput::default());

        assert_eq!(
            events,
            vec![
                Event::BrickHit {
                    index: 0,
                    destroyed: true,
                    points: 10
                },
                Event::Ended(Outcome::Won)
            ]
        );
        assert_eq!(session.phase(), Phase::Won);
        assert_eq!(session.score, 10);
    }

    #[test]
    fn test_clearing_field_wins_despite_last_life() {
        // Brick hangs past the bottom edge so the final hit and the exit share a tick
        let mut session = playing(vec![Brick::new(
            Pos2::new(100.0, 590.0),
            BrickColor::Red,
            1,
        )]);
        session.lives = 1;

        aim(&mut session, Pos2::new(140.0, 612.0), Vec2::new(0.0, 5.0));
        let events = session.tick(PaddleInput::default());

        assert_eq!(
            events,
            vec![
                Event::BrickHit {
                    index: 0,
                    destroyed: true,
                    points: 10
                },
                Event::LifeLost { remaining: 0 },
                Event::Ended(Outcome::Won)
            ]
        );
        assert_eq!(session.phase(), Phase::Won);
        assert_eq!(session.score, 10);
        assert!(session.tick(PaddleInput::default()).is_empty());
    }

    #[test]
    fn test_wall_and_brick_bounce_in_same_tick() {
        let mut session = playing(vec![Brick::new(
            Pos2::new(0.0, 100.0),
            BrickColor::Purple,
            2,
        )]);

        aim(&mut session, Pos2::new(5.0, 135.0), Vec2::new(-5.0, -5.0));
        let events = session.tick(PaddleInput::default());

        // The left wall flips vx, then the side hit on the brick flips it back
        assert_eq!(
            events,
            vec![Event::BrickHit {
                index: 0,
                destroyed: false,
                points: 5
            }]
        );
        assert_eq!(session.ball.velocity, Vec2::new(-5.0, -5.0));
        assert_eq!(session.ball.center, Pos2::new(5.0, 135.0));
        assert_eq!(session.score, 5);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Tick(PaddleInput),
        Launch,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (any::<bool>(), any::<bool>(), proptest::option::of(0.0f32..800.0)).prop_map(
                |(left, right, pointer_x)| Action::Tick(PaddleInput {
                    left,
                    right,
                    pointer_x
                })
            ),
            Just(Action::Launch),
        ]
    }

    proptest! {
        #[test]
        fn prop_session_invariants(actions in proptest::collection::vec(action(), 1..2000)) {
            let mut session = playing(brick::layout(FIELD.x));
            let radius = session.ball.radius;
            let paddle_size = (session.paddle.width, session.paddle.height, session.paddle.y);
            let mut ended = 0;

            for action in actions {
                let before_score = session.score;
                let before_bricks = session.bricks.clone();

                let events = match action {
                    Action::Tick(input) => session.tick(input),
                    Action::Launch => {
                        session.launch();
                        Vec::new()
                    }
                };

                let hits = events
                    .iter()
                    .filter(|event| matches!(event, Event::BrickHit { .. }))
                    .count();
                prop_assert!(hits <= 1);
                ended += events
                    .iter()
                    .filter(|event| matches!(event, Event::Ended(_)))
                    .count();

                prop_assert!(session.score >= before_score);
                for (before, after) in before_bricks.iter().zip(&session.bricks) {
                    prop_assert!(after.hits_remaining <= before.hits_remaining);
                    if before.destroyed {
                        prop_assert!(after.destroyed);
                        prop_assert_eq!(after.hits_remaining, 0);
                    }
                }

                prop_assert_eq!(session.ball.radius, radius);
                prop_assert_eq!(
                    (session.paddle.width, session.paddle.height, session.paddle.y),
                    paddle_size
                );
                prop_assert!(session.paddle.x >= 0.0);
                prop_assert!(session.paddle.x <= FIELD.x - session.paddle.width);
            }

            prop_assert!(ended <= 1);
            prop_assert_eq!(ended == 1, session.is_over());
        }
    }
}
