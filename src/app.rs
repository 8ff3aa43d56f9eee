use egui::{emath::TSTransform, Color32, RichText};
use ringbuffer::RingBuffer;

use crate::{
    breakout,
    control::FrameInput,
    drawable::{field_transform, Drawable},
    launcher::{ActiveGame, Launcher},
    memory::{self, Face},
    reaction,
    scores::{GameKind, HighScores, SessionEnd},
};

#[derive(Debug)]
pub struct App {
    target_frame_rate: f32,
    previous_frame_times: ringbuffer::AllocRingBuffer<web_time::Instant>,
    launcher: Launcher,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, target_frame_rate: f32) -> Self {
        let scores = HighScores::load(cc.storage);
        log::debug!("Loaded high scores: {scores:?}");

        Self {
            target_frame_rate,
            previous_frame_times: ringbuffer::AllocRingBuffer::new(128),
            launcher: Launcher::new(scores),
        }
    }

    fn compute_fps(&self) -> f32 {
        let (Some(first), Some(last)) = (
            self.previous_frame_times.front(),
            self.previous_frame_times.back(),
        ) else {
            return self.target_frame_rate;
        };

        let elapsed_secs = (*last - *first).as_secs_f32();
        if self.previous_frame_times.len() < 2 || elapsed_secs <= 0.0 {
            return self.target_frame_rate;
        }

        (self.previous_frame_times.len() as f32 - 1.0) / elapsed_secs
    }

    fn draw_chrome(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame, fps: f32) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Arcade");
                if self.launcher.active().is_some() && ui.button("Menu").clicked() {
                    self.launcher.close();
                }
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                ui.label(format!("FPS: {:.0}", fps.round()));
                egui::warn_if_debug_build(ui);
            });
        });
    }

    fn draw_menu(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let field = ui.available_size();

            ui.vertical_centered(|ui| {
                ui.add_space(0.3 * field.y);
                ui.heading(RichText::new("🎮 GAME LAUNCHER").strong());
                ui.add_space(20.0);
                ui.label(high_score_line(&self.launcher.scores));
                ui.add_space(20.0);

                ui.horizontal(|ui| {
                    // Center the row of buttons
                    let row_width = 3.0 * 180.0 + 2.0 * ui.spacing().item_spacing.x;
                    ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));

                    for kind in GameKind::ALL {
                        let button = egui::Button::new(
                            RichText::new(format!("{}  {}", kind.icon(), kind.name())).strong(),
                        );
                        if ui.add_sized(egui::vec2(180.0, 60.0), button).clicked() {
                            self.launcher.launch(kind, field, rand::random());
                        }
                    }
                });
            });
        });
    }

    fn run_game(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let Some(active) = self.launcher.active_mut() else {
            return;
        };
        let finished = active.is_finished();

        egui::TopBottomPanel::top("status")
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| match &mut active.game {
                    ActiveGame::Reaction(session) => reaction_status(ui, session),
                    ActiveGame::Breakout(session) => breakout_status(ui, session),
                    ActiveGame::Memory(session) => memory_status(ui, session, finished),
                });
            });

        let input = egui::CentralPanel::default()
            .show(ctx, |ui| match &mut active.game {
                ActiveGame::Memory(session) => {
                    draw_cards(ui, session);
                    FrameInput::capture(ctx, egui::Rect::NOTHING, TSTransform::IDENTITY)
                }
                ActiveGame::Reaction(session) => draw_field(ctx, ui, session.field, &*session),
                ActiveGame::Breakout(session) => draw_field(ctx, ui, session.field, &*session),
            })
            .inner;

        if input.escape {
            self.launcher.close();
            return;
        }

        active.game.handle_input(&input);

        let ticks = active.ticker.due(web_time::Instant::now());
        let interval = active.ticker.interval();
        let dt = interval.as_secs_f32();

        let mut result = None;
        for _ in 0..ticks {
            if let Some(value) = active.game.tick(&input, dt) {
                result = Some(value);
            }
        }

        if let Some(value) = result {
            let end = SessionEnd {
                game: active.game.kind(),
                value,
            };
            self.finish(end, frame);
        }

        self.launcher.advance(ticks as f32 * dt);

        // Schedule a repaint at the next tick
        ctx.request_repaint_after(interval);
    }

    fn finish(&mut self, end: SessionEnd, frame: &mut eframe::Frame) {
        self.launcher.finish(end);

        if let Some(storage) = frame.storage_mut() {
            self.launcher.scores.save(storage);
            storage.flush();
        }
    }
}

fn high_score_line(scores: &HighScores) -> String {
    format!(
        "🏆 High Scores  |  🎯 Click: {}  |  🧱 Brick: {}  |  🧠 Memory: {} moves",
        scores.click, scores.brick, scores.memory_moves
    )
}

/// Paint a session into the remaining space and read the frame's input relative to it.
fn draw_field(
    ctx: &egui::Context,
    ui: &mut egui::Ui,
    field: egui::Vec2,
    drawable: &dyn Drawable,
) -> FrameInput {
    let available_size = ui.available_size();

    // Allocate a painting region that takes up the remaining space
    let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());
    let canvas_rect = response.rect;

    let transform = field_transform(field, canvas_rect);

    let field_rect = transform.mul_rect(egui::Rect::from_min_size(egui::Pos2::ZERO, field));
    painter.rect_stroke(
        field_rect,
        0.0,
        egui::Stroke::new(1.0, ctx.style().visuals.weak_text_color()),
    );

    drawable.draw(ctx, &painter, transform);

    FrameInput::capture(ctx, field_rect, transform.inverse())
}

fn start_button(ui: &mut egui::Ui) -> bool {
    ui.add(
        egui::Button::new(RichText::new("▶  START GAME").strong().color(Color32::BLACK))
            .fill(Color32::LIGHT_GREEN),
    )
    .clicked()
}

fn reaction_status(ui: &mut egui::Ui, session: &mut reaction::Session) {
    match session.phase() {
        reaction::Phase::Ready => {
            if start_button(ui) {
                session.start();
            }
            ui.label("Click the circles before they expire. They get smaller as you go.");
        }
        reaction::Phase::Playing => {
            ui.label(RichText::new(format!("Score: {}", session.score)).heading());
            if let Some(target) = session.target() {
                let remaining = target.remaining.max(0.0);
                let text = RichText::new(format!("Time: {remaining:.1}s")).heading();
                if remaining < 0.5 {
                    ui.label(text.color(ui.visuals().error_fg_color));
                } else {
                    ui.label(text);
                }
            }
        }
        reaction::Phase::Over => {
            ui.label(RichText::new(format!("⏱ TIME'S UP! Score: {}", session.score)).heading());
        }
    }
}

fn breakout_status(ui: &mut egui::Ui, session: &mut breakout::Session) {
    match session.phase() {
        breakout::Phase::Ready => {
            if start_button(ui) {
                session.start();
            }
            ui.label("Use ← → or the mouse to move the paddle. Space or click launches the ball.");
        }
        breakout::Phase::Playing => {
            ui.label(RichText::new(format!("Score: {}", session.score)).heading());
            let hearts = "❤".repeat(session.lives as usize);
            ui.label(RichText::new(format!("Lives: {hearts}")).heading());
            ui.label(format!("Bricks left: {}", session.bricks_left()));
        }
        breakout::Phase::Won => {
            let text = format!("🎉 VICTORY! Score: {}. All bricks destroyed!", session.score);
            ui.label(RichText::new(text).heading());
        }
        breakout::Phase::Lost => {
            let text = format!("💥 GAME OVER. Score: {}. No lives remaining!", session.score);
            ui.label(RichText::new(text).heading());
        }
    }
}

fn memory_status(ui: &mut egui::Ui, session: &mut memory::Session, finished: bool) {
    let seconds = session.elapsed as u32;
    ui.label(RichText::new(format!("Moves: {}", session.moves)).heading());
    ui.label(
        RichText::new(format!(
            "Matched: {} / {}",
            session.matched_pairs,
            memory::PAIRS
        ))
        .heading(),
    );
    ui.label(RichText::new(format!("Timer: {:02}:{:02}", seconds / 60, seconds % 60)).heading());

    if session.phase() == memory::Phase::Playing {
        if ui.button("🔄 Restart").clicked() {
            session.restart();
        }
    } else {
        let returning = if finished { " Returning to launcher..." } else { "" };
        ui.label(
            RichText::new(format!("🎉 YOU WIN in {} moves!{returning}", session.moves)).heading(),
        );
    }
}

fn draw_cards(ui: &mut egui::Ui, session: &mut memory::Session) {
    let card_size = egui::vec2(120.0, 120.0);
    let accepts_flips = session.accepts_flips();

    ui.vertical_centered(|ui| {
        egui::Grid::new("cards")
            .spacing(egui::vec2(15.0, 15.0))
            .show(ui, |ui| {
                let mut flipped = None;

                for (index, card) in session.cards.iter().enumerate() {
                    let (text, fill) = match card.face {
                        Face::Down => ("?", ui.visuals().widgets.inactive.bg_fill),
                        Face::Up => (card.icon, ui.visuals().selection.bg_fill),
                        Face::Matched => (card.icon, Color32::DARK_GREEN),
                    };

                    let button = egui::Button::new(RichText::new(text).size(48.0)).fill(fill);
                    let enabled = accepts_flips && card.face == Face::Down;
                    if ui.add_enabled(enabled, button.min_size(card_size)).clicked() {
                        flipped = Some(index);
                    }

                    if (index + 1) % memory::COLUMNS == 0 {
                        ui.end_row();
                    }
                }

                if let Some(index) = flipped {
                    session.flip(index);
                }
            });
    });
}

impl eframe::App for App {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.launcher.scores.save(storage);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.previous_frame_times.push(web_time::Instant::now());
        let fps = self.compute_fps();

        self.draw_chrome(ctx, _frame, fps);

        if self.launcher.active().is_some() {
            self.run_game(ctx, _frame);
        } else {
            self.draw_menu(ctx);
        }
    }
}
