use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;
use egui::RichText;
use game_core::{CounterDisplay, GameController, GridBoard, ManualScheduler};
use shared::protocol::InputEvent;

use crate::controller::{events, orchestration};
use crate::ui::board_view;

pub type GuiGame = GameController<GridBoard, CounterDisplay, ManualScheduler>;

const INPUT_QUEUE_CAPACITY: usize = 64;
const IDLE_REPAINT: Duration = Duration::from_millis(250);
const COUNTER_FLASH: Duration = Duration::from_millis(300);

/// Window shell around the game. The game's virtual clock is advanced by
/// the wall-clock time between frames, and a repaint is requested for the
/// next due move. The clock should delay missed ticks so a stalled window
/// does not replay every move it slept through.
pub struct GoblinApp {
    game: GuiGame,
    input_tx: Sender<InputEvent>,
    input_rx: Receiver<InputEvent>,
    last_frame: Instant,
    seen_counter_updates: u64,
    counter_flash_until: Option<Instant>,
    sound_on: bool,
    status: String,
}

impl GoblinApp {
    pub fn new(game: GuiGame) -> Self {
        let (input_tx, input_rx) = bounded(INPUT_QUEUE_CAPACITY);
        let seen_counter_updates = game.display().updates();
        Self {
            game,
            input_tx,
            input_rx,
            last_frame: Instant::now(),
            seen_counter_updates,
            counter_flash_until: None,
            sound_on: true,
            status: String::new(),
        }
    }

    fn advance_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.game.advance(elapsed);
    }

    fn dispatch(&mut self, event: InputEvent) {
        orchestration::dispatch_input(&self.input_tx, event, &mut self.status);
    }

    fn apply_queued_inputs(&mut self) -> bool {
        orchestration::drain_inputs(&self.input_rx, &mut self.game) > 0
    }

    fn track_counter_flash(&mut self, now: Instant) {
        let updates = self.game.display().updates();
        if updates != self.seen_counter_updates {
            self.seen_counter_updates = updates;
            self.counter_flash_until = Some(now + COUNTER_FLASH);
        }
    }

    fn show_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let controls = self.game.display().controls();
                let start_label = if self.game.state().is_running() {
                    "Game Running"
                } else {
                    "Start Game"
                };

                if ui
                    .add_enabled(controls.start_enabled, egui::Button::new(start_label))
                    .clicked()
                {
                    self.dispatch(InputEvent::Start);
                }
                if ui
                    .add_enabled(controls.pause_enabled, egui::Button::new("Pause"))
                    .clicked()
                {
                    self.dispatch(InputEvent::Pause);
                }
                if ui.button("Reset").clicked() {
                    self.dispatch(InputEvent::Reset);
                }

                ui.separator();
                if ui.button("Faster").clicked() {
                    self.dispatch(InputEvent::SpeedUp);
                }
                if ui.button("Slower").clicked() {
                    self.dispatch(InputEvent::SpeedDown);
                }

                ui.separator();
                let sound_label = if self.sound_on { "Sound On" } else { "Sound Off" };
                if ui.button(sound_label).clicked() {
                    self.sound_on = !self.sound_on;
                    tracing::info!(sound_on = self.sound_on, "sound toggled");
                }
            });
            ui.add_space(6.0);
        });
    }

    fn show_status(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(RichText::new("Space: start/pause   Ctrl+R: reset   +/-: speed").weak());
                if !self.status.is_empty() {
                    ui.separator();
                    ui.small(RichText::new(&self.status).color(egui::Color32::LIGHT_RED));
                }
            });
        });
    }

    fn show_board(&self, ctx: &egui::Context, now: Instant) {
        let flashing = self.counter_flash_until.is_some_and(|until| until > now);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let size = if flashing { 26.0 } else { 22.0 };
                ui.label(RichText::new("Moves:").size(22.0));
                ui.label(
                    RichText::new(self.game.display().move_count().to_string())
                        .size(size)
                        .strong(),
                );
                ui.separator();
                ui.label(format!(
                    "every {} ms, {}",
                    self.game.state().move_interval().as_millis(),
                    self.game.state().phase().label()
                ));
            });
            ui.add_space(12.0);

            if board_view::show_board(ui, self.game.renderer()) {
                tracing::info!("goblin clicked");
            }
        });
    }
}

impl eframe::App for GoblinApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance_clock();

        for event in ctx.input(events::collect_keyboard_events) {
            self.dispatch(event);
        }
        self.apply_queued_inputs();

        let now = Instant::now();
        self.track_counter_flash(now);

        self.show_controls(ctx);
        self.show_status(ctx);
        self.show_board(ctx, now);

        if self.apply_queued_inputs() {
            ctx.request_repaint();
            return;
        }

        let mut wait = self
            .game
            .until_next_tick()
            .map_or(IDLE_REPAINT, |next| next.min(IDLE_REPAINT));
        if let Some(until) = self.counter_flash_until {
            if until > now {
                wait = wait.min(until - now);
            }
        }
        ctx.request_repaint_after(wait);
    }
}
