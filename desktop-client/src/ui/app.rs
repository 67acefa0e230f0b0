use common::log;
use common::snake::{DeathReason, Difficulty, Direction, GridSize, LoopCommand};
use eframe::egui;
use tokio::sync::mpsc;

use super::colors::{board_background, cell_colors};
use crate::config::{PreferenceStore, Theme};
use crate::state::{GameView, SharedState};

pub struct SnakeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<LoopCommand>,
    preferences: Box<dyn PreferenceStore>,
    grid: GridSize,
    cell_size: f32,
    difficulty: Difficulty,
    dark_mode: bool,
}

impl SnakeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<LoopCommand>,
        preferences: Box<dyn PreferenceStore>,
        grid: GridSize,
        cell_size: f32,
        difficulty: Difficulty,
    ) -> Self {
        shared_state.set_context(cc.egui_ctx.clone());

        let dark_mode = match preferences.get_theme() {
            Some(theme) => theme == Theme::Dark,
            None => cc.egui_ctx.style().visuals.dark_mode,
        };
        apply_theme(&cc.egui_ctx, dark_mode);

        Self {
            shared_state,
            command_tx,
            preferences,
            grid,
            cell_size,
            difficulty,
            dark_mode,
        }
    }

    fn send(&self, command: LoopCommand) {
        if self.command_tx.send(command).is_err() {
            log!("Game loop is gone, dropping {:?}", command);
        }
    }

    fn handle_input(&self, ctx: &egui::Context, view: &GameView) {
        for command in input_commands(ctx, view.game_over) {
            self.send(command);
        }
    }

    fn render_toolbar(&mut self, ctx: &egui::Context, view: &GameView) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Score: {}", view.score));
                ui.separator();

                let previous = self.difficulty;
                egui::ComboBox::from_label("Difficulty")
                    .selected_text(self.difficulty.label())
                    .show_ui(ui, |ui| {
                        for difficulty in Difficulty::ALL {
                            ui.selectable_value(&mut self.difficulty, difficulty, difficulty.label());
                        }
                    });
                if self.difficulty != previous {
                    self.send(LoopCommand::ChangeDifficulty(self.difficulty));
                }

                ui.separator();
                if ui.checkbox(&mut self.dark_mode, "Dark theme").changed() {
                    apply_theme(ctx, self.dark_mode);
                    let theme = if self.dark_mode { Theme::Dark } else { Theme::Light };
                    if let Err(e) = self.preferences.set_theme(theme) {
                        log!("Failed to save theme: {}", e);
                    }
                }

                ui.separator();
                if ui.button("Restart").clicked() {
                    self.send(LoopCommand::Restart);
                }
            });
        });
    }

    fn render_board(&self, ui: &mut egui::Ui, view: &GameView) {
        let size = egui::vec2(
            self.grid.width as f32 * self.cell_size,
            self.grid.height as f32 * self.cell_size,
        );
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let board = response.rect;
        painter.rect_filled(board, 4.0, board_background(self.dark_mode));

        for cell in &view.frame {
            let min = board.min
                + egui::vec2(
                    cell.position.col as f32 * self.cell_size,
                    cell.position.row as f32 * self.cell_size,
                );
            let rect = egui::Rect::from_min_size(min, egui::vec2(self.cell_size, self.cell_size));
            let (fill, stroke) = cell_colors(cell.role);
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, stroke), egui::StrokeKind::Inside);
        }
    }

    fn render_game_over(&self, ctx: &egui::Context, view: &GameView) {
        egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Final Score: {}", view.score))
                            .size(20.0),
                    );
                    if let Some(reason) = view.death_reason {
                        ui.label(death_reason_text(reason));
                    }
                    ui.add_space(10.0);
                    if ui.button("Play Again (Enter)").clicked() {
                        self.send(LoopCommand::Restart);
                    }
                });
            });
    }

    fn render_error(&self, ctx: &egui::Context, error: &str) {
        egui::CentralPanel::default().show(ctx, |_ui| {});
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(error).color(egui::Color32::RED));
                ui.add_space(10.0);
                if ui.button("Close").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(error) = self.shared_state.get_error() {
            self.render_error(ctx, &error);
            return;
        }

        let view = self.shared_state.get_view();
        self.handle_input(ctx, &view);
        self.render_toolbar(ctx, &view);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.render_board(ui, &view);
                ui.add_space(8.0);
                if view.instructions_visible {
                    ui.label("Use Arrow Keys or WASD to move");
                }
            });
        });

        if view.game_over {
            self.render_game_over(ctx, &view);
        }
    }
}

const DIRECTION_KEYS: [(egui::Key, Direction); 8] = [
    (egui::Key::ArrowUp, Direction::Up),
    (egui::Key::W, Direction::Up),
    (egui::Key::ArrowDown, Direction::Down),
    (egui::Key::S, Direction::Down),
    (egui::Key::ArrowLeft, Direction::Left),
    (egui::Key::A, Direction::Left),
    (egui::Key::ArrowRight, Direction::Right),
    (egui::Key::D, Direction::Right),
];

fn direction_for_key(key: egui::Key) -> Option<Direction> {
    DIRECTION_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, direction)| *direction)
}

/// Commands for this frame's key presses, in the order they arrived.
/// Every directional press is forwarded; the game decides which one counts.
fn input_commands(ctx: &egui::Context, game_over: bool) -> Vec<LoopCommand> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key { key, pressed: true, .. } => Some(*key),
                _ => None,
            })
            .filter_map(|key| {
                if game_over {
                    matches!(key, egui::Key::Enter | egui::Key::Space).then_some(LoopCommand::Restart)
                } else {
                    direction_for_key(key).map(LoopCommand::Turn)
                }
            })
            .collect()
    })
}

fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
}

fn death_reason_text(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::WallCollision => "You hit the wall",
        DeathReason::SelfCollision => "You ran into yourself",
    }
}
