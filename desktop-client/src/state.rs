use common::snake::{CellRole, DeathReason, Position};
use eframe::egui;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCell {
    pub position: Position,
    pub role: CellRole,
}

/// Everything the window needs to draw the current game, as last published
/// by the game loop thread.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameView {
    pub frame: Vec<FrameCell>,
    pub score: u32,
    pub game_over: bool,
    pub instructions_visible: bool,
    pub death_reason: Option<DeathReason>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct SharedState {
    view: Arc<Mutex<GameView>>,
    error: Arc<Mutex<Option<String>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_context(&self, context: egui::Context) {
        *lock(&self.context) = Some(context);
    }

    fn request_repaint(&self) {
        if let Some(context) = lock(&self.context).as_ref() {
            context.request_repaint();
        }
    }

    pub fn get_view(&self) -> GameView {
        lock(&self.view).clone()
    }

    pub fn update_view(&self, update: impl FnOnce(&mut GameView)) {
        update(&mut lock(&self.view));
        self.request_repaint();
    }

    pub fn set_error(&self, error: String) {
        *lock(&self.error) = Some(error);
        self.request_repaint();
    }

    pub fn get_error(&self) -> Option<String> {
        lock(&self.error).clone()
    }
}
