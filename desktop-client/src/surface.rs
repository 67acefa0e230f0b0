use common::snake::{CellRole, DeathReason, DrawingSurface, GameObserver, Position};

use crate::state::{FrameCell, SharedState};

/// Collects the cells of one frame and hands the finished frame to the window.
pub struct SharedSurface {
    shared_state: SharedState,
    pending: Vec<FrameCell>,
}

impl SharedSurface {
    pub fn new(shared_state: SharedState) -> Self {
        Self {
            shared_state,
            pending: Vec::new(),
        }
    }
}

impl DrawingSurface for SharedSurface {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn draw_cell(&mut self, position: Position, role: CellRole) {
        self.pending.push(FrameCell { position, role });
    }

    fn present(&mut self) {
        let frame = std::mem::take(&mut self.pending);
        self.shared_state.update_view(|view| view.frame = frame);
    }
}

pub struct SharedObserver {
    shared_state: SharedState,
}

impl SharedObserver {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl GameObserver for SharedObserver {
    fn on_game_start(&mut self) {
        self.shared_state.update_view(|view| {
            view.score = 0;
            view.game_over = false;
            view.instructions_visible = true;
            view.death_reason = None;
        });
    }

    fn on_score_changed(&mut self, score: u32) {
        self.shared_state.update_view(|view| view.score = score);
    }

    fn on_game_over(&mut self, score: u32, reason: DeathReason) {
        self.shared_state.update_view(|view| {
            view.score = score;
            view.game_over = true;
            view.instructions_visible = false;
            view.death_reason = Some(reason);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_published_only_on_present() {
        let state = SharedState::new();
        let mut surface = SharedSurface::new(state.clone());

        surface.clear();
        surface.draw_cell(Position::new(3, 4), CellRole::Food);
        surface.draw_cell(Position::new(10, 10), CellRole::Head);
        assert!(state.get_view().frame.is_empty());

        surface.present();
        let frame = state.get_view().frame;
        assert_eq!(
            frame,
            vec![
                FrameCell { position: Position::new(3, 4), role: CellRole::Food },
                FrameCell { position: Position::new(10, 10), role: CellRole::Head },
            ]
        );
    }

    #[test]
    fn test_cleared_frame_replaces_previous_one() {
        let state = SharedState::new();
        let mut surface = SharedSurface::new(state.clone());

        surface.clear();
        surface.draw_cell(Position::new(1, 1), CellRole::Body);
        surface.present();
        surface.clear();
        surface.present();

        assert!(state.get_view().frame.is_empty());
    }

    #[test]
    fn test_observer_toggles_overlays() {
        let state = SharedState::new();
        let mut observer = SharedObserver::new(state.clone());

        observer.on_game_start();
        let view = state.get_view();
        assert!(view.instructions_visible);
        assert!(!view.game_over);

        observer.on_score_changed(20);
        observer.on_game_over(20, DeathReason::WallCollision);
        let view = state.get_view();
        assert_eq!(view.score, 20);
        assert!(view.game_over);
        assert!(!view.instructions_visible);
        assert_eq!(view.death_reason, Some(DeathReason::WallCollision));

        observer.on_game_start();
        let view = state.get_view();
        assert_eq!(view.score, 0);
        assert!(!view.game_over);
        assert_eq!(view.death_reason, None);
    }
}
