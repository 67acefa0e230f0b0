use super::types::{CellRole, DeathReason, Position};

/// Where the game loop renders a frame: one `clear`, then any number of
/// `draw_cell` calls, then `present`.
pub trait DrawingSurface: Send {
    fn clear(&mut self);

    fn draw_cell(&mut self, position: Position, role: CellRole);

    fn present(&mut self) {}
}

/// Passive UI that mirrors game progress (score label, overlays).
pub trait GameObserver: Send {
    fn on_game_start(&mut self);

    fn on_score_changed(&mut self, score: u32);

    fn on_game_over(&mut self, score: u32, reason: DeathReason);
}
