use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell is covered by the snake, so no food can be placed.
    #[error("no free cell left for food on a {width}x{height} grid")]
    GridFull { width: u32, height: u32 },
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}
