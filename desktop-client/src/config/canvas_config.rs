use common::config::Validate;
use common::snake::{Difficulty, GameConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CanvasConfig {
    pub width_px: u32,
    pub height_px: u32,
    pub cell_size_px: u32,
}

impl CanvasConfig {
    pub fn game_config(&self, difficulty: Difficulty) -> Result<GameConfig, String> {
        GameConfig::from_canvas(self.width_px, self.height_px, self.cell_size_px, difficulty)
            .map_err(|e| e.to_string())
    }
}

impl Validate for CanvasConfig {
    fn validate(&self) -> Result<(), String> {
        self.game_config(Difficulty::default()).map(|_| ())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width_px: 400,
            height_px: 400,
            cell_size_px: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::snake::GridSize;

    #[test]
    fn test_default_canvas_is_a_20_by_20_grid() {
        let config = CanvasConfig::default().game_config(Difficulty::Normal).unwrap();
        assert_eq!(config.grid, GridSize::new(20, 20));
    }

    #[test]
    fn test_zero_cell_size_is_invalid() {
        let canvas = CanvasConfig {
            cell_size_px: 0,
            ..CanvasConfig::default()
        };
        assert!(canvas.validate().is_err());
    }

    #[test]
    fn test_tiny_canvas_is_invalid() {
        let canvas = CanvasConfig {
            width_px: 60,
            height_px: 400,
            cell_size_px: 20,
        };
        assert!(canvas.validate().is_err());
    }
}
