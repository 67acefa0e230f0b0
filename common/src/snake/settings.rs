use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Validate;
use super::error::GameError;
use super::types::GridSize;

pub const MIN_GRID_SIDE: u32 = 5;
pub const MAX_GRID_SIDE: u32 = 200;
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(10);
const MAX_TICK_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn tick_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Normal => Duration::from_millis(120),
            Difficulty::Hard => Duration::from_millis(60),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty '{}', expected easy, normal or hard", s))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub tick_interval: Duration,
}

impl GameConfig {
    pub fn new(grid: GridSize, difficulty: Difficulty) -> Self {
        Self {
            grid,
            tick_interval: difficulty.tick_interval(),
        }
    }

    /// Derives the logical grid from canvas pixel dimensions.
    pub fn from_canvas(
        canvas_width_px: u32,
        canvas_height_px: u32,
        cell_size_px: u32,
        difficulty: Difficulty,
    ) -> Result<Self, GameError> {
        if cell_size_px == 0 {
            return Err(GameError::InvalidConfig("cell size must be greater than 0".to_string()));
        }

        let config = Self::new(
            GridSize::new(canvas_width_px / cell_size_px, canvas_height_px / cell_size_px),
            difficulty,
        );
        config.validate().map_err(GameError::InvalidConfig)?;
        Ok(config)
    }

    pub fn with_difficulty(&self, difficulty: Difficulty) -> Self {
        Self::new(self.grid, difficulty)
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.grid.width < MIN_GRID_SIDE || self.grid.height < MIN_GRID_SIDE {
            return Err(format!(
                "grid must be at least {0}x{0} cells, got {1}x{2}",
                MIN_GRID_SIDE, self.grid.width, self.grid.height
            ));
        }
        if self.grid.width > MAX_GRID_SIDE || self.grid.height > MAX_GRID_SIDE {
            return Err(format!(
                "grid must not exceed {0}x{0} cells, got {1}x{2}",
                MAX_GRID_SIDE, self.grid.width, self.grid.height
            ));
        }
        if self.tick_interval < MIN_TICK_INTERVAL || self.tick_interval > MAX_TICK_INTERVAL {
            return Err(format!(
                "tick interval must be between {}ms and {}ms",
                MIN_TICK_INTERVAL.as_millis(),
                MAX_TICK_INTERVAL.as_millis()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parses_labels_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("Normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("insane".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_intervals() {
        assert_eq!(Difficulty::Easy.tick_interval(), Duration::from_millis(200));
        assert_eq!(Difficulty::Normal.tick_interval(), Duration::from_millis(120));
        assert_eq!(Difficulty::Hard.tick_interval(), Duration::from_millis(60));
    }

    #[test]
    fn test_from_canvas_divides_by_cell_size() {
        let config = GameConfig::from_canvas(400, 300, 20, Difficulty::Hard).unwrap();
        assert_eq!(config.grid, GridSize::new(20, 15));
        assert_eq!(config.tick_interval, Duration::from_millis(60));
    }

    #[test]
    fn test_from_canvas_rejects_zero_cell_size() {
        assert!(matches!(
            GameConfig::from_canvas(400, 400, 0, Difficulty::Normal),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_canvas_rejects_tiny_grid() {
        assert!(GameConfig::from_canvas(80, 400, 20, Difficulty::Normal).is_err());
    }

    #[test]
    fn test_with_difficulty_keeps_grid() {
        let config = GameConfig::new(GridSize::new(30, 20), Difficulty::Easy);
        let harder = config.with_difficulty(Difficulty::Hard);
        assert_eq!(harder.grid, config.grid);
        assert_eq!(harder.tick_interval, Duration::from_millis(60));
    }
}
