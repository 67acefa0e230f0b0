mod error;
mod game_loop;
mod game_state;
mod rng;
mod settings;
mod surface;
mod types;

pub use error::GameError;
pub use game_loop::{GameLoop, LoopCommand, TickScheduler};
pub use game_state::{FOOD_REWARD, GameState, SELF_COLLISION_MIN_INDEX};
pub use rng::GameRng;
pub use settings::{Difficulty, GameConfig, MAX_GRID_SIDE, MIN_GRID_SIDE};
pub use surface::{DrawingSurface, GameObserver};
pub use types::{CellRole, DeathReason, Direction, GridSize, Phase, Position};
