use std::collections::VecDeque;

use crate::config::Validate;
use crate::log;
use super::error::GameError;
use super::rng::GameRng;
use super::settings::GameConfig;
use super::types::{DeathReason, Direction, GridSize, Phase, Position};

pub const FOOD_REWARD: u32 = 10;

/// The head is only compared against segments at this index or later, so
/// segments 0..=3 never count as a self-collision.
pub const SELF_COLLISION_MIN_INDEX: usize = 4;

const MAX_FOOD_PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Clone, Debug)]
pub struct GameState {
    snake: VecDeque<Position>,
    food: Position,
    direction: Direction,
    pending_direction: Option<Direction>,
    direction_locked: bool,
    score: u32,
    phase: Phase,
    death_reason: Option<DeathReason>,
    grid: GridSize,
}

impl GameState {
    /// Fresh game: a single segment in the middle of the grid, standing still.
    pub fn new(config: &GameConfig, rng: &mut GameRng) -> Result<Self, GameError> {
        config.validate().map_err(GameError::InvalidConfig)?;

        let grid = config.grid;
        let start = grid.center();
        let mut state = Self {
            snake: VecDeque::from([start]),
            food: start,
            direction: Direction::None,
            pending_direction: None,
            direction_locked: false,
            score: 0,
            phase: Phase::Running,
            death_reason: None,
            grid,
        };
        state.place_food(rng)?;
        Ok(state)
    }

    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn head(&self) -> Position {
        *self.snake.front().expect("Snake body should never be empty")
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Queues a turn for the next tick. Only the first request between two ticks
    /// is considered; it takes the lock even when it is rejected as a reversal.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.phase == Phase::GameOver || direction.is_none() || self.direction_locked {
            return false;
        }

        self.direction_locked = true;

        if direction.is_opposite(&self.direction) {
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// One tick of the simulation.
    pub fn advance(&mut self, rng: &mut GameRng) -> Result<Phase, GameError> {
        if self.phase == Phase::GameOver {
            return Ok(Phase::GameOver);
        }

        self.direction_locked = false;
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        if self.direction.is_none() {
            return Ok(Phase::Running);
        }

        let new_head = self.head().offset(self.direction);
        self.snake.push_front(new_head);

        if new_head == self.food {
            self.score += FOOD_REWARD;
            log!(
                "Ate food at ({}, {}). Score: {}",
                new_head.col,
                new_head.row,
                self.score
            );
            self.place_food(rng)?;
        } else {
            self.snake.pop_back();
        }

        if let Some(reason) = self.detect_collision() {
            self.phase = Phase::GameOver;
            self.death_reason = Some(reason);
            log!(
                "Game over ({:?}) at ({}, {}). Score: {}",
                reason,
                new_head.col,
                new_head.row,
                self.score
            );
            return Ok(Phase::GameOver);
        }

        Ok(Phase::Running)
    }

    /// Rejection-samples a free cell; falls back to a uniform pick among the
    /// free cells once the attempt budget is spent.
    pub fn place_food(&mut self, rng: &mut GameRng) -> Result<Position, GameError> {
        for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
            let candidate = Position::new(
                rng.random_range(0..self.grid.width) as i32,
                rng.random_range(0..self.grid.height) as i32,
            );

            if !self.occupies(candidate) {
                return Ok(self.set_food(candidate));
            }
        }

        let free_cells: Vec<Position> = (0..self.grid.height as i32)
            .flat_map(|row| (0..self.grid.width as i32).map(move |col| Position::new(col, row)))
            .filter(|cell| !self.occupies(*cell))
            .collect();

        if free_cells.is_empty() {
            return Err(GameError::GridFull {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        let candidate = free_cells[rng.random_range(0..free_cells.len())];
        Ok(self.set_food(candidate))
    }

    fn set_food(&mut self, position: Position) -> Position {
        self.food = position;
        log!("Food placed at ({}, {})", position.col, position.row);
        position
    }

    fn occupies(&self, position: Position) -> bool {
        self.snake.contains(&position)
    }

    fn detect_collision(&self) -> Option<DeathReason> {
        let head = self.head();

        if self
            .snake
            .iter()
            .skip(SELF_COLLISION_MIN_INDEX)
            .any(|segment| *segment == head)
        {
            return Some(DeathReason::SelfCollision);
        }

        if !self.grid.contains(head) {
            return Some(DeathReason::WallCollision);
        }

        None
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        grid: GridSize,
        snake: Vec<Position>,
        direction: Direction,
        food: Position,
    ) -> Self {
        Self {
            snake: snake.into(),
            food,
            direction,
            pending_direction: None,
            direction_locked: false,
            score: 0,
            phase: Phase::Running,
            death_reason: None,
            grid,
        }
    }

    #[cfg(test)]
    pub(crate) fn force_food(&mut self, food: Position) {
        self.food = food;
    }
}
