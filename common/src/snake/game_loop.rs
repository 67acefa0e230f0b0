use std::future::pending;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Sleep, sleep};

use crate::log;
use super::error::GameError;
use super::game_state::GameState;
use super::rng::GameRng;
use super::settings::{Difficulty, GameConfig};
use super::surface::{DrawingSurface, GameObserver};
use super::types::{CellRole, Direction, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCommand {
    Turn(Direction),
    Restart,
    ChangeDifficulty(Difficulty),
    Shutdown,
}

/// Single-shot timer for the next tick. At most one tick is pending, and
/// cancelling drops it outright, so a cancelled tick can never fire.
#[derive(Default)]
pub struct TickScheduler {
    pending: Option<(u64, Pin<Box<Sleep>>)>,
    epoch: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration) {
        self.pending = Some((self.epoch, Box::pin(sleep(delay))));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.epoch += 1;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Resolves with the epoch the tick was armed in. Never resolves while disarmed.
    /// Dropping the returned future keeps the pending tick in place.
    pub async fn wait(&mut self) -> u64 {
        let Some((epoch, timer)) = self.pending.as_mut() else {
            return pending().await;
        };

        timer.as_mut().await;
        let epoch = *epoch;
        self.pending = None;
        epoch
    }
}

pub struct GameLoop<S: DrawingSurface, O: GameObserver> {
    config: GameConfig,
    state: GameState,
    surface: S,
    observer: O,
    rng: GameRng,
    scheduler: TickScheduler,
}

impl<S: DrawingSurface, O: GameObserver> GameLoop<S, O> {
    pub fn new(config: GameConfig, surface: S, observer: O, mut rng: GameRng) -> Result<Self, GameError> {
        let state = GameState::new(&config, &mut rng)?;

        Ok(Self {
            config,
            state,
            surface,
            observer,
            rng,
            scheduler: TickScheduler::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Throws away the current game (and its pending tick) and starts a new one.
    pub fn reset(&mut self, config: GameConfig) -> Result<(), GameError> {
        self.scheduler.cancel();
        self.state = GameState::new(&config, &mut self.rng)?;
        self.config = config;
        self.start();
        Ok(())
    }

    fn start(&mut self) {
        log!(
            "Game started: {}x{} grid, {}ms per tick, seed {}",
            self.config.grid.width,
            self.config.grid.height,
            self.config.tick_interval.as_millis(),
            self.rng.seed()
        );
        self.observer.on_game_start();
        self.observer.on_score_changed(self.state.score());
        self.scheduler.schedule(self.config.tick_interval);
    }

    pub fn tick(&mut self) -> Result<Phase, GameError> {
        let score_before = self.state.score();

        self.surface.clear();
        let phase = self.state.advance(&mut self.rng)?;

        if self.state.score() != score_before {
            self.observer.on_score_changed(self.state.score());
        }

        match phase {
            Phase::Running => {
                self.render();
                self.surface.present();
                self.scheduler.schedule(self.config.tick_interval);
            }
            Phase::GameOver => {
                self.surface.present();
                if let Some(reason) = self.state.death_reason() {
                    self.observer.on_game_over(self.state.score(), reason);
                }
            }
        }

        Ok(phase)
    }

    fn render(&mut self) {
        self.surface.draw_cell(self.state.food(), CellRole::Food);

        for (index, segment) in self.state.snake().iter().enumerate() {
            let role = if index == 0 { CellRole::Head } else { CellRole::Body };
            self.surface.draw_cell(*segment, role);
        }
    }

    pub fn handle_command(&mut self, command: LoopCommand) -> Result<ControlFlow<()>, GameError> {
        match command {
            LoopCommand::Turn(direction) => {
                self.state.request_direction(direction);
            }
            LoopCommand::Restart => {
                log!("Restart requested");
                self.reset(self.config.clone())?;
            }
            LoopCommand::ChangeDifficulty(difficulty) => {
                log!("Difficulty changed to {}", difficulty.label());
                self.reset(self.config.with_difficulty(difficulty))?;
            }
            LoopCommand::Shutdown => {
                self.scheduler.cancel();
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Drives the game until `Shutdown` arrives or every sender is gone.
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<LoopCommand>) -> Result<(), GameError> {
        self.start();

        loop {
            tokio::select! {
                epoch = self.scheduler.wait(), if self.scheduler.is_armed() => {
                    debug_assert_eq!(epoch, self.scheduler.epoch(), "cancelled timers never fire");
                    self.tick()?;
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    if self.handle_command(command)?.is_break() {
                        break;
                    }
                }
            }
        }

        log!("Game loop stopped");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }
}
