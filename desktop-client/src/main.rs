mod config;
mod state;
mod surface;
mod ui;

use std::path::PathBuf;
use clap::Parser;
use common::snake::{Difficulty, GameLoop, GameRng};
use common::{log, logger};
use eframe::egui;
use tokio::sync::mpsc;

use config::{get_config_manager, Config, ConfigPreferenceStore};
use state::SharedState;
use surface::{SharedObserver, SharedSurface};
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "snake_desktop", about = "Single-player snake")]
struct Args {
    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the difficulty stored in the config
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Desktop".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(args.config);
    let config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let difficulty = args.difficulty.unwrap_or(config.difficulty);
    let game_config = config.canvas.game_config(difficulty)?;
    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_random(),
    };

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let game_loop = GameLoop::new(
        game_config.clone(),
        SharedSurface::new(shared_state.clone()),
        SharedObserver::new(shared_state.clone()),
        rng,
    )?;

    let loop_state = shared_state.clone();
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
            Ok(runtime) => runtime,
            Err(e) => {
                loop_state.set_error(format!("Failed to start game loop: {}", e));
                return;
            }
        };
        if let Err(e) = runtime.block_on(game_loop.run(command_rx)) {
            log!("Game loop error: {}", e);
            loop_state.set_error(e.to_string());
        }
    });

    let width = config.canvas.width_px as f32;
    let height = config.canvas.height_px as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width.max(480.0) + 40.0, height + 120.0])
            .with_title("Snake"),
        ..Default::default()
    };

    let preferences = Box::new(ConfigPreferenceStore::new(config_manager));
    let cell_size = config.canvas.cell_size_px as f32;
    eframe::run_native(
        "Snake",
        options,
        Box::new(move |cc| {
            Ok(Box::new(SnakeApp::new(
                cc,
                shared_state,
                command_tx,
                preferences,
                game_config.grid,
                cell_size,
                difficulty,
            )))
        }),
    )?;

    Ok(())
}
