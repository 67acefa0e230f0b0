mod directory_listing;
mod server_config;
mod web_server;

use std::path::PathBuf;
use clap::Parser;
use common::{log, logger};

use server_config::{DEFAULT_BIND_ADDRESS, DEFAULT_PORT, DEFAULT_ROOT};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "snake_asset_server", about = "Serves the snake game's static files")]
struct Args {
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,

    /// Directory whose files are served
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("AssetServer".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let root = args
        .root
        .canonicalize()
        .map_err(|e| format!("Cannot serve {}: {}", args.root.display(), e))?;
    let addr = format!("{}:{}", args.bind, args.port);

    run_web_server(&addr, root, shutdown_signal()).await?;

    log!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}
