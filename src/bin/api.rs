//! Party Board API Server
//!
//! Reference backend over an in-memory store, seeded with the four
//! default categories.
//!
//! Run with: cargo run --bin party-board-api
//!
//! # Configuration
//!
//! Read from the standard config locations (`[server]` and `[logging]`),
//! then overridden by:
//! - `PARTY_BOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `PARTY_BOARD_PORT`: Port to listen on (default: 8080)
//! - `RUST_LOG`: Log filter (default: from `[logging] level`)

use clap::Parser;
use std::path::PathBuf;

use party_board::api::{serve, AppState};
use party_board::{logging, Config};

#[derive(Parser)]
#[command(name = "party-board-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reference REST backend for the party board")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Dishes allowed per category
    #[arg(long)]
    capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(capacity) = args.capacity {
        config.server.default_capacity = capacity;
    }
    logging::init(&config.logging);

    tracing::info!("Starting party board API v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Seeding default categories with capacity {}",
        config.server.default_capacity
    );

    let state = AppState::seeded(config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("Party board API stopped");
    Ok(())
}
