//! Travelog client binary.
//!
//! Composition root that assembles the file-backed slot store, the two
//! collection stores (cities and markers), and the terminal commands that
//! drive them. Stores are built here and handed to commands explicitly;
//! nothing reaches for globals.

mod catalog;
mod commands;
mod config;
mod dirs;
mod logging;

use anyhow::Result;
use clap::Parser;

use commands::{App, CityCommand, MarkerCommand, Reset};
use config::ClientConfig;

/// Record visited cities and map markers in a local travel log.
#[derive(Parser)]
#[command(name = "travelog")]
#[command(about = "Local travel log of visited cities and map markers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Manage visited cities
    #[command(subcommand)]
    City(CityCommand),

    /// Manage map markers
    #[command(subcommand)]
    Marker(MarkerCommand),

    /// Remove every stored collection
    Reset(Reset),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for TRAVELOG_DATA_DIR and other env vars)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    let _log_guard = logging::init(&config)?;

    tracing::debug!("starting travelog client");

    let app = App::open(&config).await?;

    match cli.command {
        Command::City(cmd) => cmd.execute(app).await,
        Command::Marker(cmd) => cmd.execute(app).await,
        Command::Reset(cmd) => cmd.execute(app).await,
    }
}
