//! driftwatch entry point.
//!
//! Opens the snapshot store, then dispatches to the subcommand. A store
//! that fails to open aborts the process; everything past that point logs
//! per-endpoint failures to stderr without changing the exit status.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

use driftwatch_core::{AppConfig, StoreDb};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = commands::Cli::parse();

    let config = AppConfig::load()?;
    let store = StoreDb::open(&config.db_path).await?;

    commands::dispatch(cli, &config, &store).await?;

    store.close().await?;

    Ok(())
}
