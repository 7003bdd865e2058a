//! The monitor subcommand: one pass over every tracked endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use driftwatch_core::{AppConfig, StoreDb};
use driftwatch_monitor::{DiffFormat, FetchClient, FetchConfig, MonitorOptions, run_pass};

#[derive(Debug, Args)]
pub struct MonitorArgs {
    /// Persist new snapshots to the store
    #[arg(long)]
    pub save: bool,

    /// Write diffs into this directory instead of the console
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Concurrent fetch workers (defaults to the configured value)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Disable script reformatting before diffing
    #[arg(long)]
    pub no_reformat: bool,

    /// Render diffs as HTML instead of plain text
    #[arg(long)]
    pub html: bool,
}

pub async fn run(args: MonitorArgs, config: &AppConfig, store: &StoreDb) -> anyhow::Result<()> {
    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let fetcher = Arc::new(FetchClient::new(FetchConfig {
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
        body_limit: config.body_limit,
    })?);

    let options = MonitorOptions {
        save: args.save,
        out_dir: args.out_dir,
        workers: args.workers.unwrap_or(config.workers),
        reformat_scripts: !args.no_reformat,
        format: if args.html { DiffFormat::Html } else { DiffFormat::Text },
    };

    let summary = run_pass(store, fetcher, &options).await?;

    tracing::info!(
        total = summary.total,
        changed = summary.changed,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "monitor pass complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_monitor_empty_store() {
        let store = StoreDb::open_in_memory().await.unwrap();
        let config = AppConfig::default();
        let args = MonitorArgs { save: false, out_dir: None, workers: Some(2), no_reformat: false, html: false };

        assert!(run(args, &config, &store).await.is_ok());
    }
}
