//! Command-line surface.
//!
//! One module per subcommand; each is thin glue over the store and the
//! monitor engine.

pub mod add;
pub mod delete;
pub mod get;
pub mod list;
pub mod monitor;

use clap::{Parser, Subcommand};

use driftwatch_core::{AppConfig, StoreDb};

/// Track HTTP endpoints and diff them when they change.
#[derive(Debug, Parser)]
#[command(name = "driftwatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add an endpoint to the watch list
    #[command(visible_alias = "a")]
    Add(add::AddArgs),

    /// Delete a tracked endpoint
    #[command(visible_alias = "d")]
    Delete(delete::DeleteArgs),

    /// Print an endpoint's stored snapshot
    #[command(visible_alias = "g")]
    Get(get::GetArgs),

    /// List all tracked endpoints and their snapshot sizes
    #[command(visible_alias = "l")]
    List,

    /// Fetch every tracked endpoint and diff it against its snapshot
    #[command(visible_alias = "m")]
    Monitor(monitor::MonitorArgs),
}

/// Route a parsed command to its implementation.
pub async fn dispatch(cli: Cli, config: &AppConfig, store: &StoreDb) -> anyhow::Result<()> {
    match cli.command {
        Command::Add(args) => add::run(args, store).await,
        Command::Delete(args) => delete::run(args, store).await,
        Command::Get(args) => get::run(args, store).await,
        Command::List => list::run(store).await,
        Command::Monitor(args) => monitor::run(args, config, store).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_monitor_flags() {
        let cli = Cli::parse_from(["driftwatch", "monitor", "--save", "--workers", "8", "--html"]);
        match cli.command {
            Command::Monitor(args) => {
                assert!(args.save);
                assert_eq!(args.workers, Some(8));
                assert!(args.html);
                assert!(!args.no_reformat);
                assert!(args.out_dir.is_none());
            }
            _ => panic!("expected monitor"),
        }
    }

    #[test]
    fn test_add_alias() {
        let cli = Cli::parse_from(["driftwatch", "a", "--url", "https://example.com", "--headers-only"]);
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.url.as_deref(), Some("https://example.com"));
                assert!(args.headers_only);
                assert!(!args.stdin);
            }
            _ => panic!("expected add"),
        }
    }
}
