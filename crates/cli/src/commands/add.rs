//! The add subcommand: track a URL, or a line-delimited batch from stdin.

use std::io::BufRead;

use clap::Args;

use driftwatch_core::{Error, StoreDb};
use driftwatch_monitor::fetch::url;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// URL to add
    #[arg(long)]
    pub url: Option<String>,

    /// Read URLs from stdin, line by line
    #[arg(long)]
    pub stdin: bool,

    /// Only store and compare headers, discarding the body
    #[arg(long)]
    pub headers_only: bool,
}

pub async fn run(args: AddArgs, store: &StoreDb) -> anyhow::Result<()> {
    if args.stdin {
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            let url = line.trim();
            if url.is_empty() {
                continue;
            }

            // a bad line skips only that line, not the batch
            if let Err(e) = add_one(store, url, args.headers_only).await {
                tracing::warn!("{e}");
            }
        }
        return Ok(());
    }

    let Some(url) = args.url.as_deref() else {
        anyhow::bail!("use --url or --stdin");
    };

    add_one(store, url, args.headers_only).await?;
    Ok(())
}

async fn add_one(store: &StoreDb, url_str: &str, headers_only: bool) -> Result<(), Error> {
    url::validate(url_str).map_err(|e| Error::InvalidUrl(format!("{url_str}: {e}")))?;
    store.add_endpoint(url_str, headers_only).await?;
    println!("+ {url_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_one() {
        let store = StoreDb::open_in_memory().await.unwrap();
        add_one(&store, "https://example.com", false).await.unwrap();

        let snapshot = store.snapshot("https://example.com").await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_add_one_rejects_invalid_url() {
        let store = StoreDb::open_in_memory().await.unwrap();
        let result = add_one(&store, "not a url", false).await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        assert!(store.list_endpoints().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_requires_url_or_stdin() {
        let store = StoreDb::open_in_memory().await.unwrap();
        let args = AddArgs { url: None, stdin: false, headers_only: false };
        assert!(run(args, &store).await.is_err());
    }
}
