//! The get subcommand: print an endpoint's stored snapshot.

use clap::Args;

use driftwatch_core::{Error, StoreDb};

#[derive(Debug, Args)]
pub struct GetArgs {
    /// URL to get from the store
    #[arg(long)]
    pub url: String,
}

pub async fn run(args: GetArgs, store: &StoreDb) -> anyhow::Result<()> {
    match store.snapshot(&args.url).await {
        Ok(snapshot) if snapshot.is_empty() => println!("<empty>"),
        Ok(snapshot) => println!("{}", String::from_utf8_lossy(&snapshot)),
        Err(Error::NotFound(url)) => println!("not found: {url}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_is_not_an_error() {
        let store = StoreDb::open_in_memory().await.unwrap();
        let args = GetArgs { url: "https://example.com".to_string() };
        assert!(run(args, &store).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_after_add() {
        let store = StoreDb::open_in_memory().await.unwrap();
        store.add_endpoint("https://example.com", false).await.unwrap();

        let args = GetArgs { url: "https://example.com".to_string() };
        assert!(run(args, &store).await.is_ok());
    }
}
