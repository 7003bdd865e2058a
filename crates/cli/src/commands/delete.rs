//! The delete subcommand.

use clap::Args;

use driftwatch_core::StoreDb;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// URL to delete
    #[arg(long)]
    pub url: String,
}

pub async fn run(args: DeleteArgs, store: &StoreDb) -> anyhow::Result<()> {
    if store.delete_endpoint(&args.url).await? {
        println!("- {}", args.url);
    } else {
        println!("not found: {}", args.url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_existing() {
        let store = StoreDb::open_in_memory().await.unwrap();
        store.add_endpoint("https://example.com", false).await.unwrap();

        let args = DeleteArgs { url: "https://example.com".to_string() };
        run(args, &store).await.unwrap();

        assert!(store.list_endpoints().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let store = StoreDb::open_in_memory().await.unwrap();
        let args = DeleteArgs { url: "https://example.com".to_string() };
        assert!(run(args, &store).await.is_ok());
    }
}
