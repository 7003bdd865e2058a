//! The list subcommand: every record with its snapshot size and flags.

use driftwatch_core::StoreDb;

pub async fn run(store: &StoreDb) -> anyhow::Result<()> {
    for endpoint in store.list_endpoints().await? {
        let mode = if endpoint.headers_only { ", HEADERS_ONLY" } else { "" };
        println!("{}, {}B{}", endpoint.url, endpoint.snapshot.len(), mode);
    }
    Ok(())
}
