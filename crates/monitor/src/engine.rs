//! The monitor pass: bounded-concurrency fetch/normalize/compare/persist.
//!
//! A pass reads the full endpoint list up front, then dispatches one unit
//! of work per endpoint through a counting semaphore into a JoinSet. The
//! read phase and the per-unit snapshot writes run as independent store
//! calls, so no iteration is ever open while the store is mutated.
//!
//! Per-endpoint failures are logged and counted, never propagated: a run
//! where every fetch fails still returns Ok.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::diff::{DiffFormat, diff_snapshots};
use crate::fetch::Fetcher;
use crate::normalize::normalize;
use crate::render::{Destination, render};
use driftwatch_core::{Endpoint, Error, StoreDb};

/// Options for a single monitor pass.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Persist new snapshots back to the store.
    pub save: bool,

    /// Write diffs into this directory instead of the console.
    pub out_dir: Option<PathBuf>,

    /// Maximum concurrent in-flight units (default: 20).
    pub workers: usize,

    /// Reformat script bodies before diffing (default: on).
    pub reformat_scripts: bool,

    /// Diff rendering format (default: plain text).
    pub format: DiffFormat,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self { save: false, out_dir: None, workers: 20, reformat_scripts: true, format: DiffFormat::Text }
    }
}

/// Aggregate outcome of a monitor pass.
///
/// Overall run success is independent of individual endpoint failures;
/// the counts are for the operator, not for exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub total: u32,
    pub changed: u32,
    pub unchanged: u32,
    pub failed: u32,
}

/// Outcome of one endpoint's unit of work.
enum UnitOutcome {
    Unchanged,
    Changed,
    Failed,
}

/// Run one monitor pass over every tracked endpoint.
///
/// The dispatch loop blocks only on acquiring a semaphore permit, never on
/// a unit's completion; the pass returns once every dispatched unit has
/// finished. Units complete and render output in arrival order, so console
/// output may interleave across endpoints.
pub async fn run_pass<F: Fetcher>(
    store: &StoreDb, fetcher: Arc<F>, options: &MonitorOptions,
) -> Result<PassSummary, Error> {
    // Read phase: materialize the record list before any write happens.
    let endpoints = store.list_endpoints().await?;

    let destination = match &options.out_dir {
        Some(dir) => Destination::Directory(dir.clone()),
        None => Destination::Console,
    };

    let semaphore = Arc::new(Semaphore::new(options.workers.max(1)));
    let mut join_set = JoinSet::new();

    for endpoint in endpoints {
        let permit = semaphore.clone().acquire_owned().await.unwrap();
        let store = store.clone();
        let fetcher = fetcher.clone();
        let options = options.clone();
        let destination = destination.clone();

        join_set.spawn(async move {
            // NOTE: Hold permit for task duration to enforce concurrency limit
            let _permit = permit;
            process_endpoint(&store, fetcher.as_ref(), endpoint, &options, &destination).await
        });
    }

    let mut summary = PassSummary::default();

    while let Some(result) = join_set.join_next().await {
        summary.total += 1;
        match result {
            Ok(UnitOutcome::Unchanged) => summary.unchanged += 1,
            Ok(UnitOutcome::Changed) => summary.changed += 1,
            Ok(UnitOutcome::Failed) => summary.failed += 1,
            Err(e) => {
                tracing::error!("monitor unit panicked: {e}");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Fetch one endpoint, compare against its stored snapshot, and render a
/// diff when it changed. Every error is handled here; the outcome only
/// feeds the pass summary.
async fn process_endpoint<F: Fetcher + ?Sized>(
    store: &StoreDb, fetcher: &F, endpoint: Endpoint, options: &MonitorOptions, destination: &Destination,
) -> UnitOutcome {
    let response = match fetcher.fetch(&endpoint.url).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(url = %endpoint.url, "{e}");
            return UnitOutcome::Failed;
        }
    };

    let new_snapshot = normalize(&response.status_line, &response.headers, &response.body, endpoint.headers_only);

    if new_snapshot == endpoint.snapshot {
        return UnitOutcome::Unchanged;
    }

    let reformat = options.reformat_scripts
        && response
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("javascript"));

    let diff = diff_snapshots(&endpoint.snapshot, &new_snapshot, reformat, options.format);

    if let Err(e) = render(&endpoint.url, &diff, destination) {
        tracing::error!(url = %endpoint.url, "{e}");
    }

    if options.save
        && let Err(e) = store.update_snapshot(&endpoint.url, new_snapshot).await
    {
        let e = Error::Persist(e.to_string());
        tracing::error!(url = %endpoint.url, "{e}");
    }

    UnitOutcome::Changed
}
