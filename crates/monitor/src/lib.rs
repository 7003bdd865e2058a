//! Monitor pipeline for driftwatch.
//!
//! This crate provides the fetch/normalize/compare/persist pipeline that
//! runs once per invocation over every tracked endpoint:
//!
//! - [`fetch`] — single-attempt HTTP retrieval with a fixed policy
//! - [`normalize`] — reduce a response to comparable, size-bounded bytes
//! - [`diff`] — unified diffs between normalized snapshots
//! - [`render`] — diff output to the console or timestamped files
//! - [`engine`] — the bounded-concurrency monitor pass itself

pub mod diff;
pub mod engine;
pub mod fetch;
pub mod normalize;
pub mod render;

pub use diff::{DiffFormat, RenderedDiff, diff_snapshots};
pub use engine::{MonitorOptions, PassSummary, run_pass};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, Fetcher};
pub use normalize::{RESPONSE_BODY_LIMIT, normalize};
pub use render::{Destination, render};
