//! SQLite-backed snapshot store for tracked endpoints.
//!
//! This module provides the durable mapping from endpoint URL to its mode
//! flags and last-observed normalized snapshot, using SQLite with async
//! access via tokio-rusqlite. It supports:
//!
//! - Upserts that preserve an existing snapshot on re-add
//! - Lexicographically ordered listing for the monitor pass
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//!
//! All writes funnel through one background connection thread, so concurrent
//! snapshot persistence from monitor units never interleaves within a record.

pub mod connection;
pub mod endpoints;
pub mod migrations;

pub use crate::Error;

pub use connection::StoreDb;
pub use endpoints::Endpoint;
