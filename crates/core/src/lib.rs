//! Core types and shared functionality for driftwatch.
//!
//! This crate provides:
//! - The endpoint snapshot store with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use store::{Endpoint, StoreDb};
