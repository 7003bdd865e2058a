//! Unified error types for driftwatch.
//!
//! Only `StoreOpen` is process-fatal; every other variant is contained
//! within the operation or endpoint that produced it.

use tokio_rusqlite::rusqlite;

/// Unified error types for driftwatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The snapshot store could not be opened. Aborts the process.
    #[error("failed to open snapshot store: {0}")]
    StoreOpen(String),

    /// No record exists for the given URL.
    #[error("not found: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("store error: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("store error: migration failed: {0}")]
    MigrationFailed(String),

    /// URL rejected before it reached the store.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Network, TLS, or timeout failure while retrieving an endpoint.
    /// Skips that endpoint for the current run.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Snapshot write failed. The rendered diff was already shown.
    #[error("persist failed: {0}")]
    Persist(String),

    /// Writing a diff output file failed.
    #[error("render failed: {0}")]
    Render(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound("https://example.com".to_string());
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("https://example.com"));
    }

    #[test]
    fn test_fetch_display() {
        let err = Error::Fetch("connection refused".to_string());
        assert!(err.to_string().contains("fetch failed"));
    }
}
