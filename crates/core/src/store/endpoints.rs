//! Endpoint record CRUD operations.
//!
//! An endpoint row carries the tracked URL, its mode flags, and the
//! normalized snapshot from the last successfully compared response.

use super::connection::StoreDb;
use crate::Error;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A tracked endpoint with its last-observed snapshot.
///
/// The URL is the identifier: unique, case- and scheme-sensitive, stored
/// exactly as supplied by the caller. A freshly added endpoint has an
/// empty snapshot until the first `monitor --save` pass replaces it.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: String,
    pub headers_only: bool,
    pub snapshot: Vec<u8>,
}

impl StoreDb {
    /// Add an endpoint to the watch list.
    ///
    /// Uses UPSERT semantics: re-adding an existing URL overwrites its mode
    /// flags but leaves the stored snapshot untouched.
    pub async fn add_endpoint(&self, url: &str, headers_only: bool) -> Result<(), Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO endpoints (url, headers_only) VALUES (?1, ?2)
                     ON CONFLICT(url) DO UPDATE SET headers_only = excluded.headers_only",
                    params![url, headers_only as i32],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Remove an endpoint.
    ///
    /// Returns false when no record existed, so the caller can report
    /// "not found" distinctly from a successful delete.
    pub async fn delete_endpoint(&self, url: &str) -> Result<bool, Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let deleted = conn.execute("DELETE FROM endpoints WHERE url = ?1", params![url])?;
                Ok(deleted > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Get the stored snapshot for an endpoint.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when the URL is not tracked.
    pub async fn snapshot(&self, url: &str) -> Result<Vec<u8>, Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<u8>, Error> {
                let result = conn.query_row(
                    "SELECT snapshot FROM endpoints WHERE url = ?1",
                    params![&url],
                    |row| row.get(0),
                );

                match result {
                    Ok(snapshot) => Ok(snapshot),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Err(Error::NotFound(url)),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// List every tracked endpoint in lexicographic URL order.
    ///
    /// The monitor pass calls this once up front, so the full record set is
    /// materialized before any snapshot write happens. No iterator is ever
    /// open while the store is mutated.
    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<Endpoint>, Error> {
                let mut stmt =
                    conn.prepare("SELECT url, headers_only, snapshot FROM endpoints ORDER BY url ASC")?;

                let rows = stmt.query_map([], |row| {
                    Ok(Endpoint {
                        url: row.get(0)?,
                        headers_only: row.get::<_, i32>(1)? != 0,
                        snapshot: row.get(2)?,
                    })
                })?;

                let mut endpoints = Vec::new();
                for row in rows {
                    endpoints.push(row?);
                }
                Ok(endpoints)
            })
            .await
            .map_err(Error::from)
    }

    /// Replace an endpoint's snapshot, preserving its mode flags.
    ///
    /// The write is a single atomic statement. A no-op if the record was
    /// deleted since the pass started.
    pub async fn update_snapshot(&self, url: &str, snapshot: Vec<u8>) -> Result<(), Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "UPDATE endpoints SET snapshot = ?2 WHERE url = ?1",
                    params![url, snapshot],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}
