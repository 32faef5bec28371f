//! Location of the gold_price database and scoped connection handling.
//!
//! There is no pool: every operation opens its own read-only connection and
//! closes it before returning, so the server never holds the file open
//! between tool calls.

use crate::error::{DbError, DbResult};
use futures_util::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the only table the server will read.
pub const GOLD_PRICE_TABLE: &str = "gold_price";

const TABLE_LOOKUP: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'gold_price'";

/// Handle on the configured SQLite file.
///
/// Cheap to clone; holds only the path.
#[derive(Debug, Clone)]
pub struct GoldPriceDb {
    path: PathBuf,
}

impl GoldPriceDb {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path as configured.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute form of the configured path, for messages shown to callers.
    pub fn absolute_path(&self) -> String {
        std::path::absolute(&self.path)
            .unwrap_or_else(|_| self.path.clone())
            .display()
            .to_string()
    }

    /// Whether anything exists at the configured path.
    ///
    /// A directory or a non-SQLite file counts; [`exists`](Self::exists)
    /// rejects those when the connection probe fails.
    pub fn path_exists(&self) -> bool {
        self.path.exists()
    }

    /// Check that the file exists and contains exactly one `gold_price` table.
    ///
    /// Any driver error while probing counts as "does not exist".
    pub async fn exists(&self) -> bool {
        if !self.path_exists() {
            debug!(path = %self.path.display(), "Database file not found");
            return false;
        }

        let lookup = self
            .with_connection(|conn| {
                Box::pin(async move {
                    let names = sqlx::query_scalar::<_, String>(TABLE_LOOKUP)
                        .fetch_all(&mut *conn)
                        .await?;
                    Ok::<_, DbError>(names)
                })
            })
            .await;

        match lookup {
            Ok(names) => names.len() == 1,
            Err(e) => {
                debug!(error = %e, "Table lookup failed");
                false
            }
        }
    }

    /// Return the missing-database error unless [`exists`](Self::exists) passes.
    pub async fn ensure_ready(&self) -> DbResult<()> {
        if self.exists().await {
            Ok(())
        } else {
            Err(DbError::database_missing(self.absolute_path()))
        }
    }

    /// Run `op` on a freshly opened connection, closing it afterwards.
    ///
    /// The connection is closed whether `op` succeeds or fails. If `op`
    /// panics the connection is dropped during unwinding, which also closes it.
    pub async fn with_connection<T, F>(&self, op: F) -> DbResult<T>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, DbResult<T>>,
    {
        let mut conn = self.connect().await?;
        let result = op(&mut conn).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close database connection");
        }

        result
    }

    async fn connect(&self) -> DbResult<SqliteConnection> {
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .create_if_missing(false);

        options.connect().await.map_err(DbError::from)
    }
}
