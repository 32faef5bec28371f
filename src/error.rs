//! Error types for the gold price MCP server.
//!
//! This module defines all error types using `thiserror` for ergonomic error handling.
//! None of these ever reach the MCP transport as protocol faults: at the tool
//! boundary every variant is folded into the JSON failure object returned to the
//! caller (see [`crate::models::QueryFailure`]).

use thiserror::Error;

/// Remediation shown whenever the backing store is absent or lacks the table.
pub const SETUP_HINT: &str = "Create the SQLite database with a 'gold_price' table \
    (including a 'date' column) at the configured path, or start the server with \
    --database pointing at an existing file.";

/// Fixed rejection message for queries refused by the SQL validator.
///
/// Deliberately generic: it never echoes the query or the rule that fired.
pub const UNSAFE_QUERY_MESSAGE: &str =
    "Only safe SELECT queries on the gold_price table are allowed.";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database not found or invalid. {}", SETUP_HINT)]
    DatabaseMissing {
        /// Resolved absolute path of the configured database file
        path: String,
    },

    #[error("{}", UNSAFE_QUERY_MESSAGE)]
    UnsafeQuery,

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("SQLite error: {message}")]
    Database { message: String },

    #[error("Unexpected error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a missing-database error for the given absolute path.
    pub fn database_missing(path: impl Into<String>) -> Self {
        Self::DatabaseMissing { path: path.into() }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a driver-level database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The database path attached to this error, if any.
    pub fn database_path(&self) -> Option<&str> {
        match self {
            Self::DatabaseMissing { path } => Some(path),
            _ => None,
        }
    }

    /// The bare detail text, without the category prefix used by `Display`.
    pub fn detail(&self) -> String {
        match self {
            Self::Database { message }
            | Self::Internal { message }
            | Self::InvalidInput { message } => message.clone(),
            _ => self.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// Anything the SQLite driver reports about the database, the file or the
/// statement is a `Database` error; decoding and runtime faults are internal.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::database(db_err.message()),
            sqlx::Error::Configuration(msg) => DbError::database(msg.to_string()),
            sqlx::Error::Io(io_err) => DbError::database(format!("I/O error: {}", io_err)),
            sqlx::Error::Protocol(msg) => DbError::database(msg),
            sqlx::Error::RowNotFound => DbError::database("No rows returned"),
            sqlx::Error::ColumnNotFound(col) => {
                DbError::database(format!("Column not found: {}", col))
            }
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => DbError::internal(format!(
                "Column index {} out of bounds (len: {})",
                index, len
            )),
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::internal(format!("Failed to decode column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => DbError::internal(format!("Decode error: {}", source)),
            sqlx::Error::WorkerCrashed => DbError::internal("Database worker crashed"),
            _ => DbError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
