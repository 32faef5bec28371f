//! Query-related data models.
//!
//! This module defines the tagged outcome every tool returns. On the wire a
//! success is `{"success": true, ...payload}` and a failure is
//! `{"error": "...", "database_path"?: "..."}`.

use crate::error::DbError;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A single result row, keyed by column name in SELECT order.
pub type Row = serde_json::Map<String, JsonValue>;

/// Tagged outcome of a tool operation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Success(T),
    Failure(QueryFailure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success payload, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&QueryFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

impl<T> From<DbError> for Outcome<T> {
    fn from(err: DbError) -> Self {
        Self::Failure(err.into())
    }
}

impl<T> From<Result<T, DbError>> for Outcome<T> {
    fn from(result: Result<T, DbError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => err.into(),
        }
    }
}

/// Result of running a SELECT through the executor.
pub type QueryResult = Outcome<QueryRows>;

/// Rows returned by a successful query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRows {
    /// Always true; lets callers tell success from failure without schema knowledge
    pub success: bool,
    /// Result rows as column-name to value maps
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
    /// Number of rows returned
    pub row_count: usize,
    /// The query exactly as supplied by the caller
    pub query: String,
}

impl QueryRows {
    pub fn new(rows: Vec<Row>, query: impl Into<String>) -> Self {
        Self {
            success: true,
            row_count: rows.len(),
            rows,
            query: query.into(),
        }
    }
}

/// Failure body shared by every tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryFailure {
    pub error: String,
    /// Only present when the database is missing or invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
}

impl QueryFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            database_path: None,
        }
    }
}

impl From<DbError> for QueryFailure {
    fn from(err: DbError) -> Self {
        Self {
            error: err.to_string(),
            database_path: err.database_path().map(String::from),
        }
    }
}
