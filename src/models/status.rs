//! Database status model returned by the `database_status` tool.

use crate::error::SETUP_HINT;
use serde::Serialize;

/// Readiness of the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// The database file does not exist
    Missing,
    /// The file exists but has no gold_price table
    Invalid,
    /// The table exists and could be counted
    Ready,
    /// The table exists but counting it failed
    Error,
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Invalid => write!(f, "invalid"),
            Self::Ready => write!(f, "ready"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub status: StatusKind,
    pub message: String,
    pub database_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_instructions: Option<String>,
}

impl DatabaseStatus {
    pub fn missing(database_path: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Missing,
            message: "Database file does not exist".to_string(),
            database_path: database_path.into(),
            record_count: None,
            setup_instructions: Some(SETUP_HINT.to_string()),
        }
    }

    pub fn invalid(database_path: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Invalid,
            message: "Database exists but gold_price table is missing".to_string(),
            database_path: database_path.into(),
            record_count: None,
            setup_instructions: Some(SETUP_HINT.to_string()),
        }
    }

    pub fn ready(database_path: impl Into<String>, record_count: i64) -> Self {
        Self {
            status: StatusKind::Ready,
            message: format!("Database is ready with {} records", record_count),
            database_path: database_path.into(),
            record_count: Some(record_count),
            setup_instructions: None,
        }
    }

    pub fn error(database_path: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self {
            status: StatusKind::Error,
            message: format!("Database error: {}", detail),
            database_path: database_path.into(),
            record_count: None,
            setup_instructions: None,
        }
    }
}
