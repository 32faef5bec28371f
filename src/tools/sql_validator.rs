//! SQL statement validation for the gold_price table.
//!
//! This is an allow-list of substring checks, not a parser. A query passes
//! only if, after trimming and lower-casing:
//! - it starts with `select`
//! - it mentions `gold_price`
//! - no semicolon remains once trailing semicolons and whitespace are stripped
//! - none of [`FORBIDDEN_KEYWORDS`] occurs anywhere, even inside literals or
//!   comments
//!
//! Accepted queries run verbatim; nothing is rewritten or parameterized.
//! Substring matching means identifiers such as `created_at` or `updated`
//! are rejected too.

use crate::error::{DbError, DbResult};
use thiserror::Error;
use tracing::debug;

/// Keywords that reject a query wherever they appear.
pub const FORBIDDEN_KEYWORDS: &[&str] = &[
    "insert", "update", "delete", "drop", "alter", "create", "truncate", "replace", "pragma",
    "attach", "detach",
];

/// Why a query was rejected. Only ever logged, never returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("empty query")]
    Empty,
    #[error("query does not start with SELECT")]
    NotSelect,
    #[error("query does not reference gold_price")]
    MissingTable,
    #[error("multiple statements")]
    StackedStatements,
    #[error("forbidden keyword '{0}'")]
    ForbiddenKeyword(&'static str),
}

/// Run every check in order and report the first one that fails.
pub fn check_query(sql: &str) -> Result<(), Rejection> {
    let normalized = sql.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(Rejection::Empty);
    }

    if !normalized.starts_with("select") {
        return Err(Rejection::NotSelect);
    }

    if !normalized.contains("gold_price") {
        return Err(Rejection::MissingTable);
    }

    // A trailing terminator is fine; any other semicolon means a second statement.
    let body = normalized.trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    if body.contains(';') {
        return Err(Rejection::StackedStatements);
    }

    if let Some(keyword) = FORBIDDEN_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| normalized.contains(keyword))
    {
        return Err(Rejection::ForbiddenKeyword(keyword));
    }

    Ok(())
}

/// Whether `sql` may be executed.
pub fn is_safe(sql: &str) -> bool {
    check_query(sql).is_ok()
}

/// Validate `sql`, mapping any rejection to the fixed [`DbError::UnsafeQuery`].
pub fn validate_query(sql: &str) -> DbResult<()> {
    check_query(sql).map_err(|reason| {
        debug!(reason = %reason, "Query rejected");
        DbError::UnsafeQuery
    })
}
