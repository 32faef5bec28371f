//! Data models for the gold price MCP server.
//!
//! This module re-exports all model types used throughout the application.

pub mod query;
pub mod schema;
pub mod status;

// Re-export commonly used types
pub use query::{Outcome, QueryFailure, QueryResult, QueryRows, Row};
pub use schema::{ColumnDescriptor, TableInfo};
pub use status::{DatabaseStatus, StatusKind};
