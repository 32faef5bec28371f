//! Database access layer.
//!
//! This module provides database access functionality:
//! - Location of the SQLite file, existence check, scoped connections
//! - Query execution
//! - Schema introspection
//! - Row to JSON type mappings

pub mod executor;
pub mod schema;
pub mod store;
pub mod types;

pub use executor::QueryExecutor;
pub use schema::SchemaInspector;
pub use store::{GOLD_PRICE_TABLE, GoldPriceDb};
