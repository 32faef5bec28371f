//! MCP tool implementations.
//!
//! This module contains all tool handlers:
//! - `query`: `run_query`, `sample_data`, `get_latest_price`, `get_price_range`
//! - `schema`: `get_table_info`
//! - `status`: `database_status`
//! - `sql_validator`: the allow-list deciding which queries may run

pub mod query;
pub mod schema;
pub mod sql_validator;
pub mod status;

pub use query::{PriceRangeInput, QueryToolHandler, RunQueryInput};
pub use schema::SchemaToolHandler;
pub use sql_validator::{is_safe, validate_query};
pub use status::StatusToolHandler;
