//! Gold Price MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to read historical gold prices from a SQLite `gold_price` table. Every
//! query is read-only and restricted to that table.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::DbError;
pub use mcp::GoldPriceService;
