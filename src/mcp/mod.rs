//! MCP server integration module.
//!
//! This module wires the gold price tool handlers into the MCP protocol
//! using the rmcp framework.

pub mod service;

pub use service::{GoldPriceService, TOOL_NAMES};
