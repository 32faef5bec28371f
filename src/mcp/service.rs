//! MCP service implementation using rmcp.
//!
//! This module defines the GoldPriceService struct with all gold price tools
//! exposed via the MCP protocol using the rmcp framework's macros.
//!
//! Tools never return protocol errors for database or validation problems:
//! those come back as a JSON body with an `error` field. A panic inside a tool
//! is caught here and reported the same way.

use crate::db::GoldPriceDb;
use crate::error::DbError;
use crate::models::{DatabaseStatus, Outcome, QueryResult, TableInfo};
use crate::tools::query::{PriceRangeInput, QueryToolHandler, RunQueryInput};
use crate::tools::schema::SchemaToolHandler;
use crate::tools::status::StatusToolHandler;
use futures_util::FutureExt;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Names of all tools, in registration order.
pub const TOOL_NAMES: &[&str] = &[
    "run_query",
    "get_table_info",
    "sample_data",
    "get_latest_price",
    "get_price_range",
    "database_status",
];

/// Serialize a tool result as pretty-printed JSON text.
pub fn to_json_text<T: Serialize>(data: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(data).map_err(|e| McpError::internal_error(e.to_string(), None))
}

fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = to_json_text(data)?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Await `fut`, turning a panic into an internal error.
async fn catch_unexpected<T>(tool: &'static str, fut: impl Future<Output = T>) -> Result<T, DbError> {
    AssertUnwindSafe(fut).catch_unwind().await.map_err(|panic| {
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "tool panicked".to_string());
        error!(tool = tool, error = %message, "Tool panicked");
        DbError::internal(message)
    })
}

#[derive(Clone)]
pub struct GoldPriceService {
    /// The configured database file
    db: GoldPriceDb,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl GoldPriceService {
    /// Create a new GoldPriceService instance for the given database.
    pub fn new(db: GoldPriceDb) -> Self {
        Self {
            db,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl GoldPriceService {
    #[tool(
        description = "Run a SELECT SQL query on the gold_price table.\nOnly single SELECT statements that reference gold_price are accepted; write operations, PRAGMA and multiple statements are rejected.\nReturns rows as objects keyed by column name, with row_count and the query echoed back."
    )]
    async fn run_query(
        &self,
        Parameters(input): Parameters<RunQueryInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.db.clone());
        let result: QueryResult = catch_unexpected("run_query", handler.run_query(input))
            .await
            .unwrap_or_else(Outcome::from);
        json_success(&result)
    }

    #[tool(
        description = "Get information about the gold_price table structure.\nReturns column names, declared types, NOT NULL flags, defaults, primary key flags and the row count."
    )]
    async fn get_table_info(&self) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.db.clone());
        let result: Outcome<TableInfo> =
            catch_unexpected("get_table_info", handler.get_table_info())
                .await
                .unwrap_or_else(Outcome::from);
        json_success(&result)
    }

    #[tool(description = "Get a sample of the gold_price table: the 5 most recent rows by date.")]
    async fn sample_data(&self) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.db.clone());
        let result: QueryResult = catch_unexpected("sample_data", handler.sample_data())
            .await
            .unwrap_or_else(Outcome::from);
        json_success(&result)
    }

    #[tool(description = "Get the most recent gold price entry.")]
    async fn get_latest_price(&self) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.db.clone());
        let result: QueryResult = catch_unexpected("get_latest_price", handler.get_latest_price())
            .await
            .unwrap_or_else(Outcome::from);
        json_success(&result)
    }

    #[tool(
        description = "Get gold prices for the last N days (the N most recent entries, newest first).\ndays must be between 1 and 365. Default: 7"
    )]
    async fn get_price_range(
        &self,
        Parameters(input): Parameters<PriceRangeInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.db.clone());
        let result: QueryResult = catch_unexpected("get_price_range", handler.get_price_range(input))
            .await
            .unwrap_or_else(Outcome::from);
        json_success(&result)
    }

    #[tool(
        description = "Check the status of the database and provide setup instructions if needed.\nstatus is one of: missing, invalid, ready, error."
    )]
    async fn database_status(&self) -> Result<CallToolResult, McpError> {
        let handler = StatusToolHandler::new(self.db.clone());
        let status = catch_unexpected("database_status", handler.database_status())
            .await
            .unwrap_or_else(|e| DatabaseStatus::error(self.db.absolute_path(), e.detail()));
        json_success(&status)
    }
}

#[tool_handler]
impl ServerHandler for GoldPriceService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gold-price-mcp".to_owned(),
                title: Some("Gold Price MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only access to historical gold prices stored in a SQLite table named gold_price.\n\
                \n\
                ## Workflow\n\
                1. Call `database_status` to confirm the database is ready\n\
                2. Call `get_table_info` to see the available columns\n\
                3. Use `sample_data`, `get_latest_price` or `get_price_range` for common lookups\n\
                4. Use `run_query` for anything else\n\
                \n\
                ## run_query rules\n\
                - The query must start with SELECT and reference gold_price\n\
                - One statement only; a single trailing semicolon is fine\n\
                - The words insert, update, delete, drop, alter, create, truncate, replace,\n\
                  pragma, attach and detach may not appear anywhere in the query, including\n\
                  column names, string literals and comments\n\
                \n\
                ## Errors\n\
                Failures are returned as a JSON object with an `error` field. When the\n\
                database is missing, `database_path` shows where the server is looking."
                    .to_string(),
            ),
        }
    }
}
