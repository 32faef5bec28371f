//! Gold Price MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to query historical gold prices from a read-only SQLite database.

use gold_price_mcp::config::{Config, TransportMode};
use gold_price_mcp::db::GoldPriceDb;
use gold_price_mcp::error::SETUP_HINT;
use gold_price_mcp::mcp::TOOL_NAMES;
use gold_price_mcp::transport::{HttpTransport, StdioTransport, Transport};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs always go to stderr: with the stdio transport stdout is the protocol
/// channel.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

async fn run(config: &Config, db: GoldPriceDb) -> gold_price_mcp::error::DbResult<()> {
    match config.transport {
        TransportMode::Stdio => {
            info!("Using stdio transport");
            StdioTransport::new(db).run().await
        }
        TransportMode::Http => {
            info!(
                host = %config.http_host,
                port = config.http_port,
                endpoint = %config.mcp_endpoint,
                "Using HTTP transport"
            );
            HttpTransport::new(
                db,
                &config.http_host,
                config.http_port,
                &config.mcp_endpoint,
            )
            .run()
            .await
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse_args();

    init_tracing(&config);

    config.validate()?;

    let db = GoldPriceDb::new(&config.database_path);

    info!(
        server = "gold-price-mcp",
        transport = %config.transport,
        "Starting Gold Price MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(path = %db.absolute_path(), "Database path");

    // Startup proceeds either way; tools report the problem per call.
    if db.exists().await {
        info!("Database is ready");
    } else {
        warn!(path = %db.absolute_path(), "Database is missing or has no gold_price table");
        warn!("{}", SETUP_HINT);
    }

    info!(tools = %TOOL_NAMES.join(", "), "Available tools");

    if let Err(e) = run(&config, db).await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
