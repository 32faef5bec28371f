//! Query execution on a scoped connection.
//!
//! The executor knows nothing about validation: callers decide what may run.
//! It fetches every row the statement produces (no limit, no timeout) and
//! hands back plain JSON maps.

use crate::db::store::GoldPriceDb;
use crate::db::types::RowToJson;
use crate::error::DbResult;
use crate::models::Row;
use sqlx::Executor;
use sqlx::sqlite::SqliteConnection;
use std::time::Instant;
use tracing::debug;

/// Run `sql` verbatim on `conn` and convert every row.
pub async fn fetch_rows(conn: &mut SqliteConnection, sql: &str) -> DbResult<Vec<Row>> {
    let rows = conn.fetch_all(sql).await?;
    Ok(rows.iter().map(RowToJson::to_json_map).collect())
}

/// Query executor that opens one connection per query.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    db: GoldPriceDb,
}

impl QueryExecutor {
    pub fn new(db: GoldPriceDb) -> Self {
        Self { db }
    }

    /// Execute a statement and return all rows.
    pub async fn execute_query(&self, sql: &str) -> DbResult<Vec<Row>> {
        let start = Instant::now();
        let owned_sql = sql.to_owned();

        let rows = self
            .db
            .with_connection(move |conn| {
                Box::pin(async move { fetch_rows(conn, &owned_sql).await })
            })
            .await?;

        debug!(
            row_count = rows.len(),
            execution_time_ms = start.elapsed().as_millis() as u64,
            "Query executed"
        );

        Ok(rows)
    }
}
