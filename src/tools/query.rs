//! Query tools.
//!
//! This module implements `run_query` and the canned recent-data tools
//! (`sample_data`, `get_latest_price`, `get_price_range`). Every one of them
//! goes through [`QueryToolHandler::execute`], which checks the database,
//! validates the SQL and only then runs it.

use crate::db::{GoldPriceDb, QueryExecutor};
use crate::error::{DbError, DbResult};
use crate::models::{QueryResult, QueryRows};
use crate::tools::sql_validator;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

/// Number of rows returned by `sample_data`.
pub const SAMPLE_SIZE: u32 = 5;

/// Default window for `get_price_range`.
pub const DEFAULT_RANGE_DAYS: i64 = 7;

/// Inclusive bounds for `get_price_range`.
pub const MIN_RANGE_DAYS: i64 = 1;
pub const MAX_RANGE_DAYS: i64 = 365;

fn default_days() -> i64 {
    DEFAULT_RANGE_DAYS
}

/// Input for the run_query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunQueryInput {
    /// A SELECT query referencing the 'gold_price' table. Write operations,
    /// PRAGMA and multiple statements are rejected.
    pub sql: String,
}

/// Input for the get_price_range tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PriceRangeInput {
    /// Number of most recent entries to return (1-365). Default: 7
    #[serde(default = "default_days")]
    pub days: i64,
}

impl Default for PriceRangeInput {
    fn default() -> Self {
        Self {
            days: DEFAULT_RANGE_DAYS,
        }
    }
}

/// Most recent rows first, capped at `limit`.
fn recent_rows_sql(limit: i64) -> String {
    format!("SELECT * FROM gold_price ORDER BY date DESC LIMIT {}", limit)
}

/// Handler for query execution.
pub struct QueryToolHandler {
    db: GoldPriceDb,
    executor: QueryExecutor,
}

impl QueryToolHandler {
    /// Create a new query tool handler.
    pub fn new(db: GoldPriceDb) -> Self {
        Self {
            executor: QueryExecutor::new(db.clone()),
            db,
        }
    }

    /// Check the database, validate `sql`, then run it verbatim.
    ///
    /// Every failure, from a missing file to a driver error, comes back as
    /// the failure variant; nothing is raised.
    pub async fn execute(&self, sql: &str) -> QueryResult {
        self.try_execute(sql).await.into()
    }

    async fn try_execute(&self, sql: &str) -> DbResult<QueryRows> {
        self.db.ensure_ready().await?;
        sql_validator::validate_query(sql)?;

        let rows = self.executor.execute_query(sql).await?;

        info!(row_count = rows.len(), "Query executed");

        Ok(QueryRows::new(rows, sql))
    }

    /// Handle the run_query tool call.
    pub async fn run_query(&self, input: RunQueryInput) -> QueryResult {
        self.execute(&input.sql).await
    }

    /// The five most recent entries.
    pub async fn sample_data(&self) -> QueryResult {
        self.execute(&recent_rows_sql(SAMPLE_SIZE.into())).await
    }

    /// The single most recent entry.
    pub async fn get_latest_price(&self) -> QueryResult {
        self.execute(&recent_rows_sql(1)).await
    }

    /// The `days` most recent entries.
    ///
    /// `days` is range-checked before the database is touched, which is what
    /// makes interpolating it into the SQL text acceptable.
    pub async fn get_price_range(&self, input: PriceRangeInput) -> QueryResult {
        if !(MIN_RANGE_DAYS..=MAX_RANGE_DAYS).contains(&input.days) {
            return DbError::invalid_input(format!(
                "Days must be between {} and {}",
                MIN_RANGE_DAYS, MAX_RANGE_DAYS
            ))
            .into();
        }

        self.execute(&recent_rows_sql(input.days)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_query_input_deserialization() {
        let json = r#"{"sql": "SELECT * FROM gold_price"}"#;
        let input: RunQueryInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.sql, "SELECT * FROM gold_price");
    }

    #[test]
    fn test_price_range_input_defaults_to_seven() {
        let input: PriceRangeInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.days, 7);
        assert_eq!(PriceRangeInput::default().days, 7);
    }

    #[test]
    fn test_price_range_input_accepts_negative() {
        let input: PriceRangeInput = serde_json::from_str(r#"{"days": -3}"#).unwrap();
        assert_eq!(input.days, -3);
    }

    #[test]
    fn test_recent_rows_sql_passes_validator() {
        for limit in [1, 5, 7, 365] {
            let sql = recent_rows_sql(limit);
            assert!(sql_validator::is_safe(&sql), "{} should be safe", sql);
            assert!(sql.ends_with(&format!("LIMIT {}", limit)));
        }
    }

    #[tokio::test]
    async fn test_price_range_rejects_out_of_range_without_database() {
        let dir = tempfile::tempdir().unwrap();
        let handler = QueryToolHandler::new(GoldPriceDb::new(dir.path().join("absent.db")));

        for days in [0, -1, 366, i64::MAX] {
            let result = handler.get_price_range(PriceRangeInput { days }).await;
            let failure = result.failure().expect("out of range days should fail");
            assert_eq!(failure.error, "Days must be between 1 and 365");
            assert!(failure.database_path.is_none());
        }
    }

    #[tokio::test]
    async fn test_execute_reports_missing_database_first() {
        let dir = tempfile::tempdir().unwrap();
        let db = GoldPriceDb::new(dir.path().join("absent.db"));
        let handler = QueryToolHandler::new(db.clone());

        // Even an unsafe query reports the missing database, not the rejection.
        let result = handler.execute("DROP TABLE gold_price").await;
        let failure = result.failure().unwrap();
        assert!(failure.error.starts_with("Database not found or invalid."));
        assert_eq!(failure.database_path, Some(db.absolute_path()));
    }
}
