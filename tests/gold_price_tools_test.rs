//! End-to-end tests for the gold price tools against real SQLite files.

mod common;

use gold_price_mcp::models::StatusKind;
use gold_price_mcp::tools::query::{PriceRangeInput, QueryToolHandler, RunQueryInput};
use gold_price_mcp::tools::schema::SchemaToolHandler;
use gold_price_mcp::tools::status::StatusToolHandler;
use serde_json::json;

fn run_query(sql: &str) -> RunQueryInput {
    RunQueryInput {
        sql: sql.to_string(),
    }
}

// =============================================================================
// Missing or invalid database
// =============================================================================

#[tokio::test]
async fn test_every_query_tool_reports_missing_database() {
    let test_db = common::missing_db();
    let handler = QueryToolHandler::new(test_db.db.clone());
    let expected_path = test_db.db.absolute_path();

    let results = vec![
        handler.run_query(run_query("SELECT * FROM gold_price")).await,
        handler.sample_data().await,
        handler.get_latest_price().await,
        handler.get_price_range(PriceRangeInput::default()).await,
    ];

    for result in results {
        let failure = result.failure().expect("missing database should fail");
        assert!(failure.error.starts_with("Database not found or invalid."));
        assert!(failure.error.contains("gold_price"));
        assert_eq!(failure.database_path.as_deref(), Some(expected_path.as_str()));
    }

    let info = SchemaToolHandler::new(test_db.db.clone())
        .get_table_info()
        .await;
    assert_eq!(
        info.failure().unwrap().database_path.as_deref(),
        Some(expected_path.as_str())
    );

    // The server never creates the file.
    assert!(!test_db.path().exists());
}

#[tokio::test]
async fn test_database_without_table_counts_as_missing() {
    let test_db = common::create_db(&["CREATE TABLE prices (date TEXT, price REAL)"]).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler.sample_data().await;
    assert!(
        result
            .failure()
            .unwrap()
            .error
            .starts_with("Database not found or invalid.")
    );

    let status = StatusToolHandler::new(test_db.db.clone())
        .database_status()
        .await;
    assert_eq!(status.status, StatusKind::Invalid);
    assert!(status.setup_instructions.is_some());
    assert!(status.record_count.is_none());
}

#[tokio::test]
async fn test_non_database_file_counts_as_missing() {
    let test_db = common::missing_db();
    std::fs::write(test_db.path(), b"this is not a sqlite database").unwrap();

    assert!(!test_db.db.exists().await);

    let status = StatusToolHandler::new(test_db.db.clone())
        .database_status()
        .await;
    assert_eq!(status.status, StatusKind::Invalid);
}

// =============================================================================
// run_query
// =============================================================================

#[tokio::test]
async fn test_run_query_returns_rows_in_column_order() {
    let test_db = common::seeded_gold_price_db(3).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let sql = "SELECT price, date FROM gold_price ORDER BY date";
    let result = handler.run_query(run_query(sql)).await;
    let rows = result.success().expect("query should succeed");

    assert!(rows.success);
    assert_eq!(rows.row_count, 3);
    assert_eq!(rows.query, sql);

    let first = &rows.rows[0];
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["price", "date"]);
    assert_eq!(first["date"], json!("2024-01-01"));
    assert_eq!(first["price"], json!(2000.0));
}

#[tokio::test]
async fn test_run_query_wire_shape() {
    let test_db = common::seeded_gold_price_db(2).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let sql = "SELECT COUNT(*) AS n FROM gold_price;";
    let value = serde_json::to_value(handler.run_query(run_query(sql)).await).unwrap();

    assert_eq!(
        value,
        json!({
            "success": true,
            "data": [{"n": 2}],
            "row_count": 1,
            "query": sql,
        })
    );
}

#[tokio::test]
async fn test_run_query_maps_sqlite_values() {
    let test_db = common::create_db(&[
        common::GOLD_PRICE_SCHEMA,
        "INSERT INTO gold_price (id, date, price, currency, source) \
         VALUES (1, '2024-02-01', NULL, 'EUR', X'68656C6C6F')",
        "INSERT INTO gold_price (id, date, price, source) \
         VALUES (2, '2024-02-02', 1999.5, X'FF00')",
    ])
    .await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler
        .run_query(run_query("SELECT * FROM gold_price ORDER BY id"))
        .await;
    let rows = &result.success().unwrap().rows;

    assert_eq!(rows[0]["id"], json!(1));
    assert_eq!(rows[0]["price"], json!(null));
    assert_eq!(rows[0]["currency"], json!("EUR"));
    assert_eq!(rows[0]["source"], json!("hello"));

    assert_eq!(rows[1]["price"], json!(1999.5));
    assert_eq!(rows[1]["currency"], json!("USD"));
    // Not UTF-8, so base64.
    assert_eq!(rows[1]["source"], json!("/wA="));
}

#[tokio::test]
async fn test_run_query_rejects_unsafe_sql() {
    let test_db = common::seeded_gold_price_db(3).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    for sql in [
        "DELETE FROM gold_price",
        "SELECT * FROM gold_price; DROP TABLE gold_price",
        "SELECT * FROM other_table",
        "PRAGMA table_info(gold_price)",
    ] {
        let result = handler.run_query(run_query(sql)).await;
        let failure = result.failure().unwrap();
        assert_eq!(
            failure.error,
            "Only safe SELECT queries on the gold_price table are allowed."
        );
        assert!(failure.database_path.is_none());
    }

    // Nothing was modified.
    let count = handler
        .run_query(run_query("SELECT COUNT(*) AS n FROM gold_price"))
        .await;
    assert_eq!(count.success().unwrap().rows[0]["n"], json!(3));
}

#[tokio::test]
async fn test_run_query_reports_driver_errors() {
    let test_db = common::seeded_gold_price_db(1).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler
        .run_query(run_query("SELECT no_such_column FROM gold_price"))
        .await;
    let failure = result.failure().unwrap();
    assert!(
        failure.error.starts_with("SQLite error:"),
        "unexpected error: {}",
        failure.error
    );
    assert!(failure.error.contains("no_such_column"));
}

// =============================================================================
// Canned queries
// =============================================================================

#[tokio::test]
async fn test_sample_data_on_empty_table() {
    let test_db = common::empty_gold_price_db().await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler.sample_data().await;
    let rows = result.success().unwrap();
    assert_eq!(rows.row_count, 0);
    assert!(rows.rows.is_empty());
}

#[tokio::test]
async fn test_sample_data_returns_five_newest() {
    let test_db = common::seeded_gold_price_db(10).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler.sample_data().await;
    let rows = result.success().unwrap();
    assert_eq!(rows.row_count, 5);
    assert_eq!(rows.rows[0]["date"], json!("2024-01-10"));
    assert_eq!(rows.rows[4]["date"], json!("2024-01-06"));
}

#[tokio::test]
async fn test_latest_price_is_max_date() {
    let test_db = common::seeded_gold_price_db(10).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler.get_latest_price().await;
    let rows = result.success().unwrap();
    assert_eq!(rows.row_count, 1);
    assert_eq!(rows.rows[0]["date"], json!("2024-01-10"));
    assert_eq!(rows.rows[0]["price"], json!(2009.0));
}

#[tokio::test]
async fn test_price_range_is_descending_and_capped() {
    let test_db = common::seeded_gold_price_db(10).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler.get_price_range(PriceRangeInput { days: 7 }).await;
    let rows = result.success().unwrap();
    assert_eq!(rows.row_count, 7);

    let dates: Vec<&str> = rows
        .rows
        .iter()
        .map(|row| row["date"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert_eq!(dates[0], "2024-01-10");

    // Asking for more than exists returns everything.
    let result = handler.get_price_range(PriceRangeInput { days: 365 }).await;
    assert_eq!(result.success().unwrap().row_count, 10);
}

#[tokio::test]
async fn test_price_range_rejects_bad_days_even_with_database() {
    let test_db = common::seeded_gold_price_db(3).await;
    let handler = QueryToolHandler::new(test_db.db.clone());

    let result = handler.get_price_range(PriceRangeInput { days: 0 }).await;
    assert_eq!(
        result.failure().unwrap().error,
        "Days must be between 1 and 365"
    );
}

// =============================================================================
// get_table_info / database_status
// =============================================================================

#[tokio::test]
async fn test_table_info_describes_columns() {
    let test_db = common::seeded_gold_price_db(4).await;
    let info = SchemaToolHandler::new(test_db.db.clone())
        .get_table_info()
        .await;
    let info = info.success().expect("table info should succeed");

    assert!(info.success);
    assert_eq!(info.table_name, "gold_price");
    assert_eq!(info.row_count, 4);
    assert_eq!(info.database_path, test_db.db.absolute_path());

    let names: Vec<&str> = info.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "date", "price", "currency", "source"]);

    let id = info.column("id").unwrap();
    assert!(id.is_primary_key);
    assert_eq!(id.declared_type, "INTEGER");

    let date = info.column("date").unwrap();
    assert!(date.not_null);
    assert!(!date.is_primary_key);

    let currency = info.column("currency").unwrap();
    assert_eq!(currency.default_value.as_deref(), Some("'USD'"));
    assert!(info.column("price").unwrap().default_value.is_none());
}

#[tokio::test]
async fn test_table_info_wire_shape() {
    let test_db = common::empty_gold_price_db().await;
    let info = SchemaToolHandler::new(test_db.db.clone())
        .get_table_info()
        .await;
    let value = serde_json::to_value(&info).unwrap();

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["row_count"], json!(0));
    assert_eq!(
        value["columns"][0],
        json!({
            "cid": 0,
            "name": "id",
            "type": "INTEGER",
            "not_null": false,
            "default_value": null,
            "is_primary_key": true,
        })
    );
}

#[tokio::test]
async fn test_status_ready_reports_record_count() {
    let test_db = common::seeded_gold_price_db(6).await;
    let status = StatusToolHandler::new(test_db.db.clone())
        .database_status()
        .await;

    assert_eq!(status.status, StatusKind::Ready);
    assert_eq!(status.record_count, Some(6));
    assert_eq!(status.message, "Database is ready with 6 records");
    assert!(status.setup_instructions.is_none());
}

#[tokio::test]
async fn test_status_error_when_table_cannot_be_counted() {
    // The table is still listed in sqlite_master, but reading it needs a
    // module this build does not have.
    let test_db = common::create_db(&[
        common::GOLD_PRICE_SCHEMA,
        "INSERT INTO gold_price (date, price) VALUES ('2024-01-01', 2000.0)",
        "PRAGMA writable_schema=ON",
        "UPDATE sqlite_master SET sql = 'CREATE VIRTUAL TABLE gold_price USING nosuchmod()', \
         rootpage = 0 WHERE name = 'gold_price'",
    ])
    .await;

    assert!(test_db.db.exists().await);

    let status = StatusToolHandler::new(test_db.db.clone())
        .database_status()
        .await;
    assert_eq!(status.status, StatusKind::Error);
    assert!(
        status.message.starts_with("Database error:"),
        "unexpected message: {}",
        status.message
    );
    assert!(status.record_count.is_none());
    assert!(status.setup_instructions.is_none());
}

#[tokio::test]
async fn test_status_invalid_for_directory_path() {
    let dir = tempfile::tempdir().unwrap();
    let db = gold_price_mcp::db::GoldPriceDb::new(dir.path());

    let status = StatusToolHandler::new(db).database_status().await;
    assert_eq!(status.status, StatusKind::Invalid);
    assert_eq!(
        status.message,
        "Database exists but gold_price table is missing"
    );
}

#[tokio::test]
async fn test_status_missing_wire_shape() {
    let test_db = common::missing_db();
    let status = StatusToolHandler::new(test_db.db.clone())
        .database_status()
        .await;
    let value = serde_json::to_value(&status).unwrap();

    assert_eq!(value["status"], json!("missing"));
    assert_eq!(value["message"], json!("Database file does not exist"));
    assert_eq!(value["database_path"], json!(test_db.db.absolute_path()));
    assert!(value.get("record_count").is_none());
    assert!(value["setup_instructions"].is_string());
}
