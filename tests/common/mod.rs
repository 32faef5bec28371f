//! Shared fixtures for integration tests: a throwaway SQLite file seeded
//! with a `gold_price` table.

#![allow(dead_code)]

use gold_price_mcp::db::GoldPriceDb;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, Executor};
use tempfile::TempDir;

pub const GOLD_PRICE_SCHEMA: &str = "CREATE TABLE gold_price (
    id INTEGER PRIMARY KEY,
    date TEXT NOT NULL,
    price REAL,
    currency TEXT DEFAULT 'USD',
    source BLOB
)";

/// A database file that lives as long as the fixture.
pub struct TestDb {
    pub dir: TempDir,
    pub db: GoldPriceDb,
}

impl TestDb {
    pub fn path(&self) -> std::path::PathBuf {
        self.db.path().to_path_buf()
    }
}

/// Create a database file and run `statements` against it.
pub async fn create_db(statements: &[&str]) -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gold_price.db");

    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await
        .unwrap();
    for statement in statements {
        conn.execute(*statement).await.unwrap();
    }
    conn.close().await.unwrap();

    TestDb {
        dir,
        db: GoldPriceDb::new(path),
    }
}

/// An empty gold_price table.
pub async fn empty_gold_price_db() -> TestDb {
    create_db(&[GOLD_PRICE_SCHEMA]).await
}

/// A gold_price table with `days` daily rows, oldest first, starting
/// 2024-01-01. Prices rise by one each day from 2000.0.
pub async fn seeded_gold_price_db(days: u32) -> TestDb {
    let inserts: Vec<String> = (0..days)
        .map(|i| {
            format!(
                "INSERT INTO gold_price (date, price) VALUES (date('2024-01-01', '+{} days'), {})",
                i,
                2000.0 + f64::from(i)
            )
        })
        .collect();

    let mut statements = vec![GOLD_PRICE_SCHEMA];
    statements.extend(inserts.iter().map(String::as_str));
    create_db(&statements).await
}

/// A missing file inside a fresh temp dir.
pub fn missing_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db = GoldPriceDb::new(dir.path().join("absent.db"));
    TestDb { dir, db }
}
