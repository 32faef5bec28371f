//! Schema introspection for the gold_price table.
//!
//! These statements are fixed and never pass through the SQL validator
//! (which would reject `PRAGMA`).

use crate::db::store::{GOLD_PRICE_TABLE, GoldPriceDb};
use crate::error::{DbError, DbResult};
use crate::models::{ColumnDescriptor, TableInfo};
use sqlx::Row;
use sqlx::sqlite::SqliteConnection;
use tracing::debug;

/// Fixed SQL statements used for introspection.
mod queries {
    pub const TABLE_INFO: &str = "PRAGMA table_info(gold_price)";
    pub const ROW_COUNT: &str = "SELECT COUNT(*) AS count FROM gold_price";
}

/// Schema inspector bound to one database file.
#[derive(Debug, Clone)]
pub struct SchemaInspector {
    db: GoldPriceDb,
}

impl SchemaInspector {
    pub fn new(db: GoldPriceDb) -> Self {
        Self { db }
    }

    /// Column metadata and row count, read on a single connection.
    pub async fn describe_table(&self) -> DbResult<TableInfo> {
        let (columns, row_count) = self
            .db
            .with_connection(|conn| {
                Box::pin(async move {
                    let columns = fetch_columns(conn).await?;
                    let row_count = count_rows(conn).await?;
                    Ok::<_, DbError>((columns, row_count))
                })
            })
            .await?;

        debug!(
            columns = columns.len(),
            row_count = row_count,
            "Described gold_price table"
        );

        Ok(TableInfo::new(
            GOLD_PRICE_TABLE,
            columns,
            row_count,
            self.db.absolute_path(),
        ))
    }

    /// Number of rows in the table.
    pub async fn row_count(&self) -> DbResult<i64> {
        self.db
            .with_connection(|conn| Box::pin(async move { count_rows(conn).await }))
            .await
    }
}

async fn fetch_columns(conn: &mut SqliteConnection) -> DbResult<Vec<ColumnDescriptor>> {
    let rows = sqlx::query(queries::TABLE_INFO)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| {
            let cid: i64 = row.try_get("cid")?;
            let name: String = row.try_get("name")?;
            let declared_type: String = row.try_get("type")?;
            let notnull: i64 = row.try_get("notnull")?;
            let default_value: Option<String> = row.try_get("dflt_value")?;
            let pk: i64 = row.try_get("pk")?;

            Ok::<_, DbError>(ColumnDescriptor::new(cid, name, declared_type)
                .with_not_null(notnull != 0)
                .with_default(default_value)
                .with_primary_key(pk > 0))
        })
        .collect()
}

async fn count_rows(conn: &mut SqliteConnection) -> DbResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(queries::ROW_COUNT)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}
