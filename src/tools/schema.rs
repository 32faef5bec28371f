//! Schema introspection tool.
//!
//! This module implements `get_table_info`: column metadata from
//! `PRAGMA table_info` plus the current row count.

use crate::db::{GoldPriceDb, SchemaInspector};
use crate::error::DbResult;
use crate::models::{Outcome, TableInfo};
use tracing::info;

/// Handler for schema operations.
pub struct SchemaToolHandler {
    db: GoldPriceDb,
    inspector: SchemaInspector,
}

impl SchemaToolHandler {
    pub fn new(db: GoldPriceDb) -> Self {
        Self {
            inspector: SchemaInspector::new(db.clone()),
            db,
        }
    }

    /// Handle the get_table_info tool call.
    pub async fn get_table_info(&self) -> Outcome<TableInfo> {
        self.describe().await.into()
    }

    async fn describe(&self) -> DbResult<TableInfo> {
        self.db.ensure_ready().await?;

        let info = self.inspector.describe_table().await?;

        info!(
            columns = info.columns.len(),
            row_count = info.row_count,
            "Described table"
        );

        Ok(info)
    }
}
