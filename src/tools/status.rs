//! Database status tool.
//!
//! `database_status` walks the same checks as every other tool (file, then
//! table, then a row count) but reports where it stopped instead of failing.

use crate::db::{GoldPriceDb, SchemaInspector};
use crate::models::{DatabaseStatus, StatusKind};
use tracing::{info, warn};

/// Handler for the database_status tool.
pub struct StatusToolHandler {
    db: GoldPriceDb,
    inspector: SchemaInspector,
}

impl StatusToolHandler {
    pub fn new(db: GoldPriceDb) -> Self {
        Self {
            inspector: SchemaInspector::new(db.clone()),
            db,
        }
    }

    /// Handle the database_status tool call.
    pub async fn database_status(&self) -> DatabaseStatus {
        let status = self.check(self.db.absolute_path()).await;

        if status.status == StatusKind::Ready {
            info!(status = %status.status, record_count = ?status.record_count, "Database status");
        } else {
            warn!(status = %status.status, message = %status.message, "Database status");
        }

        status
    }

    async fn check(&self, path: String) -> DatabaseStatus {
        if !self.db.path_exists() {
            return DatabaseStatus::missing(path);
        }

        if !self.db.exists().await {
            return DatabaseStatus::invalid(path);
        }

        match self.inspector.row_count().await {
            Ok(count) => DatabaseStatus::ready(path, count),
            Err(e) => DatabaseStatus::error(path, e.detail()),
        }
    }
}
