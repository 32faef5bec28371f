//! Schema-related data models.
//!
//! This module defines types for introspecting the gold_price table.

use serde::Serialize;

/// One column as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Zero-based column position
    pub cid: i64,
    pub name: String,
    /// Declared type; empty when the column was declared without one
    #[serde(rename = "type")]
    pub declared_type: String,
    pub not_null: bool,
    /// Default value expression as written in the table definition
    pub default_value: Option<String>,
    pub is_primary_key: bool,
}

impl ColumnDescriptor {
    pub fn new(cid: i64, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            cid,
            name: name.into(),
            declared_type: declared_type.into(),
            not_null: false,
            default_value: None,
            is_primary_key: false,
        }
    }

    pub fn with_not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    pub fn with_default(mut self, default_value: Option<String>) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn with_primary_key(mut self, is_pk: bool) -> Self {
        self.is_primary_key = is_pk;
        self
    }
}

/// Structure and size of the gold_price table.
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub success: bool,
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub row_count: i64,
    pub database_path: String,
}

impl TableInfo {
    pub fn new(
        table_name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        row_count: i64,
        database_path: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            table_name: table_name.into(),
            columns,
            row_count,
            database_path: database_path.into(),
        }
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}
