//! SQLite value mappings.
//!
//! This module converts driver rows into plain JSON maps.
//!
//! # Architecture
//!
//! Conversion uses a two-phase approach:
//! 1. `StorageClass` classifies each value by the storage class SQLite reports
//!    for it at runtime (not the declared column type, which may be absent
//!    for computed columns like `COUNT(*)` or `AVG(price)`)
//! 2. A per-class decoder performs the actual value extraction

use crate::models::Row;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

// =============================================================================
// Storage Classification
// =============================================================================

/// The five SQLite storage classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

/// Classify a runtime type name reported by the driver.
pub fn classify(type_name: &str) -> StorageClass {
    match type_name.to_ascii_uppercase().as_str() {
        "NULL" => StorageClass::Null,
        "INTEGER" | "INT" | "BIGINT" | "INT8" | "BOOLEAN" => StorageClass::Integer,
        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => StorageClass::Real,
        "BLOB" => StorageClass::Blob,
        // TEXT, DATE, TIME, DATETIME and anything unrecognized
        _ => StorageClass::Text,
    }
}

// =============================================================================
// Binary Encoding
// =============================================================================

/// Decode BLOB data to a JSON string.
///
/// Valid UTF-8 is returned as text; anything else is base64 encoded.
pub fn decode_blob(bytes: &[u8]) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    match std::str::from_utf8(bytes) {
        Ok(s) => JsonValue::String(s.to_string()),
        Err(_) => JsonValue::String(STANDARD.encode(bytes)),
    }
}

// =============================================================================
// Row to JSON Trait
// =============================================================================

/// Trait for converting database rows to JSON maps.
pub trait RowToJson {
    fn to_json_map(&self) -> Row;
}

impl RowToJson for SqliteRow {
    fn to_json_map(&self) -> Row {
        self.columns()
            .iter()
            .map(|col| (col.name().to_string(), decode_column(self, col.ordinal())))
            .collect()
    }
}

fn decode_column(row: &SqliteRow, idx: usize) -> JsonValue {
    let class = match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => StorageClass::Null,
        Ok(raw) => classify(raw.type_info().name()),
        Err(e) => {
            tracing::error!(column = idx, "Failed to read column: {:?}", e);
            return JsonValue::Null;
        }
    };

    match class {
        StorageClass::Null => JsonValue::Null,
        StorageClass::Integer => decode_integer(row, idx),
        StorageClass::Real => decode_real(row, idx),
        StorageClass::Text => decode_text(row, idx),
        StorageClass::Blob => decode_blob_col(row, idx),
    }
}

fn decode_integer(row: &SqliteRow, idx: usize) -> JsonValue {
    row.try_get_unchecked::<Option<i64>, _>(idx)
        .ok()
        .flatten()
        .map(|v| JsonValue::Number(v.into()))
        .unwrap_or(JsonValue::Null)
}

fn decode_real(row: &SqliteRow, idx: usize) -> JsonValue {
    if let Ok(Some(v)) = row.try_get_unchecked::<Option<f64>, _>(idx) {
        return serde_json::Number::from_f64(v)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(v.to_string()));
    }
    JsonValue::Null
}

fn decode_text(row: &SqliteRow, idx: usize) -> JsonValue {
    row.try_get_unchecked::<Option<String>, _>(idx)
        .ok()
        .flatten()
        .map(JsonValue::String)
        .unwrap_or(JsonValue::Null)
}

fn decode_blob_col(row: &SqliteRow, idx: usize) -> JsonValue {
    row.try_get_unchecked::<Option<Vec<u8>>, _>(idx)
        .ok()
        .flatten()
        .map(|v| decode_blob(&v))
        .unwrap_or(JsonValue::Null)
}
