//! Rule books, their entries, and auxiliary reference tables.
//!
//! All three are created by the import subsystem and read-only to the
//! engine. Superseding a rule book means importing a new record with a
//! higher version, never mutating an existing one.

use serde::{Deserialize, Serialize};

use super::collections::FxHashMap;

/// An imported regulatory catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBook {
    pub id: i64,
    /// Display name shown to analysts.
    pub name: String,
    /// Free-text version label from the source document (e.g. "2024-07").
    pub version_label: String,
    /// Monotonic version number per catalog name.
    pub version: i64,
    /// Unix timestamp of the import.
    pub imported_at: i64,
    /// Number of entry rows imported with this book.
    pub row_count: i64,
}

/// One row of a rule book.
///
/// Column names are supplied at import time, so the payload is an open
/// attribute map. The engine reads recognized columns through the keys
/// configured in [`crate::config::ColumnConfig`]; unknown columns pass
/// through untouched for rendering layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBookEntry {
    pub id: i64,
    pub rule_book_id: i64,
    pub data: FxHashMap<String, String>,
}

impl RuleBookEntry {
    /// Fetch a column value, trimmed. Missing columns read as empty.
    pub fn column(&self, key: &str) -> &str {
        self.data.get(key).map(|v| v.trim()).unwrap_or("")
    }
}

/// A named auxiliary table referenced from entry text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTable {
    pub id: i64,
    pub rule_book_id: i64,
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
