//! Recognized entry column keys.
//!
//! Rule-book columns are named at import time, so the engine reads its
//! load-bearing fields through configurable keys rather than hard-coded
//! names.

use serde::{Deserialize, Serialize};

/// Column keys the engine reads from an entry's attribute map.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColumnConfig {
    /// Hierarchical outline code column (e.g. "3.2.1", "§ 14").
    pub outline: Option<String>,
    /// Free-text rule text column.
    pub rule_text: Option<String>,
    /// Usage tag column (space/comma/slash-delimited free text).
    pub usage: Option<String>,
    /// Column-type tag column ("Parameter" vs informational).
    pub column_type: Option<String>,
    /// Fulfillability tag column.
    pub fulfillability: Option<String>,
    /// Reference-table name column.
    pub reference_table: Option<String>,
}

impl ColumnConfig {
    pub fn effective_outline(&self) -> &str {
        self.outline.as_deref().unwrap_or("outline")
    }

    pub fn effective_rule_text(&self) -> &str {
        self.rule_text.as_deref().unwrap_or("rule_text")
    }

    pub fn effective_usage(&self) -> &str {
        self.usage.as_deref().unwrap_or("usage")
    }

    pub fn effective_column_type(&self) -> &str {
        self.column_type.as_deref().unwrap_or("column_type")
    }

    pub fn effective_fulfillability(&self) -> &str {
        self.fulfillability.as_deref().unwrap_or("fulfillability")
    }

    pub fn effective_reference_table(&self) -> &str {
        self.reference_table.as_deref().unwrap_or("reference_table")
    }
}
