//! Queries for the rule_book_entries table.

use normcheck_core::errors::StorageError;
use normcheck_core::types::collections::FxHashMap;
use normcheck_core::types::RuleBookEntry;
use rusqlite::{params, Connection};

/// Insert entry rows in import order. Positions are assigned from the
/// slice order; that order is what segmentation later folds over.
pub fn insert_all(
    conn: &Connection,
    rule_book_id: i64,
    rows: &[FxHashMap<String, String>],
) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO rule_book_entries (rule_book_id, position, data)
             VALUES (?1, ?2, ?3)",
        )
        .map_err(StorageError::sqlite)?;

    for (position, data) in rows.iter().enumerate() {
        let payload = serde_json::to_string(data).map_err(StorageError::sqlite)?;
        stmt.execute(params![rule_book_id, position as i64, payload])
            .map_err(StorageError::sqlite)?;
    }
    Ok(rows.len())
}

/// All entries of one rule book, in import order.
pub fn list_by_book(conn: &Connection, rule_book_id: i64) -> Result<Vec<RuleBookEntry>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, rule_book_id, data FROM rule_book_entries
             WHERE rule_book_id = ?1 ORDER BY position",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map(params![rule_book_id], |row| {
            let id: i64 = row.get(0)?;
            let rule_book_id: i64 = row.get(1)?;
            let payload: String = row.get(2)?;
            Ok((id, rule_book_id, payload))
        })
        .map_err(StorageError::sqlite)?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, rule_book_id, payload) = row.map_err(StorageError::sqlite)?;
        let data: FxHashMap<String, String> =
            serde_json::from_str(&payload).map_err(StorageError::sqlite)?;
        entries.push(RuleBookEntry {
            id,
            rule_book_id,
            data,
        });
    }
    Ok(entries)
}
