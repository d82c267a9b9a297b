//! Queries for the reference_tables table.

use normcheck_core::errors::StorageError;
use normcheck_core::types::ReferenceTable;
use rusqlite::{params, Connection};

/// Insert one reference table. Returns the row id.
pub fn insert(
    conn: &Connection,
    rule_book_id: i64,
    name: &str,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<i64, StorageError> {
    let header_json = serde_json::to_string(header).map_err(StorageError::sqlite)?;
    let rows_json = serde_json::to_string(rows).map_err(StorageError::sqlite)?;
    conn.execute(
        "INSERT INTO reference_tables (rule_book_id, name, header, rows)
         VALUES (?1, ?2, ?3, ?4)",
        params![rule_book_id, name, header_json, rows_json],
    )
    .map_err(StorageError::sqlite)?;
    Ok(conn.last_insert_rowid())
}

/// All reference tables of one rule book.
pub fn list_by_book(
    conn: &Connection,
    rule_book_id: i64,
) -> Result<Vec<ReferenceTable>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, rule_book_id, name, header, rows FROM reference_tables
             WHERE rule_book_id = ?1 ORDER BY id",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map(params![rule_book_id], |row| {
            let id: i64 = row.get(0)?;
            let rule_book_id: i64 = row.get(1)?;
            let name: String = row.get(2)?;
            let header: String = row.get(3)?;
            let data: String = row.get(4)?;
            Ok((id, rule_book_id, name, header, data))
        })
        .map_err(StorageError::sqlite)?;

    let mut tables = Vec::new();
    for row in rows {
        let (id, rule_book_id, name, header, data) = row.map_err(StorageError::sqlite)?;
        tables.push(ReferenceTable {
            id,
            rule_book_id,
            name,
            header: serde_json::from_str(&header).map_err(StorageError::sqlite)?,
            rows: serde_json::from_str(&data).map_err(StorageError::sqlite)?,
        });
    }
    Ok(tables)
}
