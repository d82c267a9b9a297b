//! Queries for the rule_books table.

use normcheck_core::errors::StorageError;
use normcheck_core::types::RuleBook;
use rusqlite::{params, Connection};

/// Insert a new rule book. Returns the row id.
pub fn insert(
    conn: &Connection,
    name: &str,
    version_label: &str,
    version: i64,
    imported_at: i64,
) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO rule_books (name, version_label, version, imported_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, version_label, version, imported_at],
    )
    .map_err(StorageError::sqlite)?;
    Ok(conn.last_insert_rowid())
}

/// Set the entry row count after a completed import.
pub fn set_row_count(conn: &Connection, id: i64, row_count: i64) -> Result<(), StorageError> {
    conn.execute(
        "UPDATE rule_books SET row_count = ?1 WHERE id = ?2",
        params![row_count, id],
    )
    .map_err(StorageError::sqlite)?;
    Ok(())
}

/// All rule books, most recently imported first (storage default order).
pub fn list(conn: &Connection) -> Result<Vec<RuleBook>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, name, version_label, version, imported_at, row_count
             FROM rule_books ORDER BY imported_at DESC, id DESC",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map([], row_to_rule_book)
        .map_err(StorageError::sqlite)?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::sqlite)
}

/// One rule book by id.
pub fn get(conn: &Connection, id: i64) -> Result<RuleBook, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, name, version_label, version, imported_at, row_count
             FROM rule_books WHERE id = ?1",
        )
        .map_err(StorageError::sqlite)?;

    stmt.query_row(params![id], row_to_rule_book)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::NotFound {
                entity: "rule book",
                id,
            },
            other => StorageError::sqlite(other),
        })
}

/// Delete a rule book; entries and reference tables cascade.
pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    conn.execute("DELETE FROM rule_books WHERE id = ?1", params![id])
        .map_err(StorageError::sqlite)?;
    Ok(())
}

fn row_to_rule_book(row: &rusqlite::Row<'_>) -> rusqlite::Result<RuleBook> {
    Ok(RuleBook {
        id: row.get(0)?,
        name: row.get(1)?,
        version_label: row.get(2)?,
        version: row.get(3)?,
        imported_at: row.get(4)?,
        row_count: row.get(5)?,
    })
}
