//! Queries for the project_analyses table.
//!
//! Selection sets are stored as raw text. New rows get a JSON array;
//! legacy rows may hold delimited strings or brace literals, which the
//! engine's normalizer recovers. Reading never fails on malformed
//! selection text.

use normcheck_core::errors::StorageError;
use normcheck_core::types::ProjectAnalysis;
use rusqlite::{params, Connection};

/// Create a new analysis for a project. The version is assigned
/// monotonically per project (max existing + 1); an earlier version is
/// never mutated.
pub fn create(
    conn: &Connection,
    project_id: i64,
    started_at: i64,
    new_use: &[String],
    fulfillability: &[String],
) -> Result<ProjectAnalysis, StorageError> {
    let version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM project_analyses WHERE project_id = ?1",
            params![project_id],
            |row| row.get(0),
        )
        .map_err(StorageError::sqlite)?;

    let new_use_json = serde_json::to_string(new_use).map_err(StorageError::sqlite)?;
    let fulfillability_json = serde_json::to_string(fulfillability).map_err(StorageError::sqlite)?;
    conn.execute(
        "INSERT INTO project_analyses
            (project_id, version, started_at, modified_at, new_use, fulfillability)
         VALUES (?1, ?2, ?3, ?3, ?4, ?5)",
        params![project_id, version, started_at, new_use_json, fulfillability_json],
    )
    .map_err(StorageError::sqlite)?;

    get(conn, conn.last_insert_rowid())
}

/// One analysis by id.
pub fn get(conn: &Connection, id: i64) -> Result<ProjectAnalysis, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, project_id, version, started_at, modified_at, new_use, fulfillability
             FROM project_analyses WHERE id = ?1",
        )
        .map_err(StorageError::sqlite)?;

    stmt.query_row(params![id], |row| {
        let new_use: String = row.get(5)?;
        let fulfillability: String = row.get(6)?;
        Ok(ProjectAnalysis {
            id: row.get(0)?,
            project_id: row.get(1)?,
            version: row.get(2)?,
            started_at: row.get(3)?,
            modified_at: row.get(4)?,
            new_use: parse_selection(&new_use),
            fulfillability: parse_selection(&fulfillability),
        })
    })
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => StorageError::NotFound {
            entity: "project analysis",
            id,
        },
        other => StorageError::sqlite(other),
    })
}

/// Update the selection sets and bump the modification timestamp.
pub fn update_criteria(
    conn: &Connection,
    id: i64,
    modified_at: i64,
    new_use: &[String],
    fulfillability: &[String],
) -> Result<(), StorageError> {
    let new_use_json = serde_json::to_string(new_use).map_err(StorageError::sqlite)?;
    let fulfillability_json = serde_json::to_string(fulfillability).map_err(StorageError::sqlite)?;
    conn.execute(
        "UPDATE project_analyses
         SET new_use = ?1, fulfillability = ?2, modified_at = ?3 WHERE id = ?4",
        params![new_use_json, fulfillability_json, modified_at, id],
    )
    .map_err(StorageError::sqlite)?;
    Ok(())
}

/// Delete an analysis; its results cascade.
pub fn delete(conn: &Connection, id: i64) -> Result<(), StorageError> {
    conn.execute("DELETE FROM project_analyses WHERE id = ?1", params![id])
        .map_err(StorageError::sqlite)?;
    Ok(())
}

/// Decode stored selection text. A JSON string array decodes
/// element-wise; anything else (legacy delimited text or brace literal)
/// is returned as one raw element for the normalizer to split.
fn parse_selection(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    if let Ok(values) = serde_json::from_str::<Vec<String>>(raw) {
        return values;
    }
    vec![raw.to_string()]
}
