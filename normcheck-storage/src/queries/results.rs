//! Queries for the analysis_results table — one decision per
//! (analysis, entry) pair.

use normcheck_core::errors::StorageError;
use normcheck_core::types::{AnalysisResult, ChecklistStatus, Fulfillability};
use rusqlite::{params, Connection};

/// Insert or update the decision for one pair.
///
/// `ON CONFLICT` on the unique (analysis_id, entry_id) index makes the
/// write atomic per pair: concurrent upserts never produce a duplicate
/// row, the later write wins.
pub fn upsert(
    conn: &Connection,
    analysis_id: i64,
    entry_id: i64,
    status: Option<ChecklistStatus>,
    revised_fulfillability: Option<Fulfillability>,
    updated_at: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO analysis_results
            (analysis_id, entry_id, status, revised_fulfillability, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(analysis_id, entry_id) DO UPDATE SET
            status = excluded.status,
            revised_fulfillability = excluded.revised_fulfillability,
            updated_at = excluded.updated_at",
        params![
            analysis_id,
            entry_id,
            status.map(ChecklistStatus::as_str),
            revised_fulfillability.map(Fulfillability::as_str),
            updated_at
        ],
    )
    .map_err(StorageError::sqlite)?;
    Ok(())
}

/// The decision for one pair, if any.
pub fn find(
    conn: &Connection,
    analysis_id: i64,
    entry_id: i64,
) -> Result<Option<AnalysisResult>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, analysis_id, entry_id, status, revised_fulfillability, updated_at
             FROM analysis_results WHERE analysis_id = ?1 AND entry_id = ?2",
        )
        .map_err(StorageError::sqlite)?;

    match stmt.query_row(params![analysis_id, entry_id], row_to_result) {
        Ok(result) => Ok(Some(result)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StorageError::sqlite(e)),
    }
}

/// All decisions of one analysis.
pub fn list_by_analysis(
    conn: &Connection,
    analysis_id: i64,
) -> Result<Vec<AnalysisResult>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, analysis_id, entry_id, status, revised_fulfillability, updated_at
             FROM analysis_results WHERE analysis_id = ?1 ORDER BY id",
        )
        .map_err(StorageError::sqlite)?;

    let rows = stmt
        .query_map(params![analysis_id], row_to_result)
        .map_err(StorageError::sqlite)?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::sqlite)
}

/// Cascade helper for discarding an analysis.
pub fn delete_by_analysis(conn: &Connection, analysis_id: i64) -> Result<usize, StorageError> {
    conn.execute(
        "DELETE FROM analysis_results WHERE analysis_id = ?1",
        params![analysis_id],
    )
    .map_err(StorageError::sqlite)
}

/// Count all decisions of one analysis.
pub fn count(conn: &Connection, analysis_id: i64) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM analysis_results WHERE analysis_id = ?1",
        params![analysis_id],
        |row| row.get(0),
    )
    .map_err(StorageError::sqlite)
}

fn row_to_result(row: &rusqlite::Row<'_>) -> rusqlite::Result<AnalysisResult> {
    let status: Option<String> = row.get(3)?;
    let revised: Option<String> = row.get(4)?;
    Ok(AnalysisResult {
        id: row.get(0)?,
        analysis_id: row.get(1)?,
        entry_id: row.get(2)?,
        // Unknown historical spellings parse through the legacy-label
        // table; anything else reads as unset rather than failing the row.
        status: status.as_deref().and_then(ChecklistStatus::parse),
        revised_fulfillability: revised.as_deref().and_then(Fulfillability::parse),
        updated_at: row.get(5)?,
    })
}
