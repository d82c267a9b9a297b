//! Tests for analysis_results: upsert, find, list, cascade delete.

use normcheck_core::types::{ChecklistStatus, Fulfillability};
use normcheck_storage::migrations::run_migrations;
use normcheck_storage::queries::results::*;
use rusqlite::{params, Connection};

fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    run_migrations(&conn).unwrap();
    conn.execute(
        "INSERT INTO project_analyses
            (id, project_id, version, started_at, modified_at, new_use, fulfillability)
         VALUES (1, 1, 1, 0, 0, '[]', '[]')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn upsert_then_find_returns_latest_values() {
    let conn = setup_db();
    upsert(&conn, 1, 10, Some(ChecklistStatus::Fulfilled), None, 100).unwrap();

    let first = find(&conn, 1, 10).unwrap().unwrap();
    assert_eq!(first.status, Some(ChecklistStatus::Fulfilled));
    assert_eq!(first.revised_fulfillability, None);
    assert_eq!(first.updated_at, 100);

    upsert(
        &conn,
        1,
        10,
        Some(ChecklistStatus::NotFulfilled),
        Some(Fulfillability::Heavy),
        200,
    )
    .unwrap();

    let second = find(&conn, 1, 10).unwrap().unwrap();
    assert_eq!(second.status, Some(ChecklistStatus::NotFulfilled));
    assert_eq!(second.revised_fulfillability, Some(Fulfillability::Heavy));
    assert_eq!(second.updated_at, 200);
    // Update in place, not a second row.
    assert_eq!(second.id, first.id);
    assert_eq!(count(&conn, 1).unwrap(), 1);
}

#[test]
fn upsert_twice_never_creates_two_records() {
    let conn = setup_db();
    for i in 0..5 {
        upsert(&conn, 1, 42, Some(ChecklistStatus::NotRelevant), None, i).unwrap();
    }
    assert_eq!(count(&conn, 1).unwrap(), 1);
}

#[test]
fn find_missing_pair_is_none() {
    let conn = setup_db();
    assert!(find(&conn, 1, 999).unwrap().is_none());
}

#[test]
fn list_by_analysis_returns_only_that_analysis() {
    let conn = setup_db();
    conn.execute(
        "INSERT INTO project_analyses
            (id, project_id, version, started_at, modified_at, new_use, fulfillability)
         VALUES (2, 1, 2, 0, 0, '[]', '[]')",
        [],
    )
    .unwrap();

    upsert(&conn, 1, 10, Some(ChecklistStatus::Fulfilled), None, 0).unwrap();
    upsert(&conn, 1, 11, None, None, 0).unwrap();
    upsert(&conn, 2, 10, Some(ChecklistStatus::NotRelevant), None, 0).unwrap();

    let listed = list_by_analysis(&conn, 1).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|r| r.analysis_id == 1));
}

#[test]
fn delete_by_analysis_removes_all_rows() {
    let conn = setup_db();
    upsert(&conn, 1, 10, Some(ChecklistStatus::Fulfilled), None, 0).unwrap();
    upsert(&conn, 1, 11, Some(ChecklistStatus::Fulfilled), None, 0).unwrap();

    let removed = delete_by_analysis(&conn, 1).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(count(&conn, 1).unwrap(), 0);
}

#[test]
fn legacy_status_spellings_load_as_not_fulfilled() {
    let conn = setup_db();
    conn.execute(
        "INSERT INTO analysis_results (analysis_id, entry_id, status, updated_at)
         VALUES (1, 10, 'Unachievable', 0), (1, 11, 'Not Fulfilled', 0)",
        params![],
    )
    .unwrap();

    for entry_id in [10, 11] {
        let result = find(&conn, 1, entry_id).unwrap().unwrap();
        assert_eq!(result.status, Some(ChecklistStatus::NotFulfilled));
    }
}
