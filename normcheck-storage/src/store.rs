//! `SqliteStore` — the core storage traits over SQLite, plus the import
//! and lifecycle operations the surrounding application calls.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use normcheck_core::errors::StorageError;
use normcheck_core::traits::{AnalysisStore, ResultStore, RuleBookDetails, RuleBookStore};
use normcheck_core::types::collections::FxHashMap;
use normcheck_core::types::{
    AnalysisResult, ChecklistStatus, Fulfillability, ProjectAnalysis, RuleBook,
};

use crate::connection::DatabaseManager;
use crate::queries::{analyses, entries, reference_tables, results, rule_books};

/// One reference table to import alongside a rule book.
#[derive(Debug, Clone)]
pub struct ReferenceTableImport {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// SQLite-backed store implementing the core storage traits.
pub struct SqliteStore {
    db: DatabaseManager,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
        })
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    /// Import a rule book with its entries and reference tables in one
    /// transaction. Entry order in `rows` becomes the stored import
    /// order. Returns the created book with its row count set.
    pub fn import_rule_book(
        &self,
        name: &str,
        version_label: &str,
        version: i64,
        rows: &[FxHashMap<String, String>],
        tables: &[ReferenceTableImport],
    ) -> Result<RuleBook, StorageError> {
        let imported_at = now();
        let book = self.db.with_writer(|conn| {
            let tx = conn.unchecked_transaction().map_err(StorageError::sqlite)?;
            let id = rule_books::insert(&tx, name, version_label, version, imported_at)?;
            let count = entries::insert_all(&tx, id, rows)?;
            rule_books::set_row_count(&tx, id, count as i64)?;
            for table in tables {
                reference_tables::insert(&tx, id, &table.name, &table.header, &table.rows)?;
            }
            tx.commit().map_err(StorageError::sqlite)?;
            rule_books::get(conn, id)
        })?;
        tracing::info!(
            rule_book_id = book.id,
            name,
            rows = book.row_count,
            "imported rule book"
        );
        Ok(book)
    }

    /// Start a new review cycle for a project. The version is assigned
    /// monotonically; existing analyses stay untouched.
    pub fn create_analysis(
        &self,
        project_id: i64,
        new_use: &[String],
        fulfillability: &[String],
    ) -> Result<ProjectAnalysis, StorageError> {
        let analysis = self
            .db
            .with_writer(|conn| analyses::create(conn, project_id, now(), new_use, fulfillability))?;
        tracing::info!(
            analysis_id = analysis.id,
            project_id,
            version = analysis.version,
            "created project analysis"
        );
        Ok(analysis)
    }

    /// Replace an analysis's selection sets.
    pub fn update_analysis_criteria(
        &self,
        analysis_id: i64,
        new_use: &[String],
        fulfillability: &[String],
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            analyses::update_criteria(conn, analysis_id, now(), new_use, fulfillability)
        })
    }

    /// Delete a rule book; entries and reference tables cascade.
    pub fn delete_rule_book(&self, rule_book_id: i64) -> Result<(), StorageError> {
        self.db.with_writer(|conn| rule_books::delete(conn, rule_book_id))
    }

    /// Discard an analysis and its results.
    pub fn delete_analysis(&self, analysis_id: i64) -> Result<(), StorageError> {
        self.db.with_writer(|conn| analyses::delete(conn, analysis_id))
    }
}

impl RuleBookStore for SqliteStore {
    fn rule_books(&self) -> Result<Vec<RuleBook>, StorageError> {
        self.db.with_reader(rule_books::list)
    }

    fn rule_book_details(&self, rule_book_id: i64) -> Result<RuleBookDetails, StorageError> {
        self.db.with_reader(|conn| {
            Ok(RuleBookDetails {
                rule_book: rule_books::get(conn, rule_book_id)?,
                entries: entries::list_by_book(conn, rule_book_id)?,
                reference_tables: reference_tables::list_by_book(conn, rule_book_id)?,
            })
        })
    }
}

impl AnalysisStore for SqliteStore {
    fn project_analysis(&self, analysis_id: i64) -> Result<ProjectAnalysis, StorageError> {
        self.db.with_reader(|conn| analyses::get(conn, analysis_id))
    }
}

impl ResultStore for SqliteStore {
    fn find(
        &self,
        analysis_id: i64,
        entry_id: i64,
    ) -> Result<Option<AnalysisResult>, StorageError> {
        self.db
            .with_reader(|conn| results::find(conn, analysis_id, entry_id))
    }

    fn upsert(
        &self,
        analysis_id: i64,
        entry_id: i64,
        status: Option<ChecklistStatus>,
        revised_fulfillability: Option<Fulfillability>,
    ) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            results::upsert(
                conn,
                analysis_id,
                entry_id,
                status,
                revised_fulfillability,
                now(),
            )
        })
    }

    fn list_by_analysis(&self, analysis_id: i64) -> Result<Vec<AnalysisResult>, StorageError> {
        self.db
            .with_reader(|conn| results::list_by_analysis(conn, analysis_id))
    }

    fn delete_by_analysis(&self, analysis_id: i64) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            let removed = results::delete_by_analysis(conn, analysis_id)?;
            tracing::debug!(analysis_id, removed, "deleted analysis results");
            Ok(())
        })
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
