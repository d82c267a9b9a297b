//! Storage traits consumed by the analysis engine.
//!
//! The engine is written against these seams; `normcheck-storage`
//! implements them over SQLite. Core never imports the implementation.
//! All operations are synchronous per request — the engine recomputes
//! derived data on every read rather than caching it.

use crate::errors::StorageError;
use crate::types::{
    AnalysisResult, ChecklistStatus, Fulfillability, ProjectAnalysis, ReferenceTable, RuleBook,
    RuleBookEntry,
};

/// A rule book with its entries (in import order) and reference tables.
#[derive(Debug, Clone)]
pub struct RuleBookDetails {
    pub rule_book: RuleBook,
    /// Entries in stored import order. This order is load-bearing for
    /// segmentation carry-forward and must not be re-sorted.
    pub entries: Vec<RuleBookEntry>,
    pub reference_tables: Vec<ReferenceTable>,
}

/// Read access to imported rule books.
pub trait RuleBookStore {
    /// All rule books, most recently imported first.
    fn rule_books(&self) -> Result<Vec<RuleBook>, StorageError>;

    /// One rule book with entries and reference tables.
    fn rule_book_details(&self, rule_book_id: i64) -> Result<RuleBookDetails, StorageError>;
}

/// Read access to project analyses.
pub trait AnalysisStore {
    fn project_analysis(&self, analysis_id: i64) -> Result<ProjectAnalysis, StorageError>;
}

/// Upsert and lookup of analyst decisions, one per (analysis, entry) pair.
pub trait ResultStore {
    fn find(&self, analysis_id: i64, entry_id: i64)
        -> Result<Option<AnalysisResult>, StorageError>;

    /// Insert or update the decision for one pair. Atomic per pair: two
    /// concurrent upserts never produce two rows, the later write wins.
    fn upsert(
        &self,
        analysis_id: i64,
        entry_id: i64,
        status: Option<ChecklistStatus>,
        revised_fulfillability: Option<Fulfillability>,
    ) -> Result<(), StorageError>;

    fn list_by_analysis(&self, analysis_id: i64) -> Result<Vec<AnalysisResult>, StorageError>;

    /// Cascade helper, invoked when an analysis is discarded.
    fn delete_by_analysis(&self, analysis_id: i64) -> Result<(), StorageError>;
}
