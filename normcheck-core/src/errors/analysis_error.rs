//! Rule analysis engine errors.

use super::storage_error::StorageError;

/// Errors that can occur while computing or serving analysis data.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The analysis has no normalized "new use" selection. Distinct from
    /// a legitimately empty match result, which is not an error.
    #[error("analysis {analysis_id} has no usage criteria set")]
    CriteriaNotSet { analysis_id: i64 },

    /// The engine lifts a storage-level miss on a project analysis
    /// lookup into this variant; other entities keep the generic
    /// [`StorageError::NotFound`].
    #[error("project analysis {analysis_id} not found")]
    AnalysisNotFound { analysis_id: i64 },

    #[error("rule book {rule_book_id} not found")]
    RuleBookNotFound { rule_book_id: i64 },

    /// Other storage failures propagate as-is; the engine never retries
    /// or suppresses them.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
