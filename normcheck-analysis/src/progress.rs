//! Per-segment and per-rule-book completion statistics.
//!
//! A parameter row counts as completed once the analyst's decision is
//! conclusive: any set status suffices, except that "not fulfilled" and
//! "not verifiable" additionally require a revised fulfillability before
//! the row gates downstream reporting.

use normcheck_core::config::{ColumnConfig, MatchConfig};
use normcheck_core::types::collections::FxHashMap;
use normcheck_core::types::AnalysisResult;

use crate::segment::Segment;

/// Row and completion counts for one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentStats {
    pub key: String,
    pub total_rows: usize,
    pub total_parameters: usize,
    pub completed_parameters: usize,
}

/// Aggregated statistics for one rule book's segmented data.
#[derive(Debug, Clone)]
pub struct RuleBookProgress {
    pub rule_book_id: i64,
    pub segments: Vec<SegmentStats>,
    pub total_rows: usize,
    pub total_parameters: usize,
    pub total_completed: usize,
}

impl RuleBookProgress {
    /// A rule book is done when it has nothing to review or everything
    /// reviewed.
    pub fn is_complete(&self) -> bool {
        self.total_parameters == 0 || self.total_completed == self.total_parameters
    }
}

/// Completion predicate for one parameter row's stored decision.
pub fn is_completed(result: Option<&AnalysisResult>) -> bool {
    match result.and_then(|r| r.status) {
        None => false,
        Some(status) if status.keeps_revision() => result
            .map(|r| r.revised_fulfillability.is_some())
            .unwrap_or(false),
        Some(_) => true,
    }
}

/// Join segmented entries against stored results and count.
///
/// `results` is keyed by entry id; entries without a stored decision
/// count as not completed.
pub fn compute(
    rule_book_id: i64,
    segments: &[Segment<'_>],
    results: &FxHashMap<i64, AnalysisResult>,
    columns: &ColumnConfig,
    matching: &MatchConfig,
) -> RuleBookProgress {
    let parameter_tag = matching.effective_parameter_tag();
    let column_type = columns.effective_column_type();

    let mut stats = Vec::with_capacity(segments.len());
    let mut total_rows = 0;
    let mut total_parameters = 0;
    let mut total_completed = 0;

    for segment in segments {
        let mut parameters = 0;
        let mut completed = 0;
        for entry in &segment.entries {
            if entry.column(column_type) != parameter_tag {
                continue;
            }
            parameters += 1;
            if is_completed(results.get(&entry.id)) {
                completed += 1;
            }
        }
        total_rows += segment.entries.len();
        total_parameters += parameters;
        total_completed += completed;
        stats.push(SegmentStats {
            key: segment.key.clone(),
            total_rows: segment.entries.len(),
            total_parameters: parameters,
            completed_parameters: completed,
        });
    }

    RuleBookProgress {
        rule_book_id,
        segments: stats,
        total_rows,
        total_parameters,
        total_completed,
    }
}

/// Analysis-wide completion across all applicable rule books.
pub fn analysis_complete(progress: &[RuleBookProgress]) -> bool {
    progress.iter().all(RuleBookProgress::is_complete)
}
