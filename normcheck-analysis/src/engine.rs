//! The analysis engine facade.
//!
//! Ties the pure components to the storage traits and exposes the
//! operations the review/reporting layer calls. Stateless and
//! re-entrant: every call re-filters and re-segments against current
//! storage, so derived data never goes stale. The result table is the
//! only mutable shared resource, written through last-write-wins upserts.

use normcheck_core::config::NormcheckConfig;
use normcheck_core::errors::{AnalysisError, StorageError};
use normcheck_core::traits::{AnalysisStore, ResultStore, RuleBookDetails, RuleBookStore};
use normcheck_core::types::collections::{BTreeMap, FxHashMap};
use normcheck_core::types::{
    AnalysisResult, ChecklistStatus, Fulfillability, ProjectAnalysis, ReferenceTable, RuleBook,
    RuleBookEntry,
};

use crate::filter::{filter_entries, FilterCriteria};
use crate::navigator::{next_segment, SegmentRef};
use crate::normalize::normalize_all;
use crate::progress::{self, RuleBookProgress};
use crate::segment::Segmenter;
use crate::vocabulary::Translator;

/// One rule book narrowed to the entries applying to an analysis.
#[derive(Debug, Clone)]
pub struct FilteredRuleBook {
    pub rule_book: RuleBook,
    pub entries: Vec<RuleBookEntry>,
}

/// One rule book's segment statistics for an analysis.
#[derive(Debug, Clone)]
pub struct SegmentedRuleBook {
    pub rule_book: RuleBook,
    pub progress: RuleBookProgress,
}

/// Everything the review view needs for one segment.
#[derive(Debug, Clone)]
pub struct SegmentDetails {
    pub project_analysis: ProjectAnalysis,
    pub rule_book: RuleBook,
    pub segment_key: String,
    pub entries: Vec<EntryWithResult>,
    pub reference_tables: Vec<ReferenceTable>,
}

/// An entry paired with the analyst's decision, if any.
#[derive(Debug, Clone)]
pub struct EntryWithResult {
    pub entry: RuleBookEntry,
    pub result: Option<AnalysisResult>,
}

/// A decision to persist for one entry of one segment.
#[derive(Debug, Clone)]
pub struct SaveResultRequest {
    pub analysis_id: i64,
    pub rule_book_id: i64,
    pub entry_id: i64,
    pub segment_key: String,
    pub status: Option<ChecklistStatus>,
    pub revised_fulfillability: Option<Fulfillability>,
}

/// Aggregate decision counts for charting. Zero-count categories are
/// omitted.
#[derive(Debug, Clone, Default)]
pub struct ResultBreakdown {
    pub checklist: BTreeMap<&'static str, usize>,
    pub fulfillability: BTreeMap<&'static str, usize>,
}

/// The rule analysis engine.
///
/// Generic over one store implementing all three storage traits; the
/// translator and config are fixed at construction.
pub struct AnalysisEngine<S> {
    store: S,
    translator: Translator,
    config: NormcheckConfig,
    segmenter: Segmenter,
}

impl<S> AnalysisEngine<S>
where
    S: RuleBookStore + AnalysisStore + ResultStore,
{
    pub fn new(store: S, translator: Translator, config: NormcheckConfig) -> Self {
        let segmenter = Segmenter::new(config.columns.effective_outline());
        Self {
            store,
            translator,
            config,
            segmenter,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up an analysis, lifting a storage miss into the engine's
    /// own not-found variant.
    fn lookup_analysis(&self, analysis_id: i64) -> Result<ProjectAnalysis, AnalysisError> {
        match self.store.project_analysis(analysis_id) {
            Err(StorageError::NotFound { .. }) => {
                Err(AnalysisError::AnalysisNotFound { analysis_id })
            }
            other => Ok(other?),
        }
    }

    /// Look up a rule book's full detail record, lifting a storage miss
    /// into the engine's own not-found variant.
    fn lookup_book(&self, rule_book_id: i64) -> Result<RuleBookDetails, AnalysisError> {
        match self.store.rule_book_details(rule_book_id) {
            Err(StorageError::NotFound { .. }) => {
                Err(AnalysisError::RuleBookNotFound { rule_book_id })
            }
            other => Ok(other?),
        }
    }

    /// Normalize and translate an analysis's selections into filter
    /// criteria. Legacy brace literals and delimited strings are
    /// recovered here; tokens are translated into the rule-book language.
    fn criteria(&self, analysis: &ProjectAnalysis) -> FilterCriteria {
        let new_use = self.translator.translate_all(&normalize_all(&analysis.new_use));
        let fulfillability = self
            .translator
            .translate_all(&normalize_all(&analysis.fulfillability));
        FilterCriteria::new(&new_use, &fulfillability)
    }

    /// All rule books narrowed to the entries applying to the analysis,
    /// most recently imported first. Empty criteria narrow every book to
    /// zero entries.
    pub fn filtered_rule_books(
        &self,
        analysis_id: i64,
    ) -> Result<Vec<FilteredRuleBook>, AnalysisError> {
        self.filtered_rule_books_with(analysis_id, None, None)
    }

    /// Like [`filtered_rule_books`](Self::filtered_rule_books), but with
    /// ad-hoc selection overrides (used to preview a changed selection
    /// before it is saved). `None` falls back to the stored selection.
    pub fn filtered_rule_books_with(
        &self,
        analysis_id: i64,
        new_use: Option<&[String]>,
        fulfillability: Option<&[String]>,
    ) -> Result<Vec<FilteredRuleBook>, AnalysisError> {
        let analysis = self.lookup_analysis(analysis_id)?;
        let new_use = new_use.unwrap_or(&analysis.new_use);
        let fulfillability = fulfillability.unwrap_or(&analysis.fulfillability);
        let criteria = FilterCriteria::new(
            &self.translator.translate_all(&normalize_all(new_use)),
            &self.translator.translate_all(&normalize_all(fulfillability)),
        );

        let mut books = Vec::new();
        for rule_book in self.store.rule_books()? {
            let details = self.lookup_book(rule_book.id)?;
            let entries = filter_entries(
                &details.entries,
                &criteria,
                &self.config.columns,
                &self.config.matching,
            )
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
            tracing::debug!(
                analysis_id,
                rule_book_id = rule_book.id,
                total = details.entries.len(),
                matched = entries.len(),
                "filtered rule book"
            );
            books.push(FilteredRuleBook { rule_book, entries });
        }
        Ok(books)
    }

    /// Segment statistics for every rule book, joined against stored
    /// decisions.
    pub fn segmented_rule_book_data(
        &self,
        analysis_id: i64,
    ) -> Result<Vec<SegmentedRuleBook>, AnalysisError> {
        let analysis = self.lookup_analysis(analysis_id)?;
        let criteria = self.criteria(&analysis);
        let results = self.results_by_entry(analysis_id)?;

        let mut books = Vec::new();
        for rule_book in self.store.rule_books()? {
            let details = self.lookup_book(rule_book.id)?;
            let progress = self.book_progress(&details, &criteria, &results);
            books.push(SegmentedRuleBook {
                rule_book,
                progress,
            });
        }
        Ok(books)
    }

    /// The flat global segment sequence: rule books most recently
    /// imported first, segments in discovery order within each book.
    pub fn ordered_segments(&self, analysis_id: i64) -> Result<Vec<SegmentRef>, AnalysisError> {
        let analysis = self.lookup_analysis(analysis_id)?;
        let criteria = self.criteria(&analysis);

        let mut sequence = Vec::new();
        for rule_book in self.store.rule_books()? {
            let details = self.lookup_book(rule_book.id)?;
            let filtered = filter_entries(
                &details.entries,
                &criteria,
                &self.config.columns,
                &self.config.matching,
            );
            for segment in self.segmenter.segment(&filtered) {
                sequence.push(SegmentRef {
                    rule_book_id: rule_book.id,
                    segment_key: segment.key,
                });
            }
        }
        Ok(sequence)
    }

    /// The segment following `current` in the global sequence, or `None`
    /// at the end of the analysis.
    pub fn next_segment(
        &self,
        analysis_id: i64,
        current: &SegmentRef,
    ) -> Result<Option<SegmentRef>, AnalysisError> {
        let sequence = self.ordered_segments(analysis_id)?;
        Ok(next_segment(&sequence, current).cloned())
    }

    /// True once every rule book's parameters are reviewed. Gates the
    /// downstream results view.
    pub fn analysis_complete(&self, analysis_id: i64) -> Result<bool, AnalysisError> {
        let books = self.segmented_rule_book_data(analysis_id)?;
        let progress: Vec<_> = books.into_iter().map(|b| b.progress).collect();
        Ok(progress::analysis_complete(&progress))
    }

    /// One segment's entries with live decision data, for editing.
    ///
    /// Fails with [`AnalysisError::CriteriaNotSet`] when the analysis has
    /// no normalized usage selection — distinct from a segment that
    /// legitimately matches nothing, which yields an empty entry list.
    pub fn segment_details(
        &self,
        analysis_id: i64,
        rule_book_id: i64,
        segment_key: &str,
    ) -> Result<SegmentDetails, AnalysisError> {
        let analysis = self.lookup_analysis(analysis_id)?;
        if normalize_all(&analysis.new_use).is_empty() {
            return Err(AnalysisError::CriteriaNotSet { analysis_id });
        }
        let criteria = self.criteria(&analysis);

        let details = self.lookup_book(rule_book_id)?;
        let filtered = filter_entries(
            &details.entries,
            &criteria,
            &self.config.columns,
            &self.config.matching,
        );

        let mut entries = Vec::new();
        for segment in self.segmenter.segment(&filtered) {
            if segment.key != segment_key {
                continue;
            }
            for entry in segment.entries {
                let result = self.store.find(analysis_id, entry.id)?;
                entries.push(EntryWithResult {
                    entry: entry.clone(),
                    result,
                });
            }
        }
        tracing::debug!(
            analysis_id,
            rule_book_id,
            segment_key,
            entries = entries.len(),
            "segment details"
        );

        Ok(SegmentDetails {
            project_analysis: analysis,
            rule_book: details.rule_book,
            segment_key: segment_key.to_string(),
            entries,
            reference_tables: details.reference_tables,
        })
    }

    /// Persist one analyst decision.
    ///
    /// Statuses outside "not fulfilled"/"not verifiable" force the
    /// revised fulfillability to null, regardless of what the caller
    /// supplied in the same request.
    pub fn save_analysis_result(&self, request: SaveResultRequest) -> Result<(), AnalysisError> {
        let revised = match request.status {
            Some(status) if status.keeps_revision() => request.revised_fulfillability,
            _ => None,
        };
        tracing::info!(
            analysis_id = request.analysis_id,
            rule_book_id = request.rule_book_id,
            entry_id = request.entry_id,
            segment_key = %request.segment_key,
            status = ?request.status,
            revised = ?revised,
            "saving analysis result"
        );
        self.store
            .upsert(request.analysis_id, request.entry_id, request.status, revised)?;
        Ok(())
    }

    /// Aggregate decision counts per category, for charting.
    pub fn analysis_result_data(&self, analysis_id: i64) -> Result<ResultBreakdown, AnalysisError> {
        let mut breakdown = ResultBreakdown::default();
        for result in self.store.list_by_analysis(analysis_id)? {
            if let Some(status) = result.status {
                *breakdown.checklist.entry(status.as_str()).or_insert(0) += 1;
            }
            if let Some(revised) = result.revised_fulfillability {
                *breakdown.fulfillability.entry(revised.as_str()).or_insert(0) += 1;
            }
        }
        Ok(breakdown)
    }

    fn results_by_entry(
        &self,
        analysis_id: i64,
    ) -> Result<FxHashMap<i64, AnalysisResult>, AnalysisError> {
        let mut map = FxHashMap::default();
        for result in self.store.list_by_analysis(analysis_id)? {
            map.insert(result.entry_id, result);
        }
        Ok(map)
    }

    fn book_progress(
        &self,
        details: &RuleBookDetails,
        criteria: &FilterCriteria,
        results: &FxHashMap<i64, AnalysisResult>,
    ) -> RuleBookProgress {
        let filtered = filter_entries(
            &details.entries,
            criteria,
            &self.config.columns,
            &self.config.matching,
        );
        let segments = self.segmenter.segment(&filtered);
        progress::compute(
            details.rule_book.id,
            &segments,
            results,
            &self.config.columns,
            &self.config.matching,
        )
    }
}
