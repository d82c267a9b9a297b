//! Filtering of rule-book entries against an analysis's selections.
//!
//! Two independent per-entry checks, both of which must pass:
//! fulfillability is case-insensitive exact-value membership, usage is
//! word-overlap with a higher bar for verbose labels. A blank or
//! placeholder field never excludes an entry — "not specified" means
//! "applies universally".

use normcheck_core::config::{ColumnConfig, MatchConfig};
use normcheck_core::types::collections::FxHashSet;
use normcheck_core::types::RuleBookEntry;

/// Normalized, translated, lower-cased selections of one analysis.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// Pooled words from all selected new-use tags.
    usage_words: FxHashSet<String>,
    /// Exact lower-cased fulfillability values.
    fulfillability: FxHashSet<String>,
    usage_empty: bool,
    fulfillability_empty: bool,
}

impl FilterCriteria {
    /// Build criteria from already normalized and translated tag lists.
    /// Tokenization and lower-casing happen here, once.
    pub fn new(new_use: &[String], fulfillability: &[String]) -> Self {
        let mut usage_words = FxHashSet::default();
        for tag in new_use {
            for word in tokenize(tag) {
                usage_words.insert(word);
            }
        }
        let fulfillability_set: FxHashSet<String> = fulfillability
            .iter()
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect();
        Self {
            usage_empty: new_use.is_empty(),
            fulfillability_empty: fulfillability.is_empty(),
            usage_words,
            fulfillability: fulfillability_set,
        }
    }

    /// True if either selection is missing. An analysis with no declared
    /// usage or fulfillability matches nothing.
    pub fn is_empty(&self) -> bool {
        self.usage_empty || self.fulfillability_empty
    }
}

/// Split free text into lower-cased words. `,`, `;` and `/` count as
/// separators in addition to whitespace; empty tokens are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.replace([',', ';', '/'], " ")
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect()
}

/// Return the entries that apply to the given criteria, in input order.
pub fn filter_entries<'a>(
    entries: &'a [RuleBookEntry],
    criteria: &FilterCriteria,
    columns: &ColumnConfig,
    matching: &MatchConfig,
) -> Vec<&'a RuleBookEntry> {
    if criteria.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| {
            fulfillability_matches(entry, criteria, columns, matching)
                && usage_matches(entry, criteria, columns, matching)
        })
        .collect()
}

/// Exact-value membership, never token overlap.
fn fulfillability_matches(
    entry: &RuleBookEntry,
    criteria: &FilterCriteria,
    columns: &ColumnConfig,
    matching: &MatchConfig,
) -> bool {
    let value = entry.column(columns.effective_fulfillability());
    if matching.is_unspecified(value) {
        return true;
    }
    criteria.fulfillability.contains(&value.to_lowercase())
}

/// Word-overlap matching. Single-word labels match on any shared word;
/// labels at or above the threshold length need `threshold` shared words,
/// which keeps verbose labels from matching on one common filler word.
fn usage_matches(
    entry: &RuleBookEntry,
    criteria: &FilterCriteria,
    columns: &ColumnConfig,
    matching: &MatchConfig,
) -> bool {
    let value = entry.column(columns.effective_usage());
    if matching.is_unspecified(value) {
        return true;
    }

    let entry_words = tokenize(value);
    let overlap = entry_words
        .iter()
        .filter(|w| criteria.usage_words.contains(*w))
        .count();
    let threshold = matching.effective_usage_overlap_threshold();

    overlap >= threshold || (entry_words.len() < threshold && overlap > 0)
}
