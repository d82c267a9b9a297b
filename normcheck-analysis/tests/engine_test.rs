//! End-to-end engine tests against the SQLite store.

use normcheck_analysis::engine::SaveResultRequest;
use normcheck_analysis::navigator::SegmentRef;
use normcheck_analysis::vocabulary::Translator;
use normcheck_analysis::AnalysisEngine;
use normcheck_core::config::NormcheckConfig;
use normcheck_core::errors::AnalysisError;
use normcheck_core::types::collections::FxHashMap;
use normcheck_core::types::{ChecklistStatus, Fulfillability};
use normcheck_storage::SqliteStore;

fn entry_row(outline: &str, usage: &str, column_type: &str) -> FxHashMap<String, String> {
    let mut row = FxHashMap::default();
    row.insert("outline".to_string(), outline.to_string());
    row.insert("usage".to_string(), usage.to_string());
    row.insert("column_type".to_string(), column_type.to_string());
    row.insert("fulfillability".to_string(), String::new());
    row
}

fn engine() -> AnalysisEngine<SqliteStore> {
    let store = SqliteStore::open_in_memory().unwrap();
    AnalysisEngine::new(store, Translator::identity(), NormcheckConfig::default())
}

/// The three-entry scenario: single-word match, blank auto-pass, and a
/// two-word label excluded on a one-word overlap.
fn import_office_book(engine: &AnalysisEngine<SqliteStore>) -> i64 {
    engine
        .store()
        .import_rule_book(
            "Building Code",
            "2024",
            1,
            &[
                entry_row("1.1", "Office", "Parameter"),
                entry_row("", "", "Parameter"),
                entry_row("2.1", "Residential Office", "Informational"),
            ],
            &[],
        )
        .unwrap()
        .id
}

fn office_analysis(engine: &AnalysisEngine<SqliteStore>) -> i64 {
    engine
        .store()
        .create_analysis(1, &["Office".to_string()], &["Light".to_string()])
        .unwrap()
        .id
}

#[test]
fn filtering_excludes_verbose_label_with_single_overlap() {
    let engine = engine();
    import_office_book(&engine);
    let analysis_id = office_analysis(&engine);

    let books = engine.filtered_rule_books(analysis_id).unwrap();
    assert_eq!(books.len(), 1);
    let usages: Vec<_> = books[0]
        .entries
        .iter()
        .map(|e| e.column("usage").to_string())
        .collect();
    // "Residential Office" shares only one word with the pooled set.
    assert_eq!(usages, vec!["Office", ""]);
}

#[test]
fn segmentation_groups_the_filtered_entries_under_one_key() {
    let engine = engine();
    import_office_book(&engine);
    let analysis_id = office_analysis(&engine);

    let books = engine.segmented_rule_book_data(analysis_id).unwrap();
    assert_eq!(books.len(), 1);
    let progress = &books[0].progress;
    assert_eq!(progress.segments.len(), 1);
    assert_eq!(progress.segments[0].key, "1");
    assert_eq!(progress.segments[0].total_rows, 2);
    assert_eq!(progress.segments[0].total_parameters, 2);
    assert_eq!(progress.segments[0].completed_parameters, 0);
    assert!(!engine.analysis_complete(analysis_id).unwrap());
}

#[test]
fn not_verifiable_needs_a_revision_before_it_counts() {
    let engine = engine();
    let book_id = import_office_book(&engine);
    let analysis_id = office_analysis(&engine);

    let details = engine.segment_details(analysis_id, book_id, "1").unwrap();
    let entry_id = details.entries[0].entry.id;

    // Status alone leaves the row uncompleted.
    engine
        .save_analysis_result(SaveResultRequest {
            analysis_id,
            rule_book_id: book_id,
            entry_id,
            segment_key: "1".to_string(),
            status: Some(ChecklistStatus::NotVerifiable),
            revised_fulfillability: None,
        })
        .unwrap();
    let books = engine.segmented_rule_book_data(analysis_id).unwrap();
    assert_eq!(books[0].progress.segments[0].completed_parameters, 0);

    // Adding the revision completes exactly this row.
    engine
        .save_analysis_result(SaveResultRequest {
            analysis_id,
            rule_book_id: book_id,
            entry_id,
            segment_key: "1".to_string(),
            status: Some(ChecklistStatus::NotVerifiable),
            revised_fulfillability: Some(Fulfillability::Medium),
        })
        .unwrap();
    let books = engine.segmented_rule_book_data(analysis_id).unwrap();
    assert_eq!(books[0].progress.segments[0].completed_parameters, 1);
}

#[test]
fn conclusive_status_clears_a_supplied_revision() {
    let engine = engine();
    let book_id = import_office_book(&engine);
    let analysis_id = office_analysis(&engine);
    let details = engine.segment_details(analysis_id, book_id, "1").unwrap();
    let entry_id = details.entries[0].entry.id;

    engine
        .save_analysis_result(SaveResultRequest {
            analysis_id,
            rule_book_id: book_id,
            entry_id,
            segment_key: "1".to_string(),
            status: Some(ChecklistStatus::Fulfilled),
            revised_fulfillability: Some(Fulfillability::Heavy),
        })
        .unwrap();

    let details = engine.segment_details(analysis_id, book_id, "1").unwrap();
    let saved = details.entries[0].result.as_ref().unwrap();
    assert_eq!(saved.status, Some(ChecklistStatus::Fulfilled));
    assert_eq!(saved.revised_fulfillability, None);
}

#[test]
fn ordered_segments_walk_books_most_recent_first() {
    let engine = engine();
    let older = import_office_book(&engine);
    let newer = engine
        .store()
        .import_rule_book(
            "Fire Code",
            "2025",
            1,
            &[
                entry_row("§ 3 General", "Office", "Parameter"),
                entry_row("§ 7", "", "Parameter"),
            ],
            &[],
        )
        .unwrap()
        .id;
    let analysis_id = office_analysis(&engine);

    let sequence = engine.ordered_segments(analysis_id).unwrap();
    let refs: Vec<_> = sequence
        .iter()
        .map(|s| (s.rule_book_id, s.segment_key.as_str()))
        .collect();
    assert_eq!(refs, vec![(newer, "3"), (newer, "7"), (older, "1")]);

    let next = engine
        .next_segment(
            analysis_id,
            &SegmentRef {
                rule_book_id: newer,
                segment_key: "7".to_string(),
            },
        )
        .unwrap();
    assert_eq!(
        next,
        Some(SegmentRef {
            rule_book_id: older,
            segment_key: "1".to_string(),
        })
    );

    // Last segment: end of the analysis.
    let at_end = engine
        .next_segment(
            analysis_id,
            &SegmentRef {
                rule_book_id: older,
                segment_key: "1".to_string(),
            },
        )
        .unwrap();
    assert_eq!(at_end, None);
}

#[test]
fn analysis_completes_once_every_parameter_is_reviewed() {
    let engine = engine();
    let book_id = import_office_book(&engine);
    let analysis_id = office_analysis(&engine);

    let details = engine.segment_details(analysis_id, book_id, "1").unwrap();
    for entry in &details.entries {
        engine
            .save_analysis_result(SaveResultRequest {
                analysis_id,
                rule_book_id: book_id,
                entry_id: entry.entry.id,
                segment_key: "1".to_string(),
                status: Some(ChecklistStatus::Fulfilled),
                revised_fulfillability: None,
            })
            .unwrap();
    }
    assert!(engine.analysis_complete(analysis_id).unwrap());
}

#[test]
fn segment_details_requires_usage_criteria() {
    let engine = engine();
    let book_id = import_office_book(&engine);
    let analysis_id = engine.store().create_analysis(1, &[], &[]).unwrap().id;

    let err = engine.segment_details(analysis_id, book_id, "1").unwrap_err();
    assert!(matches!(err, AnalysisError::CriteriaNotSet { .. }));
}

#[test]
fn missing_ids_surface_as_engine_not_found_errors() {
    let engine = engine();
    let book_id = import_office_book(&engine);
    let analysis_id = office_analysis(&engine);

    let err = engine.filtered_rule_books(analysis_id + 99).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::AnalysisNotFound { analysis_id: id } if id == analysis_id + 99
    ));

    let err = engine
        .segment_details(analysis_id, book_id + 99, "1")
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::RuleBookNotFound { rule_book_id: id } if id == book_id + 99
    ));
}

#[test]
fn legacy_brace_literal_criteria_filter_like_clean_lists() {
    let engine = engine();
    import_office_book(&engine);
    let legacy = engine
        .store()
        .create_analysis(1, &[r#"{"Office"}"#.to_string()], &[r#"{"Light"}"#.to_string()])
        .unwrap()
        .id;
    let clean = office_analysis(&engine);

    let legacy_books = engine.filtered_rule_books(legacy).unwrap();
    let clean_books = engine.filtered_rule_books(clean).unwrap();
    assert_eq!(legacy_books[0].entries.len(), clean_books[0].entries.len());
}

#[test]
fn selection_overrides_replace_the_stored_criteria() {
    let engine = engine();
    import_office_book(&engine);
    let analysis_id = engine.store().create_analysis(1, &[], &[]).unwrap().id;

    // Stored criteria are empty: nothing matches.
    assert!(engine.filtered_rule_books(analysis_id).unwrap()[0]
        .entries
        .is_empty());

    // An ad-hoc preview selection matches without saving anything.
    let books = engine
        .filtered_rule_books_with(
            analysis_id,
            Some(&["Office".to_string()]),
            Some(&["Light".to_string()]),
        )
        .unwrap();
    assert_eq!(books[0].entries.len(), 2);
}

#[test]
fn result_breakdown_omits_zero_count_categories() {
    let engine = engine();
    let book_id = import_office_book(&engine);
    let analysis_id = office_analysis(&engine);
    let details = engine.segment_details(analysis_id, book_id, "1").unwrap();
    let ids: Vec<_> = details.entries.iter().map(|e| e.entry.id).collect();

    engine
        .save_analysis_result(SaveResultRequest {
            analysis_id,
            rule_book_id: book_id,
            entry_id: ids[0],
            segment_key: "1".to_string(),
            status: Some(ChecklistStatus::NotFulfilled),
            revised_fulfillability: Some(Fulfillability::Light),
        })
        .unwrap();
    engine
        .save_analysis_result(SaveResultRequest {
            analysis_id,
            rule_book_id: book_id,
            entry_id: ids[1],
            segment_key: "1".to_string(),
            status: Some(ChecklistStatus::NotFulfilled),
            revised_fulfillability: Some(Fulfillability::Light),
        })
        .unwrap();

    let breakdown = engine.analysis_result_data(analysis_id).unwrap();
    assert_eq!(breakdown.checklist.get("not_fulfilled"), Some(&2));
    assert!(!breakdown.checklist.contains_key("fulfilled"));
    assert_eq!(breakdown.fulfillability.get("light"), Some(&2));
    assert!(!breakdown.fulfillability.contains_key("heavy"));
}

#[test]
fn translated_criteria_match_rule_book_language() {
    let store = SqliteStore::open_in_memory().unwrap();
    let translator = Translator::from_json(
        r#"{"use.office": "Büro"}"#,
        r#"{"use.office": "Office"}"#,
    )
    .unwrap();
    let engine = AnalysisEngine::new(store, translator, NormcheckConfig::default());

    import_office_book(&engine);
    let analysis_id = engine
        .store()
        .create_analysis(1, &["Büro".to_string()], &["Light".to_string()])
        .unwrap()
        .id;

    let books = engine.filtered_rule_books(analysis_id).unwrap();
    assert_eq!(books[0].entries.len(), 2);
}
