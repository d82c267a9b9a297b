//! Shared domain types for the rule analysis engine.

pub mod analysis;
pub mod collections;
pub mod rule_book;

pub use analysis::{AnalysisResult, ChecklistStatus, Fulfillability, ProjectAnalysis};
pub use rule_book::{ReferenceTable, RuleBook, RuleBookEntry};
