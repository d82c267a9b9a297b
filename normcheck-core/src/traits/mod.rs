//! Trait seams between the engine and its storage backend.

pub mod stores;

pub use stores::{AnalysisStore, ResultStore, RuleBookDetails, RuleBookStore};
