//! Rule analysis engine.
//!
//! Pure, re-entrant computation over rule-book entries: filtering by a
//! project's declared usage and fulfillability, segmentation by outline
//! code with carry-forward, per-segment progress statistics, and flat
//! segment navigation. Nothing here caches derived state — every request
//! recomputes against current storage, so results are always consistent
//! with the latest data.

pub mod engine;
pub mod filter;
pub mod navigator;
pub mod normalize;
pub mod progress;
pub mod segment;
pub mod vocabulary;

pub use engine::AnalysisEngine;
pub use filter::{filter_entries, FilterCriteria};
pub use navigator::{next_segment, SegmentRef};
pub use normalize::{normalize_all, normalize_field};
pub use progress::{is_completed, RuleBookProgress, SegmentStats};
pub use segment::{Segment, Segmenter};
pub use vocabulary::Translator;
