//! Flat segment sequence for "next unreviewed segment" navigation.
//!
//! The sequence is recomputed per request from current rule-book data,
//! never persisted as a cursor, so navigation stays consistent even if
//! entries changed since the analysis began.

use serde::{Deserialize, Serialize};

/// Position of one segment in the global review sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRef {
    pub rule_book_id: i64,
    pub segment_key: String,
}

/// The segment following `current` in the flat sequence, or `None` when
/// `current` is last or absent. Linear scan by design — the sequence is
/// bounded by segment count, not entry count.
pub fn next_segment<'a>(sequence: &'a [SegmentRef], current: &SegmentRef) -> Option<&'a SegmentRef> {
    let index = sequence.iter().position(|s| s == current)?;
    sequence.get(index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(rule_book_id: i64, key: &str) -> SegmentRef {
        SegmentRef {
            rule_book_id,
            segment_key: key.to_string(),
        }
    }

    #[test]
    fn advances_within_and_across_rule_books() {
        let sequence = vec![seg(2, "1"), seg(2, "3"), seg(1, "1")];
        assert_eq!(next_segment(&sequence, &seg(2, "1")), Some(&seg(2, "3")));
        // Same key, different book: crosses the book boundary.
        assert_eq!(next_segment(&sequence, &seg(2, "3")), Some(&seg(1, "1")));
    }

    #[test]
    fn end_of_sequence_and_unknown_position_yield_none() {
        let sequence = vec![seg(1, "1"), seg(1, "2")];
        assert_eq!(next_segment(&sequence, &seg(1, "2")), None);
        assert_eq!(next_segment(&sequence, &seg(9, "1")), None);
        assert_eq!(next_segment(&[], &seg(1, "1")), None);
    }
}
