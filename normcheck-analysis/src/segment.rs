//! Segmentation of filtered entries by hierarchical outline code.
//!
//! The outline column usually carries a code only on the first row of a
//! subsection ("3.2.1 ..."), with continuation rows left blank, so keys
//! carry forward. Segmentation is an explicit fold over the ordered
//! slice — order is correctness-critical here and must never be traded
//! for a group-by that reorders.

use normcheck_core::types::collections::FxHashMap;
use normcheck_core::types::RuleBookEntry;
use regex::Regex;

/// Key assigned to leading entries that have no code and no predecessor
/// with one.
pub const FALLBACK_KEY: &str = "0";

/// One group of entries sharing a derived outline key.
#[derive(Debug)]
pub struct Segment<'a> {
    pub key: String,
    /// Entries in their original (import) order.
    pub entries: Vec<&'a RuleBookEntry>,
}

/// Derives segment keys from outline codes.
pub struct Segmenter {
    leading_digits: Regex,
    paragraph_sign: Regex,
    outline_column: String,
}

impl Segmenter {
    /// Compile the outline patterns once. The patterns are fixed, so
    /// construction cannot fail at runtime.
    pub fn new(outline_column: &str) -> Self {
        Self {
            leading_digits: Regex::new(r"^\d+").expect("static pattern"),
            paragraph_sign: Regex::new(r"^§\s*(\d+)").expect("static pattern"),
            outline_column: outline_column.to_string(),
        }
    }

    /// The entry's own key, if its outline code supplies one: a leading
    /// digit run, or the digits of a paragraph-sign form ("§ 14").
    pub fn own_key(&self, outline: &str) -> Option<String> {
        let trimmed = outline.trim();
        if let Some(m) = self.leading_digits.find(trimmed) {
            return Some(m.as_str().to_string());
        }
        if let Some(captures) = self.paragraph_sign.captures(trimmed) {
            return Some(captures[1].to_string());
        }
        None
    }

    /// Group ordered entries into segments, in key discovery order.
    ///
    /// Entries without an own key inherit the most recently seen key;
    /// leading entries with no key yet fall into [`FALLBACK_KEY`].
    /// Keys are strings and stay in discovery order — no numeric sort.
    pub fn segment<'a>(&self, entries: &[&'a RuleBookEntry]) -> Vec<Segment<'a>> {
        let mut segments: Vec<Segment<'a>> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut current = FALLBACK_KEY.to_string();

        for entry in entries {
            if let Some(key) = self.own_key(entry.column(&self.outline_column)) {
                current = key;
            }
            match index.get(&current) {
                Some(&i) => segments[i].entries.push(entry),
                None => {
                    index.insert(current.clone(), segments.len());
                    segments.push(Segment {
                        key: current.clone(),
                        entries: vec![entry],
                    });
                }
            }
        }

        segments
    }
}
