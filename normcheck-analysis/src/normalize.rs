//! Normalization of heterogeneous multi-value fields.
//!
//! Legacy storage returns selection sets in three shapes: a clean list
//! of strings, a single comma-delimited string, or a brace literal like
//! `{"Office","Retail"}` (an array-typed column serialized to text).
//! Everything funnels through here before filtering. Malformed input
//! degrades to best-effort splitting — never an error.

/// Split one raw field value into trimmed strings.
///
/// Brace literals are unwrapped and stripped of quoting artifacts;
/// anything else is split on commas. Empty input yields an empty list.
pub fn normalize_field(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let braced = trimmed.starts_with('{') && trimmed.ends_with('}');
    let inner = if braced {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(',')
        .map(|piece| {
            // Quoting artifacts only exist inside brace literals; plain
            // values keep their characters verbatim.
            if braced {
                piece.replace(['"', '\''], "").trim().to_string()
            } else {
                piece.trim().to_string()
            }
        })
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Flatten a stored list through [`normalize_field`].
///
/// A clean list passes through element-wise (a plain string without
/// delimiters normalizes to itself); a single malformed element expands
/// into its pieces.
pub fn normalize_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| normalize_field(value))
        .collect()
}
