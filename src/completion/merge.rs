//! Deterministic overlap stripping between a raw suggestion and the text
//! already adjacent to the cursor.
//!
//! A model shown a wide context often reproduces the line it was given;
//! inserting its output verbatim would double tokens on either side of the
//! cursor. The resolver drops the longest suffix of `before` that prefixes
//! the suggestion, then the longest prefix of `after` that suffixes what
//! remains.

/// Compute the minimal non-duplicating insertion for a suggestion. Total:
/// handles empty strings, never strips more than the suggestion itself,
/// and only splits at UTF-8 boundaries.
pub fn merge(before: &str, after: &str, suggestion: &str) -> String {
    let lead = suffix_prefix_overlap(before, suggestion);
    let remainder = &suggestion[lead..];
    let trail = prefix_suffix_overlap(after, remainder);
    remainder[..remainder.len() - trail].to_string()
}

/// Length of the longest suffix of `before` that is a prefix of
/// `suggestion`.
fn suffix_prefix_overlap(before: &str, suggestion: &str) -> usize {
    let max = before.len().min(suggestion.len());
    for len in (1..=max).rev() {
        if !suggestion.is_char_boundary(len) || !before.is_char_boundary(before.len() - len) {
            continue;
        }
        if before[before.len() - len..] == suggestion[..len] {
            return len;
        }
    }
    0
}

/// Length of the longest prefix of `after` that is a suffix of
/// `suggestion`.
fn prefix_suffix_overlap(after: &str, suggestion: &str) -> usize {
    let max = after.len().min(suggestion.len());
    for len in (1..=max).rev() {
        if !after.is_char_boundary(len) || !suggestion.is_char_boundary(suggestion.len() - len) {
            continue;
        }
        if after[..len] == suggestion[suggestion.len() - len..] {
            return len;
        }
    }
    0
}
