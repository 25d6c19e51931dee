//! Ghost-text completion
//!
//! The first filtered suggestion is the best match; the ghost is whatever of it
//! lies beyond what the user already typed, always finishing on a separator so
//! accepting it opens the next directory level.

use crate::path::ends_with_separator;

/// Inline completion for `raw_value` given the already-filtered suggestions.
///
/// Empty when `raw_value` ends with the separator, when there is nothing to
/// complete from, or when the best match does not extend `raw_value`
/// (case-insensitively).
pub fn inline_completion(raw_value: &str, filtered: &[String], separator: char) -> String {
    if raw_value.is_empty() || ends_with_separator(raw_value, separator) {
        return String::new();
    }

    let Some(best) = filtered.first() else {
        return String::new();
    };

    let (Some(head), Some(tail)) = (best.get(..raw_value.len()), best.get(raw_value.len()..))
    else {
        return String::new();
    };

    if head.to_lowercase() != raw_value.to_lowercase() {
        return String::new();
    }

    let mut completion = tail.to_string();
    if !completion.ends_with(separator) {
        completion.push(separator);
    }
    completion
}

#[cfg(test)]
#[path = "inline_tests.rs"]
mod inline_tests;
