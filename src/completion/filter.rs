//! Client-side re-filtering of server suggestions
//!
//! The server already filters by prefix, but its answer may belong to an older
//! query or be broader than what is typed now. This pass is the final word on
//! what the dropdown shows.

use crate::path::{basename, ends_with_separator, starts_with_ignore_case};

/// Keep the suggestions whose basename starts with the typed basename of `raw_value`.
///
/// When `raw_value` ends with the separator, or nothing has been typed after the
/// last separator, every suggestion is kept unchanged. Order is preserved.
pub fn filter_suggestions(raw_value: &str, suggestions: &[String], separator: char) -> Vec<String> {
    let typed = basename(raw_value, separator);

    if ends_with_separator(raw_value, separator) || typed.is_empty() {
        return suggestions.to_vec();
    }

    suggestions
        .iter()
        .filter(|suggestion| starts_with_ignore_case(basename(suggestion, separator), typed))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod filter_tests;
