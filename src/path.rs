//! Separator-aware string helpers
//!
//! Field values are remote NAS paths, not local ones, so these work on plain
//! strings with a configurable separator instead of `std::path`.

/// Trailing segment after the last separator (the whole string when there is none)
pub fn basename(path: &str, separator: char) -> &str {
    match path.rfind(separator) {
        Some(idx) => &path[idx + separator.len_utf8()..],
        None => path,
    }
}

/// Everything up to and including the last separator ("" when there is none)
pub fn parent_with_separator(path: &str, separator: char) -> &str {
    match path.rfind(separator) {
        Some(idx) => &path[..idx + separator.len_utf8()],
        None => "",
    }
}

pub fn ends_with_separator(path: &str, separator: char) -> bool {
    path.ends_with(separator)
}

/// Append the separator unless already present
pub fn with_trailing_separator(path: &str, separator: char) -> String {
    let mut owned = path.to_string();
    if !owned.ends_with(separator) {
        owned.push(separator);
    }
    owned
}

/// Case-insensitive `starts_with`
pub fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.to_lowercase().starts_with(&prefix.to_lowercase())
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod path_tests;
