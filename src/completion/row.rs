use crate::path::{basename, ends_with_separator, parent_with_separator, starts_with_ignore_case};

/// A dropdown row split into what the user already typed and what accepting adds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowParts {
    pub typed: String,
    pub remaining: String,
}

pub fn split_row(raw_value: &str, suggestion: &str, separator: char) -> RowParts {
    if ends_with_separator(raw_value, separator) {
        let remaining = match suggestion.get(raw_value.len()..) {
            Some(rest) if starts_with_ignore_case(suggestion, raw_value) => rest,
            _ => basename(suggestion, separator),
        };
        return RowParts {
            typed: raw_value.to_string(),
            remaining: remaining.to_string(),
        };
    }

    let parent = match parent_with_separator(raw_value, separator) {
        "" => separator.to_string(),
        parent => parent.to_string(),
    };
    let typed_base = basename(raw_value, separator);
    let suggestion_base = suggestion
        .get(parent.len()..)
        .unwrap_or_else(|| basename(suggestion, separator));

    if starts_with_ignore_case(suggestion, &parent)
        && starts_with_ignore_case(suggestion_base, typed_base)
        && let Some(rest) = suggestion_base.get(typed_base.len()..)
    {
        return RowParts {
            typed: format!("{}{}", parent, typed_base),
            remaining: rest.to_string(),
        };
    }

    RowParts {
        typed: parent,
        remaining: suggestion_base.to_string(),
    }
}
