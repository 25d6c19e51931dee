mod filter;
mod inline;
mod row;
mod selection;

pub use filter::filter_suggestions;
pub use inline::inline_completion;
pub use row::{RowParts, split_row};
pub use selection::SelectionState;
