//! Folder-path autocompletion and validation for NAS path entry fields.
//!
//! A [`PathField`] combines a debounced remote suggestion fetch, client-side
//! prefix filtering, an inline ghost completion, keyboard and pointer
//! navigation, and an independent debounced validator that may normalize the
//! value. The host owns the clock and the event loop; the field owns its
//! timers and in-flight requests.

pub mod api;
pub mod cache;
pub mod completion;
pub mod config;
pub mod debouncer;
pub mod error;
pub mod field;
pub mod pair;
pub mod path;
pub mod render;
pub mod widgets;

#[cfg(test)]
mod test_utils;

pub use api::{HttpPathApi, PathApi};
pub use cache::{MemoryCache, PathCache, TomlFileCache};
pub use error::ApiError;
pub use field::{FieldError, FieldOptions, KeyOutcome, PathField, Validity};
pub use pair::PairCheck;
