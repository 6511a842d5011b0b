//! Search within a record's content
//!
//! Targets of at most one character are matched character by character;
//! longer targets are matched against whole whitespace-separated tokens.

mod engine;
mod query;

pub use engine::SearchEngine;
pub use query::{SearchMode, SearchQuery};
