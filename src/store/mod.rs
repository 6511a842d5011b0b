//! # Content Store Module
//!
//! Persisted text files behind a `StorageBackend`, mirrored into
//! `FileRecord` caches by `ContentStore`.

mod backend;
mod content;
mod local;

pub use backend::StorageBackend;
pub use content::{is_valid_timestamp_format, ContentStore, DEFAULT_TIMESTAMP_FORMAT};
pub use local::LocalBackend;
