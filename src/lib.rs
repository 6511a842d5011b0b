//! filekeep - create, read, edit, search and delete text files
//!
//! - [`store::ContentStore`] owns all persisted-file I/O and keeps each
//!   [`record::FileRecord`] cache equal to the bytes on disk
//! - [`search::SearchEngine`] locates and counts characters or words in a
//!   record's cached content
//! - [`walk::find_in_tree`] finds a file by name under a directory
//!
//! All operations are synchronous and single-writer. Nothing coordinates
//! two records or two processes pointing at the same file.

pub mod cli;
pub mod errors;
pub mod observability;
pub mod record;
pub mod search;
pub mod store;
pub mod walk;

pub use errors::{ErrorCode, FileError, FileResult, Operation};
pub use record::{FileRecord, RecordState};
pub use search::{SearchEngine, SearchMode};
pub use store::{ContentStore, LocalBackend, StorageBackend};
pub use walk::{find_in_tree, DirectorySearch};
