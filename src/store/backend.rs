//! # Storage Backend Trait

use std::io;
use std::path::Path;

/// Byte-level access to persisted text files.
///
/// Errors are plain `io::Error`s; `ContentStore` labels them with the
/// operation and target before they reach callers.
pub trait StorageBackend: std::fmt::Debug {
    /// Create `path` exclusively and write `data` to it
    fn create_new(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Read all bytes at `path`
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the bytes at `path` with `data`, all or nothing
    fn replace(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Append `data` to the existing file at `path`
    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Remove the file at `path`
    fn remove(&self, path: &Path) -> io::Result<()>;
}
