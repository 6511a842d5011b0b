//! FileRecord: an open file and its cached content
//!
//! A record is only produced by `ContentStore::open`. After every successful
//! store operation `size` equals the byte length of `content`, and both match
//! the bytes persisted at `name`. Edits made outside the engine are not
//! observed until `ContentStore::refresh`.
//!
//! One record maps to one path. Two records targeting the same path are not
//! coordinated.

use std::path::{Path, PathBuf};

use crate::errors::{FileError, FileResult, Operation};

/// Lifecycle state of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Backed by an existing file
    Active,
    /// File was deleted through `ContentStore::delete_file`
    Destroyed,
}

/// An open text file with a cached mirror of its content
#[derive(Debug)]
pub struct FileRecord {
    name: PathBuf,
    content: String,
    size: u64,
    state: RecordState,
}

impl FileRecord {
    pub(crate) fn new(name: PathBuf, content: String) -> Self {
        let size = content.len() as u64;
        Self {
            name,
            content,
            size,
            state: RecordState::Active,
        }
    }

    /// Path of the backing file
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Cached content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cached size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == RecordState::Destroyed
    }

    /// Fails with `InvalidOperation` once the record is destroyed.
    pub fn ensure_active(&self, operation: Operation) -> FileResult<()> {
        match self.state {
            RecordState::Active => Ok(()),
            RecordState::Destroyed => Err(FileError::invalid_operation(operation, &self.name)),
        }
    }

    pub(crate) fn replace_content(&mut self, content: String) {
        self.size = content.len() as u64;
        self.content = content;
    }

    pub(crate) fn push_content(&mut self, content: &str) {
        self.content.push_str(content);
        self.size = self.content.len() as u64;
    }

    pub(crate) fn destroy(&mut self) {
        self.content.clear();
        self.size = 0;
        self.state = RecordState::Destroyed;
    }
}
