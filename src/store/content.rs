//! # Content Store
//!
//! Create, open, overwrite, append to, partially delete and delete text
//! files, keeping each `FileRecord` cache equal to the persisted bytes.
//!
//! Every mutation writes to the backend first and touches the cache only
//! after the backend reports success. A failed call leaves the record
//! exactly as it was.

use std::fmt::Write as _;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::Local;

use super::backend::StorageBackend;
use super::local::LocalBackend;
use crate::errors::{FileError, FileResult, Operation};
use crate::observability::{log_event, Event};
use crate::record::FileRecord;

/// Default preamble timestamp, e.g. `2024-05-01 13:45:12.123456`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Content operations over a storage backend
#[derive(Debug)]
pub struct ContentStore<B: StorageBackend = LocalBackend> {
    backend: B,
    timestamp_format: String,
}

impl ContentStore<LocalBackend> {
    /// Store over the local filesystem with default settings
    pub fn local() -> Self {
        Self::new(LocalBackend::new())
    }
}

impl<B: StorageBackend> ContentStore<B> {
    /// Create a store over `backend`
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Use a custom chrono format for the creation preamble
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Preamble written at the top of every created file.
    ///
    /// Falls back to the default format if the configured one is invalid.
    pub fn preamble(&self) -> String {
        let now = Local::now();
        let mut stamp = String::new();
        if write!(stamp, "{}", now.format(&self.timestamp_format)).is_err() {
            stamp = now.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
        }
        format!("Created at {}\n\n", stamp)
    }

    /// Create `path` exclusively with the preamble followed by `initial_content`.
    ///
    /// Does not open the file; call `open` for a record.
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if `path` exists (its bytes are left untouched),
    /// `IoError` for any other failure.
    pub fn create(&self, path: &Path, initial_content: &str) -> FileResult<()> {
        let mut data = self.preamble();
        data.push_str(initial_content);

        self.backend
            .create_new(path, data.as_bytes())
            .map_err(|e| self.fail(FileError::from_io(Operation::Create, path, e)))?;

        let bytes = data.len().to_string();
        log_event(
            Event::FileCreated,
            &[("path", display(path).as_str()), ("bytes", bytes.as_str())],
        );
        Ok(())
    }

    /// Open an existing file into a new record.
    ///
    /// # Errors
    ///
    /// `NotFound` if `path` does not exist, `IoError` if it cannot be read
    /// or is not UTF-8 text.
    pub fn open(&self, path: &Path) -> FileResult<FileRecord> {
        let content = self.read_text(Operation::Open, path)?;
        let record = FileRecord::new(path.to_path_buf(), content);

        let bytes = record.size().to_string();
        log_event(
            Event::FileOpened,
            &[("path", display(path).as_str()), ("bytes", bytes.as_str())],
        );
        Ok(record)
    }

    /// Cached content of `record`. No I/O.
    pub fn read<'r>(&self, record: &'r FileRecord) -> &'r str {
        record.content()
    }

    /// Re-read the persisted bytes into `record`, discarding the cache.
    ///
    /// Needed after the file was changed outside the engine.
    pub fn refresh(&self, record: &mut FileRecord) -> FileResult<()> {
        record.ensure_active(Operation::Refresh)?;

        let content = self.read_text(Operation::Refresh, record.name())?;
        record.replace_content(content);

        let bytes = record.size().to_string();
        log_event(
            Event::FileRefreshed,
            &[("path", display(record.name()).as_str()), ("bytes", bytes.as_str())],
        );
        Ok(())
    }

    /// Overwrite the file with `content`.
    pub fn write(&self, record: &mut FileRecord, content: &str) -> FileResult<()> {
        record.ensure_active(Operation::Write)?;

        self.backend
            .replace(record.name(), content.as_bytes())
            .map_err(|e| self.fail(FileError::from_io(Operation::Write, record.name(), e)))?;

        record.replace_content(content.to_string());

        let bytes = record.size().to_string();
        log_event(
            Event::FileWritten,
            &[("path", display(record.name()).as_str()), ("bytes", bytes.as_str())],
        );
        Ok(())
    }

    /// Append `content` to the end of the file.
    pub fn append(&self, record: &mut FileRecord, content: &str) -> FileResult<()> {
        record.ensure_active(Operation::Append)?;

        self.backend
            .append(record.name(), content.as_bytes())
            .map_err(|e| self.fail(FileError::from_io(Operation::Append, record.name(), e)))?;

        record.push_content(content);

        let appended = content.len().to_string();
        let bytes = record.size().to_string();
        log_event(
            Event::FileAppended,
            &[
                ("path", display(record.name()).as_str()),
                ("appended", appended.as_str()),
                ("bytes", bytes.as_str()),
            ],
        );
        Ok(())
    }

    /// Remove every non-overlapping occurrence of `item` (left to right,
    /// literal match) and rewrite the file.
    ///
    /// Returns the number of occurrences removed. An empty `item` removes
    /// nothing. On failure the cache keeps its pre-call content.
    pub fn delete_content(&self, record: &mut FileRecord, item: &str) -> FileResult<usize> {
        record.ensure_active(Operation::DeleteContent)?;

        let (remaining, removed) = remove_all(record.content(), item);

        self.backend
            .replace(record.name(), remaining.as_bytes())
            .map_err(|e| {
                self.fail(FileError::from_io(Operation::DeleteContent, record.name(), e))
            })?;

        record.replace_content(remaining);

        let removed_str = removed.to_string();
        let bytes = record.size().to_string();
        log_event(
            Event::ContentDeleted,
            &[
                ("path", display(record.name()).as_str()),
                ("removed", removed_str.as_str()),
                ("bytes", bytes.as_str()),
            ],
        );
        Ok(removed)
    }

    /// Delete the file. The record is destroyed and rejects every later
    /// store or search call with `InvalidOperation`.
    ///
    /// On failure the record stays active.
    pub fn delete_file(&self, record: &mut FileRecord) -> FileResult<()> {
        record.ensure_active(Operation::DeleteFile)?;

        self.backend
            .remove(record.name())
            .map_err(|e| self.fail(FileError::from_io(Operation::DeleteFile, record.name(), e)))?;

        record.destroy();

        log_event(Event::FileDeleted, &[("path", display(record.name()).as_str())]);
        Ok(())
    }

    fn read_text(&self, operation: Operation, path: &Path) -> FileResult<String> {
        let bytes = self
            .backend
            .read(path)
            .map_err(|e| self.fail(FileError::from_io(operation, path, e)))?;

        String::from_utf8(bytes).map_err(|e| {
            self.fail(FileError::io(
                operation,
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            ))
        })
    }

    fn fail(&self, err: FileError) -> FileError {
        let code = err.code().code();
        let operation = err.operation().as_str();
        let message = err.to_string();
        log_event(
            Event::StoreFailed,
            &[
                ("code", code),
                ("operation", operation),
                ("path", err.target()),
                ("message", message.as_str()),
            ],
        );
        err
    }
}

/// Whether `format` is a usable chrono strftime pattern
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Remove all non-overlapping occurrences of `item`, left to right.
fn remove_all(content: &str, item: &str) -> (String, usize) {
    if item.is_empty() {
        return (content.to_string(), 0);
    }
    let removed = content.matches(item).count();
    (content.replace(item, ""), removed)
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use std::cell::Cell;
    use std::io;
    use tempfile::TempDir;

    /// Delegates to the local backend but fails writes while `broken` is set
    #[derive(Debug, Default)]
    struct FlakyBackend {
        inner: LocalBackend,
        broken: Cell<bool>,
    }

    impl FlakyBackend {
        fn check(&self) -> io::Result<()> {
            if self.broken.get() {
                Err(io::Error::new(io::ErrorKind::Other, "device unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl StorageBackend for FlakyBackend {
        fn create_new(&self, path: &Path, data: &[u8]) -> io::Result<()> {
            self.check()?;
            self.inner.create_new(path, data)
        }
        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.inner.read(path)
        }
        fn replace(&self, path: &Path, data: &[u8]) -> io::Result<()> {
            self.check()?;
            self.inner.replace(path, data)
        }
        fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
            self.check()?;
            self.inner.append(path, data)
        }
        fn remove(&self, path: &Path) -> io::Result<()> {
            self.check()?;
            self.inner.remove(path)
        }
    }

    fn seeded(temp: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = temp.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_create_writes_preamble_then_content() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = temp.path().join("notes.txt");

        store.create(&path, "hello").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Created at "));
        let (preamble, body) = written.split_once("\n\n").unwrap();
        assert!(!preamble.contains('\n'));
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_create_uses_timestamp_format() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local().with_timestamp_format("fixed");
        let path = temp.path().join("a.txt");

        store.create(&path, "").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Created at fixed\n\n");
    }

    #[test]
    fn test_create_existing_fails_and_preserves_bytes() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = seeded(&temp, "a.txt", "keep me");

        let err = store.create(&path, "replacement").unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
        assert_eq!(err.operation(), Operation::Create);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_open_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();

        let err = store.open(&temp.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.target().ends_with("missing.txt"));
    }

    #[test]
    fn test_open_non_utf8_is_io_error() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = temp.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = store.open(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IoError);
    }

    #[test]
    fn test_open_caches_content_and_size() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = seeded(&temp, "a.txt", "abc déf");

        let record = store.open(&path).unwrap();
        assert_eq!(store.read(&record), "abc déf");
        assert_eq!(record.size(), 8);
        assert_eq!(record.name(), path.as_path());
    }

    #[test]
    fn test_write_failure_leaves_cache_unchanged() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::new(FlakyBackend::default());
        let path = seeded(&temp, "a.txt", "original");
        let mut record = store.open(&path).unwrap();

        store.backend().broken.set(true);
        let err = store.write(&mut record, "new body").unwrap_err();
        assert_eq!(err.code(), ErrorCode::IoError);
        assert_eq!(err.operation(), Operation::Write);
        assert_eq!(record.content(), "original");
        assert_eq!(record.size(), 8);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_append_failure_leaves_cache_unchanged() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::new(FlakyBackend::default());
        let path = seeded(&temp, "a.txt", "base");
        let mut record = store.open(&path).unwrap();

        store.backend().broken.set(true);
        assert!(store.append(&mut record, " more").is_err());
        assert_eq!(record.content(), "base");
        assert_eq!(record.size(), 4);
    }

    #[test]
    fn test_delete_content_failure_rolls_back() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::new(FlakyBackend::default());
        let path = seeded(&temp, "a.txt", "a b a");
        let mut record = store.open(&path).unwrap();

        store.backend().broken.set(true);
        let err = store.delete_content(&mut record, "a").unwrap_err();
        assert_eq!(err.operation(), Operation::DeleteContent);
        assert_eq!(record.content(), "a b a");
        assert_eq!(record.size(), 5);
    }

    #[test]
    fn test_delete_file_failure_keeps_record_active() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::new(FlakyBackend::default());
        let path = seeded(&temp, "a.txt", "data");
        let mut record = store.open(&path).unwrap();

        store.backend().broken.set(true);
        assert!(store.delete_file(&mut record).is_err());
        assert!(!record.is_destroyed());
        assert_eq!(record.content(), "data");
        assert!(path.exists());
    }

    #[test]
    fn test_delete_content_counts_and_rewrites() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = seeded(&temp, "a.txt", "aaaa-aa");
        let mut record = store.open(&path).unwrap();

        let removed = store.delete_content(&mut record, "aa").unwrap();
        assert_eq!(removed, 3);
        assert_eq!(record.content(), "-");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "-");
    }

    #[test]
    fn test_delete_content_empty_item_is_noop() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = seeded(&temp, "a.txt", "abc");
        let mut record = store.open(&path).unwrap();

        assert_eq!(store.delete_content(&mut record, "").unwrap(), 0);
        assert_eq!(record.content(), "abc");
    }

    #[test]
    fn test_refresh_picks_up_external_edits() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = seeded(&temp, "a.txt", "before");
        let mut record = store.open(&path).unwrap();

        std::fs::write(&path, "edited elsewhere").unwrap();
        assert_eq!(record.content(), "before");

        store.refresh(&mut record).unwrap();
        assert_eq!(record.content(), "edited elsewhere");
        assert_eq!(record.size(), 16);
    }

    #[test]
    fn test_destroyed_record_rejects_store_operations() {
        let temp = TempDir::new().unwrap();
        let store = ContentStore::local();
        let path = seeded(&temp, "a.txt", "data");
        let mut record = store.open(&path).unwrap();

        store.delete_file(&mut record).unwrap();
        assert!(!path.exists());
        assert_eq!(store.read(&record), "");

        let results = [
            store.write(&mut record, "x").unwrap_err(),
            store.append(&mut record, "x").unwrap_err(),
            store.delete_content(&mut record, "x").unwrap_err(),
            store.delete_file(&mut record).unwrap_err(),
            store.refresh(&mut record).unwrap_err(),
        ];
        for err in results {
            assert_eq!(err.code(), ErrorCode::InvalidOperation);
        }
        // Nothing was recreated
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        assert!(is_valid_timestamp_format(DEFAULT_TIMESTAMP_FORMAT));
        assert!(!is_valid_timestamp_format("%Q"));

        let store = ContentStore::local().with_timestamp_format("%Q");
        let preamble = store.preamble();
        assert!(preamble.starts_with("Created at "));
        assert!(preamble.ends_with("\n\n"));
    }

    #[test]
    fn test_remove_all() {
        assert_eq!(remove_all("hello world hello", "hello"), (" world ".to_string(), 2));
        assert_eq!(remove_all("aaa", "aa"), ("a".to_string(), 1));
        assert_eq!(remove_all("abc", "x"), ("abc".to_string(), 0));
    }
}
