//! # Local Filesystem Backend

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::backend::StorageBackend;

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalBackend {
    fsync: bool,
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self { fsync: true }
    }
}

impl LocalBackend {
    /// Create a new local backend that fsyncs every write
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable fsync after writes
    pub fn with_fsync(mut self, fsync: bool) -> Self {
        self.fsync = fsync;
        self
    }

    fn sync(&self, file: &fs::File) -> io::Result<()> {
        if self.fsync {
            file.sync_all()?;
        }
        Ok(())
    }
}

/// Directory that holds `path`, `.` for bare file names
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// The file a write to `path` should land on: symlinks resolved when the
/// path exists, `path` itself otherwise
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

impl StorageBackend for LocalBackend {
    fn create_new(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

        let written = file.write_all(data).and_then(|_| self.sync(&file));
        if let Err(e) = written {
            // The path did not exist before this call
            drop(file);
            let _ = fs::remove_file(path);
            return Err(e);
        }

        Ok(())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn replace(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        // Rename onto the link target so symlinks keep pointing at the new bytes
        let target = resolve_target(path)?;
        let mut staged = NamedTempFile::new_in(parent_dir(&target))?;

        if let Ok(meta) = fs::metadata(&target) {
            staged.as_file().set_permissions(meta.permissions())?;
        }

        staged.write_all(data)?;
        self.sync(staged.as_file())?;

        staged.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }

    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(data)?;
        self.sync(&file)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
