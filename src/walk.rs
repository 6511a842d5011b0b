//! Directory search: find a file by exact name anywhere under a root.
//!
//! Traversal order is whatever the walker yields and callers must not
//! depend on it. Unreadable directories and broken entries are logged and
//! skipped; the walk continues with their siblings.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::observability::{Event, Logger, ObservationScope};

/// Recursive file lookup under a root directory
#[derive(Debug, Clone, Default)]
pub struct DirectorySearch {
    follow_links: bool,
}

impl DirectorySearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend into symlinked directories. Off by default.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// First non-directory entry under `root` whose file name equals
    /// `file_name`, or `None` once the tree is exhausted.
    ///
    /// `root` itself is never a match.
    pub fn find(&self, root: &Path, file_name: &str) -> Option<PathBuf> {
        let root_str = root.display().to_string();
        let scope = ObservationScope::with_fields(
            Event::TreeSearch,
            &[("root", root_str.as_str()), ("name", file_name)],
        );

        let mut skipped = 0usize;
        let found = WalkDir::new(root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    skipped += 1;
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root_str.clone());
                    Logger::warn(
                        Event::TreeEntrySkipped.as_str(),
                        &[("path", path.as_str()), ("reason", e.to_string().as_str())],
                    );
                    None
                }
            })
            .find(|entry| !entry.file_type().is_dir() && entry.file_name() == file_name)
            .map(|entry| entry.into_path());

        let found_str = found
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());
        scope.complete_with_fields(&[
            ("found", found_str.as_str()),
            ("skipped", skipped.to_string().as_str()),
        ]);

        found
    }
}

/// Find `file_name` anywhere under `root` without following symlinks
pub fn find_in_tree(root: &Path, file_name: &str) -> Option<PathBuf> {
    DirectorySearch::new().find(root, file_name)
}
