//! Observable engine events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Content store
    /// New file created
    FileCreated,
    /// File opened into a record
    FileOpened,
    /// Record cache re-read from disk
    FileRefreshed,
    /// File overwritten
    FileWritten,
    /// Bytes appended to a file
    FileAppended,
    /// Occurrences removed from a file
    ContentDeleted,
    /// File removed
    FileDeleted,
    /// A store operation failed
    StoreFailed,

    // Search
    /// Locate finished
    SearchLocate,
    /// Count finished
    SearchCount,

    // Directory search
    /// Tree walk (scope name, logged as _BEGIN / _COMPLETE)
    TreeSearch,
    /// Unreadable entry skipped during a tree walk
    TreeEntrySkipped,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::FileCreated => "FILE_CREATED",
            Event::FileOpened => "FILE_OPENED",
            Event::FileRefreshed => "FILE_REFRESHED",
            Event::FileWritten => "FILE_WRITTEN",
            Event::FileAppended => "FILE_APPENDED",
            Event::ContentDeleted => "CONTENT_DELETED",
            Event::FileDeleted => "FILE_DELETED",
            Event::StoreFailed => "STORE_FAILED",
            Event::SearchLocate => "SEARCH_LOCATE",
            Event::SearchCount => "SEARCH_COUNT",
            Event::TreeSearch => "TREE_SEARCH",
            Event::TreeEntrySkipped => "TREE_ENTRY_SKIPPED",
        }
    }

    /// Whether the event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::StoreFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
