//! Locate and count over a record's cached content.
//!
//! Searches are pure: a case-insensitive search folds each character or
//! token as it is compared, so the record is never case-folded as a side
//! effect and returned indexes refer to the record's own content.

use super::query::SearchQuery;
use crate::errors::{FileResult, Operation};
use crate::observability::{Event, Logger, Severity};
use crate::record::FileRecord;

/// Search operations over `FileRecord` caches
pub struct SearchEngine;

impl SearchEngine {
    /// Index of the first match, or `None`.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the record was destroyed.
    pub fn locate(
        record: &FileRecord,
        target: &str,
        sensitive: bool,
    ) -> FileResult<Option<usize>> {
        Self::locate_from(record, target, sensitive, 0)
    }

    /// Index of the first match at or after `start`, or `None`.
    ///
    /// `start` is a character index in character mode and a token index in
    /// token mode.
    pub fn locate_from(
        record: &FileRecord,
        target: &str,
        sensitive: bool,
        start: usize,
    ) -> FileResult<Option<usize>> {
        record.ensure_active(Operation::Locate)?;

        let query = SearchQuery::compile(target, sensitive);
        let found = query
            .match_indexes(record.content())
            .find(|index| *index >= start);

        if Logger::enabled(Severity::Trace) {
            let found_str = found.map_or_else(|| "none".to_string(), |i| i.to_string());
            Logger::trace(
                Event::SearchLocate.as_str(),
                &[
                    ("path", record.name().display().to_string().as_str()),
                    ("mode", query.mode().as_str()),
                    ("found", found_str.as_str()),
                ],
            );
        }

        Ok(found)
    }

    /// Number of matches in the whole content.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if the record was destroyed.
    pub fn count(record: &FileRecord, target: &str, sensitive: bool) -> FileResult<usize> {
        record.ensure_active(Operation::Count)?;

        let query = SearchQuery::compile(target, sensitive);
        let count = query.match_indexes(record.content()).count();

        if Logger::enabled(Severity::Trace) {
            Logger::trace(
                Event::SearchCount.as_str(),
                &[
                    ("path", record.name().display().to_string().as_str()),
                    ("mode", query.mode().as_str()),
                    ("count", count.to_string().as_str()),
                ],
            );
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use std::path::PathBuf;

    fn record(content: &str) -> FileRecord {
        FileRecord::new(PathBuf::from("notes.txt"), content.to_string())
    }

    #[test]
    fn test_locate_character_mode() {
        let r = record("hello");
        assert_eq!(SearchEngine::locate(&r, "l", true).unwrap(), Some(2));
        assert_eq!(SearchEngine::locate(&r, "z", true).unwrap(), None);
    }

    #[test]
    fn test_locate_token_mode() {
        let r = record("the quick brown fox");
        assert_eq!(SearchEngine::locate(&r, "brown", true).unwrap(), Some(2));
        assert_eq!(SearchEngine::locate(&r, "bro", true).unwrap(), None);
    }

    #[test]
    fn test_first_match_at_zero_is_found() {
        let r = record("abc");
        assert_eq!(SearchEngine::locate(&r, "a", true).unwrap(), Some(0));
    }

    #[test]
    fn test_case_insensitive_does_not_mutate_record() {
        let r = record("Hello WORLD");
        assert_eq!(SearchEngine::locate(&r, "world", false).unwrap(), Some(1));
        assert_eq!(SearchEngine::locate(&r, "world", true).unwrap(), None);
        assert_eq!(SearchEngine::count(&r, "h", false).unwrap(), 1);
        assert_eq!(r.content(), "Hello WORLD");
    }

    #[test]
    fn test_case_insensitive_index_refers_to_record_content() {
        let r = record("İx");
        assert_eq!(SearchEngine::locate(&r, "x", false).unwrap(), Some(1));
        assert_eq!(SearchEngine::locate(&r, "x", true).unwrap(), Some(1));
        assert_eq!(r.content().chars().nth(1), Some('x'));
    }

    #[test]
    fn test_count() {
        let r = record("hello world hello");
        assert_eq!(SearchEngine::count(&r, "hello", true).unwrap(), 2);
        assert_eq!(SearchEngine::count(&r, "o", true).unwrap(), 3);
        assert_eq!(SearchEngine::count(&r, "HELLO", true).unwrap(), 0);
        assert_eq!(SearchEngine::count(&r, "HELLO", false).unwrap(), 2);
    }

    #[test]
    fn test_locate_from_skips_earlier_matches() {
        let r = record("a b a b a");
        assert_eq!(SearchEngine::locate_from(&r, "a", true, 1).unwrap(), Some(4));
        assert_eq!(SearchEngine::locate_from(&r, "a", true, 9).unwrap(), None);
    }

    #[test]
    fn test_destroyed_record_is_rejected() {
        let mut r = record("data");
        r.destroy();

        let err = SearchEngine::locate(&r, "d", true).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidOperation);
        assert_eq!(err.operation(), Operation::Locate);

        let err = SearchEngine::count(&r, "d", true).unwrap_err();
        assert_eq!(err.operation(), Operation::Count);
    }
}
