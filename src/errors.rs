//! Error taxonomy shared by every engine operation
//!
//! Every failure carries:
//! - an error code (`NotFound`, `AlreadyExists`, `IoError`, `InvalidOperation`)
//! - the operation that failed
//! - the target it was applied to (path or file name)
//! - the underlying I/O error, when there is one

use std::fmt;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Error codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Open target does not exist
    NotFound,
    /// Create target already exists
    AlreadyExists,
    /// Read, write or delete failed on the storage medium
    IoError,
    /// Operation attempted on a destroyed record
    InvalidOperation,
}

impl ErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "FILEKEEP_NOT_FOUND",
            ErrorCode::AlreadyExists => "FILEKEEP_ALREADY_EXISTS",
            ErrorCode::IoError => "FILEKEEP_IO_ERROR",
            ErrorCode::InvalidOperation => "FILEKEEP_INVALID_OPERATION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Engine operations, used to label errors and log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Open,
    Refresh,
    Write,
    Append,
    DeleteContent,
    DeleteFile,
    Locate,
    Count,
    FindInTree,
}

impl Operation {
    /// Returns the operation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Open => "open",
            Operation::Refresh => "refresh",
            Operation::Write => "write",
            Operation::Append => "append",
            Operation::DeleteContent => "delete_content",
            Operation::DeleteFile => "delete_file",
            Operation::Locate => "locate",
            Operation::Count => "count",
            Operation::FindInTree => "find_in_tree",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine error with operation and target context
#[derive(Debug, Error)]
#[error("[{code}] {operation} failed for '{target}'{}", cause_suffix(.source))]
pub struct FileError {
    code: ErrorCode,
    operation: Operation,
    target: String,
    #[source]
    source: Option<io::Error>,
}

fn cause_suffix(source: &Option<io::Error>) -> String {
    match source {
        Some(e) => format!(": {}", e),
        None => String::new(),
    }
}

impl FileError {
    fn new(code: ErrorCode, operation: Operation, target: &Path, source: Option<io::Error>) -> Self {
        Self {
            code,
            operation,
            target: target.display().to_string(),
            source,
        }
    }

    /// Target does not exist
    pub fn not_found(operation: Operation, target: &Path) -> Self {
        Self::new(ErrorCode::NotFound, operation, target, None)
    }

    /// Storage medium failure
    pub fn io(operation: Operation, target: &Path, source: io::Error) -> Self {
        Self::new(ErrorCode::IoError, operation, target, Some(source))
    }

    /// Record has been destroyed
    pub fn invalid_operation(operation: Operation, target: &Path) -> Self {
        Self::new(ErrorCode::InvalidOperation, operation, target, None)
    }

    /// Classifies an I/O error raised by `operation`.
    ///
    /// `NotFound` is only reported for open and refresh, `AlreadyExists`
    /// only for create. Everything else is an `IoError`.
    pub fn from_io(operation: Operation, target: &Path, source: io::Error) -> Self {
        match (operation, source.kind()) {
            (Operation::Open | Operation::Refresh, io::ErrorKind::NotFound) => {
                Self::new(ErrorCode::NotFound, operation, target, Some(source))
            }
            (Operation::Create, io::ErrorKind::AlreadyExists) => {
                Self::new(ErrorCode::AlreadyExists, operation, target, Some(source))
            }
            _ => Self::io(operation, target, source),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the operation that failed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the target identifier
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the underlying I/O error, if any
    pub fn io_source(&self) -> Option<&io::Error> {
        self.source.as_ref()
    }
}

/// Result type for engine operations
pub type FileResult<T> = Result<T, FileError>;
