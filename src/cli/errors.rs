//! CLI-specific error types

use std::fmt;
use std::io;

use crate::errors::{ErrorCode, FileError};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error on stdout
    IoError,
    /// An engine operation failed
    Engine(ErrorCode),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FILEKEEP_CLI_CONFIG_ERROR",
            Self::IoError => "FILEKEEP_CLI_IO_ERROR",
            Self::Engine(code) => code.code(),
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<FileError> for CliError {
    fn from(e: FileError) -> Self {
        Self::new(CliErrorCode::Engine(e.code()), e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Operation;
    use std::path::Path;

    #[test]
    fn test_engine_errors_keep_their_code() {
        let err: CliError = FileError::not_found(Operation::Open, Path::new("missing.txt")).into();
        assert_eq!(err.code(), CliErrorCode::Engine(ErrorCode::NotFound));
        assert_eq!(err.code_str(), "FILEKEEP_NOT_FOUND");
        assert!(err.message().contains("missing.txt"));
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("bad log_level");
        assert_eq!(err.to_string(), "FILEKEEP_CLI_CONFIG_ERROR: bad log_level");
    }
}
