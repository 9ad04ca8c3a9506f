use std::path::PathBuf;

use thiserror::Error;

/// Rejected command line input. Raised before any file is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{flag} must contain values between {min} and {max}")]
    OutOfDomain {
        flag: &'static str,
        min: i64,
        max: i64,
    },
    #[error("{flag} must have valid start, end and iteration values (got {given})")]
    InvalidRange { flag: &'static str, given: String },
    #[error("exactly one of {values_flag} or {iteration_flag} must be given")]
    ModeConflict {
        values_flag: &'static str,
        iteration_flag: &'static str,
    },
    #[error("The SQLite 3 library is missing")]
    DatabaseUnsupported,
    #[error("Output database file already exists: {}", .0.display())]
    DatabaseExists(PathBuf),
}

/// A result report that does not follow the Iometer layout.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("block {block} (line {line}): expected {expected}, found {found:?}")]
    Format {
        block: usize,
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("block {block}: report ended while expecting {expected}")]
    Truncated { block: usize, expected: &'static str },
}
