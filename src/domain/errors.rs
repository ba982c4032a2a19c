//! Domain error types
//!
//! This module defines the error hierarchy for logmask.
//! All errors are domain-specific and don't expose third-party types.

use std::path::PathBuf;
use thiserror::Error;

/// Main logmask error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum LogmaskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Spreadsheet read/write errors
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid rewrite pattern
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Spreadsheet-specific errors
///
/// Errors raised by the loader and writer. The underlying library error is
/// carried as text so callers never depend on the spreadsheet crates.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The workbook could not be opened (missing file, unknown format, corrupt container)
    #[error("Failed to open {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// The workbook has no worksheet to read
    #[error("No worksheet found in {path}")]
    NoWorksheet { path: PathBuf },

    /// The first worksheet could not be decoded
    #[error("Failed to read worksheet in {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// The output workbook could not be written
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

impl SpreadsheetError {
    /// Whether the error happened while loading input
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, Self::WriteFailed { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LogmaskError {
    fn from(err: std::io::Error) -> Self {
        LogmaskError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LogmaskError {
    fn from(err: toml::de::Error) -> Self {
        LogmaskError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from regex compile errors
impl From<regex::Error> for LogmaskError {
    fn from(err: regex::Error) -> Self {
        LogmaskError::Pattern(err.to_string())
    }
}
