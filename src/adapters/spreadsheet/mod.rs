//! Spreadsheet loading and writing
//!
//! Pipelines talk to the file system through the [`DatasetReader`] and
//! [`DatasetWriter`] traits so that the transforms can be driven from
//! memory in tests.

pub mod reader;
pub mod writer;

pub use reader::SpreadsheetReader;
pub use writer::XlsxWriter;

use crate::domain::{Dataset, Result};
use std::path::Path;

/// Loads a [`Dataset`] from a file
pub trait DatasetReader {
    /// Read the first worksheet of `path`
    ///
    /// # Errors
    ///
    /// Returns a spreadsheet error if the file is missing, unreadable or not
    /// a supported workbook.
    fn read(&self, path: &Path) -> Result<Dataset>;
}

/// Persists a [`Dataset`] to a file
pub trait DatasetWriter {
    /// Write `dataset` to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns a spreadsheet error if the workbook cannot be built or saved.
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<()>;
}
