//! External system integrations for logmask.
//!
//! - [`spreadsheet`] - Workbook loading (calamine) and xlsx output (rust_xlsxwriter)
//!
//! # Design Pattern
//!
//! Adapters isolate third-party crates behind the [`spreadsheet::DatasetReader`]
//! and [`spreadsheet::DatasetWriter`] traits, and translate their errors into
//! [`crate::domain::SpreadsheetError`].
//!
//! ```rust,no_run
//! use logmask::adapters::spreadsheet::{DatasetReader, DatasetWriter, SpreadsheetReader, XlsxWriter};
//! use std::path::Path;
//!
//! # fn example() -> logmask::domain::Result<()> {
//! let dataset = SpreadsheetReader::new().read(Path::new("sip.xls"))?;
//! XlsxWriter::new().write(&dataset, Path::new("sip_copy.xlsx"))?;
//! # Ok(())
//! # }
//! ```

pub mod spreadsheet;
