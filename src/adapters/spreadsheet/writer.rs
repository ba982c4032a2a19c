//! Spreadsheet output via rust_xlsxwriter

use super::DatasetWriter;
use crate::domain::{Cell, Dataset, Result, SpreadsheetError};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

/// Largest row count an xlsx worksheet can hold, header included
pub const MAX_ROWS: usize = 1_048_576;

/// Largest column count an xlsx worksheet can hold
pub const MAX_COLUMNS: usize = 16_384;

/// Writes a dataset as a single-sheet xlsx workbook with a bold header row
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    /// Create a writer
    pub fn new() -> Self {
        Self
    }
}

impl DatasetWriter for XlsxWriter {
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        let write_failed = |reason: String| SpreadsheetError::WriteFailed {
            path: path.to_path_buf(),
            reason,
        };

        if dataset.row_count() + 1 > MAX_ROWS {
            return Err(write_failed(format!(
                "{} rows exceed the worksheet limit of {}",
                dataset.row_count(),
                MAX_ROWS - 1
            ))
            .into());
        }
        if dataset.column_count() > MAX_COLUMNS {
            return Err(write_failed(format!(
                "{} columns exceed the worksheet limit of {}",
                dataset.column_count(),
                MAX_COLUMNS
            ))
            .into());
        }

        let mut workbook = build_workbook(dataset).map_err(|e| write_failed(e.to_string()))?;
        workbook
            .save(path)
            .map_err(|e| write_failed(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Workbook written"
        );
        Ok(())
    }
}

/// Lay the dataset out in a new workbook. Bounds are checked by the caller.
fn build_workbook(dataset: &Dataset) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in dataset.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (idx, row) in dataset.rows().iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                Cell::Missing => {}
            }
        }
    }

    Ok(workbook)
}
