//! Spreadsheet loading via calamine

use super::DatasetReader;
use crate::domain::{Cell, Dataset, Result, SpreadsheetError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashMap;
use std::path::Path;

/// Format used for date/time cells
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the first worksheet of an xlsx/xlsm/xlsb/xls/ods workbook
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetReader;

impl SpreadsheetReader {
    /// Create a reader
    pub fn new() -> Self {
        Self
    }
}

impl DatasetReader for SpreadsheetReader {
    fn read(&self, path: &Path) -> Result<Dataset> {
        let mut workbook = open_workbook_auto(path).map_err(|e| SpreadsheetError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SpreadsheetError::NoWorksheet {
                path: path.to_path_buf(),
            })?
            .map_err(|e| SpreadsheetError::ReadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let dataset = range_to_dataset(&range)?;
        tracing::debug!(
            path = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Worksheet loaded"
        );
        Ok(dataset)
    }
}

/// Convert a worksheet range into a dataset; the first row is the header
pub fn range_to_dataset(range: &Range<Data>) -> Result<Dataset> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Dataset::default());
    };

    let mut dataset = Dataset::new(header_names(header_row));
    for row in rows {
        dataset.push_row(row.iter().map(to_cell).collect())?;
    }
    Ok(dataset)
}

/// Header cells to unique column names
///
/// Blank headers become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    row.iter()
        .enumerate()
        .map(|(idx, data)| {
            let base = match to_cell(data).as_text() {
                Some(text) if !text.trim().is_empty() => text.into_owned(),
                _ => format!("Unnamed: {idx}"),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Map a calamine cell to a [`Cell`]
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::String(s) if s.is_empty() => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if !dt.is_duration() => Cell::Text(value.format(DATETIME_FORMAT).to_string()),
            _ => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
