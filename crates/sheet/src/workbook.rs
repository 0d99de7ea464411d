use crate::cell::{is_na, CellValue, DEFAULT_NA_VALUES};
use crate::error::{Result, SheetError};
use crate::sheet::{header_labels, Sheet};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDateTime;
use std::io::Cursor;

/// Options for reading workbook files (xlsx, xlsm, xlsb, xls, ods)
#[derive(Debug, Clone)]
pub struct WorkbookOptions {
    /// Zero-based index of the worksheet to read
    pub worksheet: usize,
    /// String cells read as missing values
    pub na_values: Vec<String>,
}

impl Default for WorkbookOptions {
    fn default() -> Self {
        WorkbookOptions {
            worksheet: 0,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl WorkbookOptions {
    /// Select the worksheet to read
    #[must_use]
    pub fn with_worksheet(mut self, worksheet: usize) -> Self {
        self.worksheet = worksheet;
        self
    }

    /// Replace the missing-value markers
    #[must_use]
    pub fn with_na_values<I, S>(mut self, na_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.na_values = na_values.into_iter().map(Into::into).collect();
        self
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data, na_values: &[String]) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || is_na(trimmed, na_values) {
                CellValue::Null
            } else {
                CellValue::String(s.clone())
            }
        }
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if !dt.is_duration() => CellValue::DateTime(datetime),
            // Durations and out-of-range serials keep the raw day count
            _ => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => s
            .parse::<NaiveDateTime>()
            .map_or_else(|_| CellValue::String(s.clone()), CellValue::DateTime),
        Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}

impl Sheet {
    /// Load the first worksheet of an in-memory workbook.
    ///
    /// The format is detected from the bytes, so a legacy `.xls` payload and a
    /// modern `.xlsx` payload are both accepted regardless of the file name.
    pub fn from_workbook_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_workbook_bytes_with_options(bytes, &WorkbookOptions::default())
    }

    /// Load a worksheet of an in-memory workbook with options
    pub fn from_workbook_bytes_with_options(
        bytes: &[u8],
        options: &WorkbookOptions,
    ) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let names = workbook.sheet_names();
        let sheet_name = match names.get(options.worksheet) {
            Some(name) => name.clone(),
            None if names.is_empty() => return Err(SheetError::NoWorksheets),
            None => {
                return Err(SheetError::WorksheetOutOfRange {
                    index: options.worksheet,
                    count: names.len(),
                })
            }
        };
        let range = workbook
            .worksheet_range_at(options.worksheet)
            .ok_or(SheetError::NoWorksheets)??;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Err(SheetError::NoColumns);
        };

        let header: Vec<CellValue> = header
            .iter()
            .map(|cell| data_to_cell_value(cell, &[]))
            .collect();
        let columns = header_labels(&header);

        let data: Vec<Vec<CellValue>> = rows
            .map(|row| {
                row.iter()
                    .map(|cell| data_to_cell_value(cell, &options.na_values))
                    .collect()
            })
            .filter(|row: &Vec<CellValue>| row.iter().any(|cell| !cell.is_null()))
            .collect();

        let mut sheet = Sheet::from_columns(columns, data)?;
        sheet.set_name(&sheet_name);
        Ok(sheet)
    }
}
