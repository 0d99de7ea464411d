use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use std::collections::HashSet;

/// A table of named columns with row-major cell storage.
///
/// Column labels are ordered and unique; every row has exactly one cell per
/// column, with `CellValue::Null` marking missing values.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    columns: Vec<String>,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a sheet from column labels and rows.
    ///
    /// Rows shorter than the header are padded with nulls; longer rows and
    /// duplicate labels are rejected.
    pub fn from_columns(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(SheetError::DuplicateColumnName { name: name.clone() });
            }
        }

        let width = columns.len();
        let mut data = Vec::with_capacity(rows.len());
        for (row_idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(SheetError::LengthMismatch {
                    row: row_idx + 1,
                    expected: width,
                    actual: row.len(),
                });
            }
            row.resize(width, CellValue::Null);
            data.push(row);
        }

        Ok(Sheet {
            name: "Sheet1".to_string(),
            columns,
            data,
        })
    }

    /// Create a sheet from a 2D vector whose first row holds the column labels.
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Result<Self> {
        let mut rows = data.into_iter();
        let Some(header) = rows.next() else {
            return Err(SheetError::NoColumns);
        };

        let header: Vec<CellValue> = header.into_iter().map(Into::into).collect();
        let columns = header_labels(&header);
        let rows = rows
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Self::from_columns(columns, rows)
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of data rows (the header is not counted)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the sheet has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Column labels in file order
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Get a cell by row and column index
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Iterate over data rows
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.data.iter().map(Vec::as_slice)
    }
}

/// Turn a header row into unique column labels.
///
/// Blank headers become `Unnamed: <index>`; repeated labels get `.1`, `.2`, ...
/// appended in order of appearance.
pub(crate) fn header_labels(header: &[CellValue]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(header.len());
    let mut taken: HashSet<String> = HashSet::with_capacity(header.len());

    for (idx, cell) in header.iter().enumerate() {
        let raw = match cell {
            CellValue::Null => format!("Unnamed: {idx}"),
            CellValue::String(s) if s.trim().is_empty() => format!("Unnamed: {idx}"),
            other => other.to_string(),
        };

        let mut label = raw.clone();
        let mut suffix = 1;
        while taken.contains(&label) {
            label = format!("{raw}.{suffix}");
            suffix += 1;
        }

        taken.insert(label.clone());
        labels.push(label);
    }

    labels
}
