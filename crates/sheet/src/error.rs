use thiserror::Error;

/// Errors that can occur while reading or accessing a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Index out of bounds: row {row}, col {col} (sheet has {rows} rows, {cols} cols)")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Data length mismatch in row {row}: expected {expected} fields, got {actual}")]
    LengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column name: {name}")]
    DuplicateColumnName { name: String },

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Workbook contains no worksheets")]
    NoWorksheets,

    #[error("Worksheet index {index} out of range (workbook has {count} worksheets)")]
    WorksheetOutOfRange { index: usize, count: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
