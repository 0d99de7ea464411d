//! Tabular reader for photoshoot schedules
//!
//! Decodes delimited text and spreadsheet workbooks into a [`Sheet`]: ordered,
//! unique column labels taken from the first row, and typed cells where
//! [`CellValue::Null`] marks a missing value.
//!
//! # Examples
//!
//! ## Loading from CSV bytes
//!
//! ```
//! use photoshoot_sheet::{CellValue, Sheet};
//!
//! let sheet = Sheet::from_csv_bytes(b"Day,Group,Student\n1,A,Alice\n1,A,").unwrap();
//!
//! assert_eq!(sheet.column_names(), ["Day", "Group", "Student"]);
//! assert_eq!(sheet.get(0, 0).unwrap(), &CellValue::Int(1));
//! assert!(sheet.get(1, 2).unwrap().is_null());
//! ```
//!
//! ## Building a sheet in code
//!
//! ```
//! use photoshoot_sheet::Sheet;
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["Day", "Group", "Student"],
//!     vec!["1", "A", "Alice"],
//! ])
//! .unwrap();
//!
//! assert_eq!(sheet.row_count(), 1);
//! assert_eq!(sheet.col_count(), 3);
//! ```
//!
//! ## Loading a workbook
//!
//! ```no_run
//! use photoshoot_sheet::Sheet;
//!
//! let bytes = std::fs::read("schedule.xlsx").unwrap();
//! let sheet = Sheet::from_workbook_bytes(&bytes).unwrap();
//! ```

mod cell;
mod csv;
mod error;
mod sheet;
mod workbook;

/// Re-export cell value type and default missing-value markers.
pub use cell::{CellValue, DEFAULT_NA_VALUES};
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
/// Re-export workbook read options.
pub use workbook::WorkbookOptions;
