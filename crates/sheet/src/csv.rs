use crate::cell::{CellValue, DEFAULT_NA_VALUES};
use crate::error::{Result, SheetError};
use crate::sheet::{header_labels, Sheet};
use std::io::Read;

/// CSV reader options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Whether to use type inference when reading
    pub infer_types: bool,
    /// Cell texts read as missing values
    pub na_values: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            infer_types: true,
            na_values: DEFAULT_NA_VALUES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl CsvOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
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

    fn parse_cell(&self, field: &str) -> CellValue {
        if self.infer_types {
            CellValue::parse_with_na(field, &self.na_values)
        } else if field.trim().is_empty() || crate::cell::is_na(field.trim(), &self.na_values) {
            CellValue::Null
        } else {
            CellValue::String(field.to_string())
        }
    }
}

impl Sheet {
    /// Load a sheet from CSV bytes
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_csv_reader(bytes, &CsvOptions::default())
    }

    /// Load a sheet from a reader; the first record is the header
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false) // We handle headers ourselves
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();

        let header = match records.next() {
            Some(record) => record?,
            None => return Err(SheetError::NoColumns),
        };
        let header: Vec<CellValue> = header
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let field = if idx == 0 {
                    field.trim_start_matches('\u{feff}')
                } else {
                    field
                };
                if field.trim().is_empty() {
                    CellValue::Null
                } else {
                    CellValue::String(field.to_string())
                }
            })
            .collect();
        let columns = header_labels(&header);

        let mut data: Vec<Vec<CellValue>> = Vec::new();
        for result in records {
            let record = result?;
            // A blank line carries no data
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            data.push(record.iter().map(|field| options.parse_cell(field)).collect());
        }

        Self::from_columns(columns, data)
    }
}
