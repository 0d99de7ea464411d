use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// Cell texts treated as missing values when reading delimited and
/// workbook files.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Represents a cell value in a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Check if the value is the missing-value sentinel
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Parse a string with type inference, treating any of `na_values` (and
    /// blank text) as null.
    /// Tries: null -> int -> float -> string
    #[must_use]
    pub fn parse_with_na<S: AsRef<str>>(s: &str, na_values: &[S]) -> CellValue {
        let trimmed = s.trim();

        if trimmed.is_empty() || is_na(trimmed, na_values) {
            return CellValue::Null;
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        // f64 parsing also accepts words like "inf" and "nan"; a name is not a number
        if trimmed.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = trimmed.parse::<f64>() {
                return CellValue::Float(f);
            }
        }

        CellValue::String(s.to_string())
    }
}

/// Whether `text` is one of the configured missing-value markers.
pub(crate) fn is_na<S: AsRef<str>>(text: &str, na_values: &[S]) -> bool {
    na_values.iter().any(|na| na.as_ref() == text)
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

/// Canonical text of a value.
///
/// Whole floats print without a fractional part (`1.0` -> `1`) and
/// midnight timestamps print as a bare date.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => {
                if fl.is_finite() && fl.fract() == 0.0 && fl.abs() < 1e15 {
                    write!(f, "{}", *fl as i64)
                } else {
                    write!(f, "{fl}")
                }
            }
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::DateTime(dt) => {
                if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(text: &str) -> CellValue {
        CellValue::parse_with_na(text, DEFAULT_NA_VALUES)
    }

    #[test]
    fn test_parse_null() {
        assert_eq!(parse(""), CellValue::Null);
        assert_eq!(parse("  "), CellValue::Null);
        assert_eq!(parse("NA"), CellValue::Null);
        assert_eq!(parse("n/a"), CellValue::Null);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse("42"), CellValue::Int(42));
        assert_eq!(parse("-123"), CellValue::Int(-123));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse("2.5"), CellValue::Float(2.5));
        assert_eq!(parse("-0.25"), CellValue::Float(-0.25));
    }

    #[test]
    fn test_parse_keeps_words_as_strings() {
        assert_eq!(parse("Nan"), CellValue::from("Nan"));
        assert_eq!(parse("inf"), CellValue::from("inf"));
        assert_eq!(parse("yes"), CellValue::from("yes"));
    }

    #[test]
    fn test_parse_custom_na() {
        assert_eq!(CellValue::parse_with_na("-", &["-"]), CellValue::Null);
        assert_eq!(CellValue::parse_with_na("NA", &["-"]), CellValue::from("NA"));
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(CellValue::Int(7).to_string(), "7");
        assert_eq!(CellValue::Float(1.0).to_string(), "1");
        assert_eq!(CellValue::Float(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Bool(true).to_string(), "True");
    }

    #[test]
    fn test_display_datetime() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        let afternoon = date.and_hms_opt(14, 30, 0).unwrap();

        assert_eq!(CellValue::from(midnight).to_string(), "2024-05-01");
        assert_eq!(
            CellValue::from(afternoon).to_string(),
            "2024-05-01 14:30:00"
        );
    }
}
