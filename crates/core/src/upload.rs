//! Upload validation: file name allow-list and size ceiling.

use crate::error::ShootResult;
use thiserror::Error;

/// Default upload ceiling (16 MiB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls", "csv"];

/// Why an upload was refused before any decoding happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("No file uploaded")]
    NoFilePart,

    #[error("No file selected")]
    EmptyFilename,

    #[error("Invalid file type. Please upload an Excel (.xlsx, .xls) or CSV file.")]
    DisallowedExtension { filename: String },

    #[error("File too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: usize, limit: usize },
}

/// Table format implied by an accepted file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Spreadsheet workbook (`.xlsx` or legacy `.xls`).
    Workbook,
    /// Comma-separated text (`.csv`).
    Csv,
}

/// Check a submitted file name against the extension allow-list.
///
/// `None` means the request carried no file at all. The extension is the text
/// after the last `.` and is compared case-insensitively.
pub fn classify_filename(filename: Option<&str>) -> ShootResult<UploadKind> {
    let filename = filename.ok_or(UploadRejection::NoFilePart)?;
    if filename.is_empty() {
        return Err(UploadRejection::EmptyFilename.into());
    }

    let disallowed = || UploadRejection::DisallowedExtension {
        filename: filename.to_string(),
    };
    let (_, extension) = filename.rsplit_once('.').ok_or_else(disallowed)?;

    match extension.to_ascii_lowercase().as_str() {
        "xlsx" | "xls" => Ok(UploadKind::Workbook),
        "csv" => Ok(UploadKind::Csv),
        _ => Err(disallowed().into()),
    }
}

/// Reject payloads above `limit` bytes.
pub fn check_size(size: usize, limit: usize) -> ShootResult<()> {
    if size > limit {
        return Err(UploadRejection::TooLarge { size, limit }.into());
    }
    Ok(())
}
