//! Error types for the photoshoot organizer.

use crate::resolver::Role;
use crate::upload::UploadRejection;
use photoshoot_sheet::SheetError;
use std::fmt;
use thiserror::Error;

/// Result type for organizer operations.
pub type ShootResult<T> = Result<T, ShootError>;

/// Errors that can abort building a photoshoot archive.
///
/// Every error aborts the whole build; there is no partial archive.
#[derive(Debug, Error)]
pub enum ShootError {
    /// The upload was missing, unnamed, oversized or of a disallowed type.
    #[error("{0}")]
    InvalidUpload(#[from] UploadRejection),

    /// One or more roles matched no column.
    #[error("Could not find required columns (missing: {}). Found: {found:?}", RoleList(.missing))]
    MissingColumns { missing: Vec<Role>, found: Vec<String> },

    /// Strict resolution only: a single column was bound to several roles.
    #[error("Column {column:?} matches more than one role ({}). Found: {found:?}", RoleList(.roles))]
    AmbiguousColumns {
        column: String,
        roles: Vec<Role>,
        found: Vec<String>,
    },

    /// The upload could not be decoded into a table.
    #[error("Could not read table: {0}")]
    Sheet(#[from] SheetError),

    /// I/O error while staging the folder tree.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive writing error.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error while walking a staged folder tree.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// How a failure is reported to the person who submitted the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User-correctable problem with the upload itself.
    InvalidUpload,
    /// The table lacks identifiable Day/Group/Student columns.
    MissingColumns,
    /// Any other fault while reading, building or zipping.
    Unclassified,
}

impl ShootError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUpload(_) => ErrorKind::InvalidUpload,
            Self::MissingColumns { .. } | Self::AmbiguousColumns { .. } => {
                ErrorKind::MissingColumns
            }
            Self::Sheet(_) | Self::Io(_) | Self::Archive(_) | Self::Walk(_) => {
                ErrorKind::Unclassified
            }
        }
    }
}

struct RoleList<'a>(&'a [Role]);

impl fmt::Display for RoleList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, role) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{role}")?;
        }
        Ok(())
    }
}
