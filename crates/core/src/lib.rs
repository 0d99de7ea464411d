//! # photoshoot-core
//!
//! Turns a photoshoot schedule (one row per student with a day and a group)
//! into a zip of empty folders:
//!
//! ```text
//! PHOTOSHOOT/<Day>/<Group>/<Student>
//! PHOTOSHOOT/<Day>/<Group>/Group
//! PHOTOSHOOT/<Day>/<Group>/Group Final
//! ```
//!
//! # Example
//!
//! ```
//! use photoshoot_core::{organize_upload, OrganizeOptions};
//!
//! let csv = "Day,Group,Student\n1,A,Alice\n";
//! let photoshoot = organize_upload(Some("schedule.csv"), csv.as_bytes(), &OrganizeOptions::default()).unwrap();
//!
//! assert!(photoshoot.tree.contains("PHOTOSHOOT/1/A/Alice"));
//! assert!(photoshoot.tree.contains("PHOTOSHOOT/1/A/Group Final"));
//! ```

/// Zip serialization.
pub mod archive;
/// Folder hierarchy construction.
pub mod builder;
/// Error types and result aliases.
pub mod error;
/// End-to-end build pipeline.
pub mod organize;
/// Column role inference.
pub mod resolver;
/// On-disk staging.
pub mod staging;
/// In-memory folder tree.
pub mod tree;
/// Upload validation.
pub mod upload;

pub use archive::{archive_dir, archive_tree, ARCHIVE_FILE_NAME};
pub use builder::{build_tree, GROUP_DIR_NAME, GROUP_FINAL_DIR_NAME};
pub use error::{ErrorKind, ShootError, ShootResult};
pub use organize::{
    organize_table, organize_upload, read_table, ArchiveStrategy, OrganizeOptions, Photoshoot,
};
pub use resolver::{resolve_columns, ColumnRef, ResolutionMode, Role, RoleMapping};
pub use staging::{realize_tree, StagingArea};
pub use tree::{DirectoryTree, ROOT_DIR_NAME};
pub use upload::{classify_filename, UploadKind, UploadRejection, ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};

/// Re-export the table type consumed by the builder.
pub use photoshoot_sheet::{CellValue, CsvOptions, Sheet, WorkbookOptions};
