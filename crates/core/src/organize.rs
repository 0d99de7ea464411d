//! End-to-end build: upload → table → roles → folder tree → archive.

use crate::archive::{archive_dir, archive_tree};
use crate::builder::build_tree;
use crate::error::ShootResult;
use crate::resolver::{resolve_columns, ResolutionMode};
use crate::staging::StagingArea;
use crate::tree::DirectoryTree;
use crate::upload::{check_size, classify_filename, UploadKind, MAX_UPLOAD_BYTES};
use photoshoot_sheet::{CsvOptions, Sheet, WorkbookOptions};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// How the archive is produced from the folder tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArchiveStrategy {
    /// Serialize the in-memory tree directly; nothing touches the disk.
    #[default]
    InMemory,
    /// Create the folders in a request-scoped temporary directory, then zip that.
    Staged,
}

/// Knobs for a single build.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub resolution: ResolutionMode,
    pub strategy: ArchiveStrategy,
    /// Parent for staging directories; the system temp dir when `None`.
    pub staging_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    /// Reader settings for `.csv` uploads.
    pub csv: CsvOptions,
    /// Reader settings for workbook uploads.
    pub workbook: WorkbookOptions,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            resolution: ResolutionMode::default(),
            strategy: ArchiveStrategy::default(),
            staging_dir: None,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            csv: CsvOptions::default(),
            workbook: WorkbookOptions::default(),
        }
    }
}

/// A finished build.
#[derive(Debug, Clone)]
pub struct Photoshoot {
    /// Folders contained in the archive.
    pub tree: DirectoryTree,
    /// Zip bytes.
    pub archive: Vec<u8>,
}

/// Decode uploaded bytes according to the kind implied by the file name.
pub fn read_table(kind: UploadKind, bytes: &[u8], options: &OrganizeOptions) -> ShootResult<Sheet> {
    let sheet = match kind {
        UploadKind::Csv => Sheet::from_csv_reader(bytes, &options.csv)?,
        UploadKind::Workbook => Sheet::from_workbook_bytes_with_options(bytes, &options.workbook)?,
    };
    Ok(sheet)
}

/// Resolve roles, build the tree and serialize it for an already decoded table.
pub fn organize_table(sheet: &Sheet, options: &OrganizeOptions) -> ShootResult<Photoshoot> {
    let mapping = resolve_columns(sheet.column_names(), options.resolution)?;
    if sheet.is_empty() {
        warn!(sheet = sheet.name(), "table has no data rows");
    }
    let tree = build_tree(sheet, &mapping);

    let archive = match options.strategy {
        ArchiveStrategy::InMemory => archive_tree(&tree)?,
        ArchiveStrategy::Staged => {
            let staging = StagingArea::new(options.staging_dir.as_deref())?;
            let root = staging.realize(&tree)?;
            debug!(root = %root.display(), "staged folder tree");
            archive_dir(&root)?
        }
    };

    Ok(Photoshoot { tree, archive })
}

/// Validate an upload and turn it into a photoshoot archive.
///
/// `filename` is `None` when the request carried no file. Any failure aborts
/// the build; staging directories are removed either way.
pub fn organize_upload(
    filename: Option<&str>,
    bytes: &[u8],
    options: &OrganizeOptions,
) -> ShootResult<Photoshoot> {
    let kind = classify_filename(filename)?;
    check_size(bytes.len(), options.max_upload_bytes)?;

    let sheet = read_table(kind, bytes, options)?;
    let photoshoot = organize_table(&sheet, options)?;

    info!(
        filename = filename.unwrap_or_default(),
        sheet = sheet.name(),
        rows = sheet.row_count(),
        directories = photoshoot.tree.len(),
        bytes = photoshoot.archive.len(),
        strategy = ?options.strategy,
        "built photoshoot archive"
    );

    Ok(photoshoot)
}
