//! Zip serialization of a folder tree.
//!
//! Entry names are relative to the parent of the root folder, so every entry
//! starts with the root name (`PHOTOSHOOT/...`). Directory entries end in `/`
//! and are written even when empty. Timestamps are pinned to the zip epoch so
//! the same tree always yields the same bytes.

use crate::error::ShootResult;
use crate::tree::DirectoryTree;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// File name offered to the browser for the generated archive.
pub const ARCHIVE_FILE_NAME: &str = "PHOTOSHOOT.zip";

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Serialize an in-memory tree: the root entry, then every directory in tree order.
pub fn archive_tree(tree: &DirectoryTree) -> ShootResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.add_directory(format!("{}/", tree.root()), entry_options())?;
    for path in tree.paths() {
        zip.add_directory(format!("{path}/"), entry_options())?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(entries = tree.len() + 1, bytes = bytes.len(), "archived folder tree");
    Ok(bytes)
}

/// Serialize a folder tree that exists on disk.
///
/// Every directory (including `root` itself) becomes a directory entry and
/// every regular file a deflated file entry. The walk is sorted by file name.
/// The source tree is left untouched.
pub fn archive_dir(root: &Path) -> ShootResult<Vec<u8>> {
    let root_name = root
        .file_name()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot archive {}: path has no final component", root.display()),
            )
        })?
        .to_string_lossy()
        .into_owned();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(&root_name, root, entry.path())?;

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), entry_options())?;
        } else if entry.file_type().is_file() {
            zip.start_file(name, entry_options())?;
            let mut file = File::open(entry.path())?;
            io::copy(&mut file, &mut zip)?;
        } else {
            continue;
        }
        entries += 1;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(root = %root.display(), entries, bytes = bytes.len(), "archived staged tree");
    Ok(bytes)
}

/// `root_name/relative/path` with `/` separators.
fn entry_name(root_name: &str, root: &Path, path: &Path) -> io::Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut name = root_name.to_string();
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(name)
}

/// Names of all entries in a zip archive, in archive order.
pub fn entry_names<R: Read + Seek>(reader: R) -> ShootResult<Vec<String>> {
    let archive = ZipArchive::new(reader)?;
    Ok(archive.file_names().map(str::to_string).collect())
}
