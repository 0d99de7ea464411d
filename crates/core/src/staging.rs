//! On-disk staging of a folder tree.
//!
//! Each build gets its own temporary directory, so concurrent builds never
//! share a staging root. The directory is removed when the [`StagingArea`]
//! is dropped, whether or not the build succeeded.

use crate::error::ShootResult;
use crate::tree::DirectoryTree;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// A request-scoped scratch directory.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    /// Create a fresh staging directory, under `parent` if given, else under
    /// the system temporary directory.
    pub fn new(parent: Option<&Path>) -> ShootResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("photoshoot-");

        let dir = match parent {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };
        debug!(path = %dir.path().display(), "created staging area");

        Ok(Self { dir })
    }

    /// Location of the staging directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create every directory of `tree` inside this staging area.
    pub fn realize(&self, tree: &DirectoryTree) -> ShootResult<PathBuf> {
        realize_tree(self.path(), tree)
    }
}

/// Create `base/<root>` and every directory of `tree` below it.
///
/// An existing `base/<root>` is removed first so results of an earlier run
/// never mix with this one. Returns the root path.
pub fn realize_tree(base: &Path, tree: &DirectoryTree) -> ShootResult<PathBuf> {
    let root = base.join(tree.root());
    if root.exists() {
        debug!(path = %root.display(), "removing stale tree");
        fs::remove_dir_all(&root)?;
    }
    fs::create_dir_all(&root)?;

    for path in tree.paths() {
        // Segments never contain '/' once sanitized
        let dir = path.split('/').fold(base.to_path_buf(), |dir, segment| dir.join(segment));
        fs::create_dir_all(dir)?;
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_tree() -> DirectoryTree {
        let mut tree = DirectoryTree::default();
        tree.insert(&["1", "A", "Group Final"]);
        tree.insert(&["2"]);
        tree
    }

    #[test]
    fn test_realize_creates_every_directory() {
        let base = tempdir().unwrap();
        let root = realize_tree(base.path(), &sample_tree()).unwrap();

        assert_eq!(root, base.path().join("PHOTOSHOOT"));
        assert!(root.join("1").join("A").join("Group Final").is_dir());
        assert!(root.join("2").is_dir());
    }

    #[test]
    fn test_realize_removes_stale_tree() {
        let base = tempdir().unwrap();
        let stale = base.path().join("PHOTOSHOOT").join("old-day");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("leftover.jpg"), b"x").unwrap();

        let root = realize_tree(base.path(), &sample_tree()).unwrap();

        assert!(!stale.exists());
        assert!(root.join("2").is_dir());
    }

    #[test]
    fn test_staging_area_is_unique_and_cleaned_up() {
        let parent = tempdir().unwrap();
        let first = StagingArea::new(Some(parent.path())).unwrap();
        let second = StagingArea::new(Some(parent.path())).unwrap();
        assert_ne!(first.path(), second.path());

        let root = first.realize(&sample_tree()).unwrap();
        assert!(root.starts_with(first.path()));

        let staged = first.path().to_path_buf();
        drop(first);
        assert!(!staged.exists());
        assert!(second.path().exists());
    }
}
