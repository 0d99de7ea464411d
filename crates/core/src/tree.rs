//! In-memory model of the folder hierarchy.

use indexmap::IndexSet;

/// Top-level folder of every generated tree.
pub const ROOT_DIR_NAME: &str = "PHOTOSHOOT";

/// An ordered set of directories below a single root folder.
///
/// Paths are stored as `/`-separated strings starting with the root name,
/// e.g. `PHOTOSHOOT/1/A/Alice`. Inserting a path also inserts each of its
/// ancestors below the root, so the set never holds an orphan. The root
/// itself is implicit and not part of [`DirectoryTree::paths`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTree {
    root: String,
    dirs: IndexSet<String>,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new(ROOT_DIR_NAME)
    }
}

impl DirectoryTree {
    /// Create an empty tree under `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            dirs: IndexSet::new(),
        }
    }

    /// Name of the root folder.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Add the directory `root/segments[0]/.../segments[n-1]` and its ancestors.
    ///
    /// Returns `true` if the leaf was not already present. Segments are taken
    /// as-is; callers sanitize them first.
    pub fn insert<S: AsRef<str>>(&mut self, segments: &[S]) -> bool {
        let mut path = self.root.clone();
        let mut inserted = false;
        for segment in segments {
            path.push('/');
            path.push_str(segment.as_ref());
            inserted = self.dirs.insert(path.clone());
        }
        inserted
    }

    /// Whether `path` (including the root prefix) is in the tree.
    pub fn contains(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }

    /// Directories in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    /// Number of directories, not counting the root.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Whether only the root exists.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}
