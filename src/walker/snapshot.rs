//! Per-directory classification
//!
//! Each visited directory is listed once and classified into a
//! [`DirectorySnapshot`]. The snapshot decides whether the directory's own
//! files count, whether its subdirectories are walked, and whether the
//! directory ends up in the size index.

use std::io;
use std::path::{Path, PathBuf};

use super::source::{DirectorySource, FileEntry, SubdirEntry};

/// Paths that the classification compares every directory against.
#[derive(Debug, Clone)]
pub struct WalkContext {
    pub root: PathBuf,
    pub protected: Option<PathBuf>,
}

impl WalkContext {
    pub fn new(root: &Path, protected: Option<&Path>) -> Self {
        Self {
            root: root.to_path_buf(),
            protected: protected.map(Path::to_path_buf),
        }
    }

    pub fn is_tree_root(&self, path: &Path) -> bool {
        same_path(path, &self.root)
    }

    pub fn is_protected_root(&self, path: &Path) -> bool {
        self.protected.as_deref().is_some_and(|p| same_path(path, p))
    }
}

/// Windows paths are case-insensitive: `C:\WINDOWS` is `C:\Windows`.
#[cfg(windows)]
fn same_path(a: &Path, b: &Path) -> bool {
    let mut left = a.components();
    let mut right = b.components();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) => {
                let l = l.as_os_str().to_string_lossy();
                let r = r.as_os_str().to_string_lossy();
                if l.to_lowercase() != r.to_lowercase() {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

#[cfg(not(windows))]
fn same_path(a: &Path, b: &Path) -> bool {
    a == b
}

/// What the walker does with a classified directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// The designated protected root: contributes nothing, not walked.
    Skip,
    /// System-owned with only system-owned children: its own files are
    /// ignored but subdirectories are still walked.
    DescendOnly,
    /// Own files plus every subdirectory.
    Full,
}

/// One listed and classified directory. Lives only for the duration of the
/// call that measures it.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub path: PathBuf,
    pub files: Vec<FileEntry>,
    pub subdirectories: Vec<SubdirEntry>,
    pub is_protected_system: bool,
    pub is_designated_protected_root: bool,
    pub is_tree_root: bool,
    /// Shallow: only immediate entries are inspected. A non-system child
    /// counts even if it holds no bytes.
    pub has_non_system_child: bool,
}

impl DirectorySnapshot {
    /// List `dir` and classify it.
    pub fn capture<S: DirectorySource + ?Sized>(
        source: &S,
        dir: &SubdirEntry,
        context: &WalkContext,
    ) -> io::Result<Self> {
        let listing = source.list(&dir.path)?;

        let has_non_system_child = listing.files.iter().any(|f| !f.attributes.is_system())
            || listing
                .subdirectories
                .iter()
                .any(|d| !d.attributes.is_system());

        Ok(Self {
            is_protected_system: dir.attributes.is_system(),
            is_designated_protected_root: context.is_protected_root(&dir.path),
            is_tree_root: context.is_tree_root(&dir.path),
            has_non_system_child,
            files: listing.files,
            subdirectories: listing.subdirectories,
            path: dir.path.clone(),
        })
    }

    pub fn plan(&self) -> Plan {
        if self.is_designated_protected_root {
            Plan::Skip
        } else if self.is_protected_system && !self.has_non_system_child {
            Plan::DescendOnly
        } else {
            Plan::Full
        }
    }

    /// The tree root and the protected root never appear in the index.
    pub fn is_recorded(&self) -> bool {
        !self.is_tree_root && !self.is_designated_protected_root
    }

    /// Sum of the immediate files' lengths.
    pub fn file_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.len).sum()
    }
}
