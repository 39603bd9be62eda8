//! Directory listing seam between the walker and the filesystem
//!
//! The walker never touches `std::fs` directly. It asks a [`DirectorySource`]
//! for the immediate contents of one directory at a time, which lets the
//! classification heuristic run against an in-memory tree in tests.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Platform attribute flags of a file or directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attributes(u32);

impl Attributes {
    pub const NONE: Attributes = Attributes(0);
    /// Matches `FILE_ATTRIBUTE_SYSTEM` on Windows.
    pub const SYSTEM: Attributes = Attributes(0x4);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether the operating system owns this entry.
    pub fn is_system(self) -> bool {
        self.0 & Self::SYSTEM.0 != 0
    }

    #[cfg(windows)]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::windows::fs::MetadataExt;
        Self(metadata.file_attributes())
    }

    /// Non-Windows platforms have no system-owned bit.
    #[cfg(not(windows))]
    pub fn from_metadata(_metadata: &Metadata) -> Self {
        Self::NONE
    }
}

/// An immediate file inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub len: u64,
    pub attributes: Attributes,
}

/// An immediate subdirectory inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdirEntry {
    pub path: PathBuf,
    pub attributes: Attributes,
}

/// Immediate contents of one directory, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub files: Vec<FileEntry>,
    pub subdirectories: Vec<SubdirEntry>,
}

/// Something that can list directories.
pub trait DirectorySource: Sync {
    /// List the immediate files and subdirectories of `path`.
    fn list(&self, path: &Path) -> io::Result<Listing>;

    /// Attribute flags of `path` itself. Only needed for the tree root;
    /// every other directory gets its flags from its parent's listing.
    fn attributes(&self, path: &Path) -> io::Result<Attributes>;
}

/// The real filesystem.
///
/// Symbolic links are neither files nor subdirectories here and are never
/// followed. Entries that vanish between enumeration and `stat` are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl DirectorySource for OsFileSystem {
    fn list(&self, path: &Path) -> io::Result<Listing> {
        let mut listing = Listing::default();

        for entry in fs::read_dir(path)?.filter_map(|e| e.ok()) {
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            let file_type = metadata.file_type();
            let attributes = Attributes::from_metadata(&metadata);

            if file_type.is_dir() {
                listing.subdirectories.push(SubdirEntry {
                    path: entry.path(),
                    attributes,
                });
            } else if file_type.is_file() {
                listing.files.push(FileEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    len: metadata.len(),
                    attributes,
                });
            }
        }

        Ok(listing)
    }

    fn attributes(&self, path: &Path) -> io::Result<Attributes> {
        fs::symlink_metadata(path).map(|m| Attributes::from_metadata(&m))
    }
}
