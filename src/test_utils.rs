//! Test utilities for building directory trees on disk.
//!
//! This module is only compiled with the `test-utils` feature (tests and benchmarks).

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use crate::walker::MemoryFileSystem;

/// A temporary directory tree for testing.
///
/// Files are filled with zero bytes of the requested length.
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file of `len` bytes.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, path: &str, len: usize) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, vec![0u8; len]).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Build a wide, shallow-ish tree: `dirs` top-level directories, each
    /// with a nested subdirectory and `files_per_dir` files at both levels.
    pub fn populate(&self, dirs: usize, files_per_dir: usize) {
        for d in 0..dirs {
            for f in 0..files_per_dir {
                self.add_file(&format!("dir{d}/file{f}.bin"), f + 1);
                self.add_file(&format!("dir{d}/nested/file{f}.bin"), f + 1);
            }
        }
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
