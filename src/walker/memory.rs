//! In-memory directory tree for exercising the walker without a real disk.
//!
//! Unlike the real filesystem this can mark any entry system-owned on any
//! platform, and can make individual directories fail to list.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::source::{Attributes, DirectorySource, FileEntry, Listing, SubdirEntry};

#[derive(Debug, Clone)]
enum Node {
    Dir {
        attributes: Attributes,
        children: Vec<PathBuf>,
        failure: Option<io::ErrorKind>,
    },
    File {
        len: u64,
        attributes: Attributes,
    },
}

/// A directory tree held in a map. Missing parents are created on demand as
/// plain (non-system) directories. Children list in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: HashMap<PathBuf, Node>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert_dir(path.as_ref(), Attributes::NONE);
        self
    }

    pub fn system_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert_dir(path.as_ref(), Attributes::SYSTEM);
        self
    }

    pub fn file(mut self, path: impl AsRef<Path>, len: u64) -> Self {
        self.insert_file(path.as_ref(), len, Attributes::NONE);
        self
    }

    pub fn system_file(mut self, path: impl AsRef<Path>, len: u64) -> Self {
        self.insert_file(path.as_ref(), len, Attributes::SYSTEM);
        self
    }

    /// Make listing `path` fail with `PermissionDenied`.
    pub fn unreadable(self, path: impl AsRef<Path>) -> Self {
        self.failing(path.as_ref(), io::ErrorKind::PermissionDenied)
    }

    /// Keep `path` in its parent's listing but make listing it fail with
    /// `NotFound`, as if it was deleted mid-walk.
    pub fn vanished(self, path: impl AsRef<Path>) -> Self {
        self.failing(path.as_ref(), io::ErrorKind::NotFound)
    }

    fn failing(mut self, path: &Path, kind: io::ErrorKind) -> Self {
        self.insert_dir(path, Attributes::NONE);
        if let Some(Node::Dir { failure, .. }) = self.nodes.get_mut(path) {
            *failure = Some(kind);
        }
        self
    }

    fn insert_dir(&mut self, path: &Path, attributes: Attributes) {
        match self.nodes.get_mut(path) {
            Some(Node::Dir {
                attributes: existing,
                ..
            }) => {
                if attributes.is_system() {
                    *existing = attributes;
                }
            }
            _ => {
                if !self.nodes.contains_key(path) {
                    self.link_to_parent(path);
                }
                self.nodes.insert(
                    path.to_path_buf(),
                    Node::Dir {
                        attributes,
                        children: Vec::new(),
                        failure: None,
                    },
                );
            }
        }
    }

    fn insert_file(&mut self, path: &Path, len: u64, attributes: Attributes) {
        if !self.nodes.contains_key(path) {
            self.link_to_parent(path);
        }
        self.nodes
            .insert(path.to_path_buf(), Node::File { len, attributes });
    }

    fn link_to_parent(&mut self, path: &Path) {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return;
        };
        if !self.nodes.contains_key(parent) {
            self.insert_dir(parent, Attributes::NONE);
        }
        if let Some(Node::Dir { children, .. }) = self.nodes.get_mut(parent) {
            children.push(path.to_path_buf());
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such directory", path.display()),
    )
}

impl DirectorySource for MemoryFileSystem {
    fn list(&self, path: &Path) -> io::Result<Listing> {
        let Some(Node::Dir {
            children, failure, ..
        }) = self.nodes.get(path)
        else {
            return Err(not_found(path));
        };
        if let Some(kind) = failure {
            return Err(io::Error::new(
                *kind,
                format!("{}: cannot list directory", path.display()),
            ));
        }

        let mut listing = Listing::default();
        for child in children {
            match self.nodes.get(child) {
                Some(Node::Dir { attributes, .. }) => listing.subdirectories.push(SubdirEntry {
                    path: child.clone(),
                    attributes: *attributes,
                }),
                Some(Node::File { len, attributes }) => listing.files.push(FileEntry {
                    name: child
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    len: *len,
                    attributes: *attributes,
                }),
                None => {}
            }
        }
        Ok(listing)
    }

    fn attributes(&self, path: &Path) -> io::Result<Attributes> {
        match self.nodes.get(path) {
            Some(Node::Dir { attributes, .. }) | Some(Node::File { attributes, .. }) => {
                Ok(*attributes)
            }
            None => Err(not_found(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_created_and_ordered() {
        let fs = MemoryFileSystem::new()
            .file("/R/b", 2)
            .dir("/R/D")
            .file("/R/a", 1);

        let listing = fs.list(Path::new("/R")).unwrap();
        let names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(listing.subdirectories[0].path, PathBuf::from("/R/D"));
        assert!(fs.list(Path::new("/")).is_ok());
    }

    #[test]
    fn test_system_flag_upgrades_existing_dir() {
        let fs = MemoryFileSystem::new().file("/R/S/x", 1).system_dir("/R/S");
        assert!(fs.attributes(Path::new("/R/S")).unwrap().is_system());
        let listing = fs.list(Path::new("/R")).unwrap();
        assert_eq!(listing.subdirectories.len(), 1);
        assert!(listing.subdirectories[0].attributes.is_system());
    }

    #[test]
    fn test_failing_directories_stay_listed() {
        let fs = MemoryFileSystem::new()
            .unreadable("/R/locked")
            .file("/R/gone/f", 1)
            .vanished("/R/gone");

        let err = fs.list(Path::new("/R/locked")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        let err = fs.list(Path::new("/R/gone")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(fs.list(Path::new("/R")).unwrap().subdirectories.len(), 2);
        assert_eq!(
            fs.list(Path::new("/missing")).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
