//! SizeIndex - directory path to cumulative size, in traversal order

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::WalkError;

/// One recorded directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeRecord {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Insertion-ordered map from directory path to size in bytes.
///
/// Keys are never overwritten: inserting a path twice is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeIndex {
    records: Vec<SizeRecord>,
    positions: HashMap<PathBuf, usize>,
}

impl SizeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf, size_bytes: u64) -> Result<(), WalkError> {
        if self.positions.contains_key(&path) {
            return Err(WalkError::DuplicatePath(path));
        }
        self.positions.insert(path.clone(), self.records.len());
        self.records.push(SizeRecord { path, size_bytes });
        Ok(())
    }

    /// Append every record of `other`, keeping its order.
    pub fn merge(&mut self, other: SizeIndex) -> Result<(), WalkError> {
        self.records.reserve(other.records.len());
        for record in other.records {
            self.insert(record.path, record.size_bytes)?;
        }
        Ok(())
    }

    pub fn get(&self, path: &Path) -> Option<u64> {
        self.positions
            .get(path)
            .map(|&i| self.records[i].size_bytes)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.positions.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SizeRecord> {
        self.records.iter()
    }

    /// Largest first; equal sizes ordered by path.
    pub fn into_sorted(self) -> Vec<SizeRecord> {
        let mut records = self.records;
        records.sort_by(|a, b| {
            b.size_bytes
                .cmp(&a.size_bytes)
                .then_with(|| a.path.cmp(&b.path))
        });
        records
    }
}

impl Serialize for SizeIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}
