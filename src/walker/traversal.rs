//! SizeWalker - recursive directory size accumulation

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::WalkError;

use super::config::WalkerConfig;
use super::index::SizeIndex;
use super::snapshot::{DirectorySnapshot, Plan, WalkContext};
use super::source::{DirectorySource, OsFileSystem, SubdirEntry};

/// Size of one directory, or the fact that it could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "bytes", rename_all = "lowercase")]
pub enum Measurement {
    Sized(u64),
    Inaccessible,
}

impl Measurement {
    /// Bytes this directory adds to its parent. Unreadable directories add 0.
    pub fn bytes(self) -> u64 {
        match self {
            Measurement::Sized(bytes) => bytes,
            Measurement::Inaccessible => 0,
        }
    }

    pub fn is_accessible(self) -> bool {
        matches!(self, Measurement::Sized(_))
    }
}

/// Result of a full walk.
#[derive(Debug, Clone)]
pub struct WalkReport {
    pub root: PathBuf,
    /// The root's own total. Never part of `index`.
    pub total: Measurement,
    pub index: SizeIndex,
    /// Directories whose listing failed, in traversal order.
    pub inaccessible: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Index and failures collected below one subtree.
struct Fragment {
    bytes: u64,
    index: SizeIndex,
    inaccessible: Vec<PathBuf>,
}

/// Depth-first directory size walker.
pub struct SizeWalker<S = OsFileSystem> {
    config: WalkerConfig,
    source: S,
}

impl SizeWalker<OsFileSystem> {
    pub fn new(config: WalkerConfig) -> Self {
        Self::with_source(config, OsFileSystem)
    }
}

impl<S: DirectorySource> SizeWalker<S> {
    pub fn with_source(config: WalkerConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Measure `root`, recording every directory below it into `index`.
    ///
    /// `root` itself is never recorded, nor is the protected path.
    pub fn compute_size(&self, root: &Path, index: &mut SizeIndex) -> Result<Measurement, WalkError> {
        let mut inaccessible = Vec::new();
        self.in_pool(|| self.measure_root(root, index, &mut inaccessible))
    }

    /// Walk `root` and collect everything the report needs.
    pub fn walk(&self, root: &Path) -> Result<WalkReport, WalkError> {
        let started = Instant::now();
        let mut index = SizeIndex::new();
        let mut inaccessible = Vec::new();

        let total = self.in_pool(|| self.measure_root(root, &mut index, &mut inaccessible))?;

        let elapsed = started.elapsed();
        info!(
            root = %root.display(),
            total_bytes = total.bytes(),
            directories = index.len(),
            inaccessible = inaccessible.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "walk finished"
        );

        Ok(WalkReport {
            root: root.to_path_buf(),
            total,
            index,
            inaccessible,
            elapsed,
        })
    }

    fn measure_root(
        &self,
        root: &Path,
        index: &mut SizeIndex,
        inaccessible: &mut Vec<PathBuf>,
    ) -> Result<Measurement, WalkError> {
        let context = WalkContext::new(root, self.config.protected_path.as_deref());
        let attributes = match self.source.attributes(root) {
            Ok(attributes) => attributes,
            Err(err) => {
                warn!(path = %root.display(), error = %err, "cannot read directory attributes");
                inaccessible.push(root.to_path_buf());
                return Ok(Measurement::Inaccessible);
            }
        };
        let entry = SubdirEntry {
            path: root.to_path_buf(),
            attributes,
        };
        self.measure(&entry, &context, index, inaccessible)
    }

    fn measure(
        &self,
        dir: &SubdirEntry,
        context: &WalkContext,
        index: &mut SizeIndex,
        inaccessible: &mut Vec<PathBuf>,
    ) -> Result<Measurement, WalkError> {
        let snapshot = match DirectorySnapshot::capture(&self.source, dir, context) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(path = %dir.path.display(), error = %err, "cannot list directory");
                inaccessible.push(dir.path.clone());
                return Ok(Measurement::Inaccessible);
            }
        };

        let bytes = match snapshot.plan() {
            Plan::Skip => {
                debug!(path = %snapshot.path.display(), "skipping protected directory");
                return Ok(Measurement::Sized(0));
            }
            Plan::DescendOnly => {
                debug!(path = %snapshot.path.display(), "system directory, own files not counted");
                self.measure_subdirectories(
                    &snapshot.subdirectories,
                    context,
                    index,
                    inaccessible,
                )?
            }
            Plan::Full => {
                snapshot.file_bytes()
                    + self.measure_subdirectories(
                        &snapshot.subdirectories,
                        context,
                        index,
                        inaccessible,
                    )?
            }
        };

        if snapshot.is_recorded() {
            index.insert(snapshot.path, bytes)?;
        }
        Ok(Measurement::Sized(bytes))
    }

    fn measure_subdirectories(
        &self,
        subdirectories: &[SubdirEntry],
        context: &WalkContext,
        index: &mut SizeIndex,
        inaccessible: &mut Vec<PathBuf>,
    ) -> Result<u64, WalkError> {
        if self.config.parallel_workers == 1 || subdirectories.len() < 2 {
            let mut bytes = 0;
            for subdirectory in subdirectories {
                bytes += self
                    .measure(subdirectory, context, index, inaccessible)?
                    .bytes();
            }
            return Ok(bytes);
        }

        // Each sibling fills its own fragment; merging them in listing order
        // gives the same index as the sequential walk.
        let fragments: Vec<Result<Fragment, WalkError>> = subdirectories
            .par_iter()
            .map(|subdirectory| -> Result<Fragment, WalkError> {
                let mut index = SizeIndex::new();
                let mut inaccessible = Vec::new();
                let bytes = self
                    .measure(subdirectory, context, &mut index, &mut inaccessible)?
                    .bytes();
                Ok(Fragment {
                    bytes,
                    index,
                    inaccessible,
                })
            })
            .collect();

        let mut bytes = 0;
        for fragment in fragments {
            let fragment = fragment?;
            bytes += fragment.bytes;
            index.merge(fragment.index)?;
            inaccessible.extend(fragment.inaccessible);
        }
        Ok(bytes)
    }

    fn in_pool<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match self.config.parallel_workers {
            0 | 1 => op(),
            workers => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(op),
                Err(err) => {
                    // Fall back to rayon's global pool
                    warn!(error = %err, workers, "cannot build worker pool");
                    op()
                }
            },
        }
    }
}
