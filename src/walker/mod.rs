//! Directory size walking
//!
//! A single depth-first walk lists each directory once, classifies it, and
//! records its cumulative size into a [`SizeIndex`]:
//!
//! - `source` - the listing seam (`OsFileSystem` on a real disk)
//! - `snapshot` - per-directory classification and the skip heuristic
//! - `index` - insertion-ordered path to size map
//! - `traversal` - the recursive `SizeWalker`, optionally parallel across siblings

mod config;
mod index;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod snapshot;
mod source;
mod traversal;

// Re-export public types
pub use config::{WalkerConfig, default_protected_path, default_root, resolve_path};
pub use index::{SizeIndex, SizeRecord};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryFileSystem;
pub use snapshot::{DirectorySnapshot, Plan, WalkContext};
pub use source::{Attributes, DirectorySource, FileEntry, Listing, OsFileSystem, SubdirEntry};
pub use traversal::{Measurement, SizeWalker, WalkReport};
