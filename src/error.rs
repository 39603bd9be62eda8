//! Error types for the size walker

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a walk.
///
/// Listing failures are not errors: an unreadable directory is reported as
/// [`Measurement::Inaccessible`](crate::Measurement) and the walk carries on.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The same directory was recorded twice. Paths are unique within a tree,
    /// so this means the traversal itself is broken.
    #[error("directory recorded twice: {}", .0.display())]
    DuplicatePath(PathBuf),
}
