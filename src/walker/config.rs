//! Configuration for the size walker

use std::path::{Path, PathBuf};

/// Configuration for size walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Directory that is never walked or reported, typically the OS install.
    pub protected_path: Option<PathBuf>,
    /// Number of parallel workers for sibling subdirectories.
    /// 0 = auto-detect (rayon's global pool)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            protected_path: default_protected_path(),
            parallel_workers: 1,
        }
    }
}

/// Where a walk starts when no path is given: the system volume.
#[cfg(windows)]
pub fn default_root() -> PathBuf {
    let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
    PathBuf::from(format!("{}\\", drive.trim_end_matches('\\')))
}

#[cfg(not(windows))]
pub fn default_root() -> PathBuf {
    PathBuf::from("/")
}

/// The operating system's installation directory, if the platform has one.
#[cfg(windows)]
pub fn default_protected_path() -> Option<PathBuf> {
    Some(
        std::env::var_os("SystemRoot")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\Windows")),
    )
}

#[cfg(not(windows))]
pub fn default_protected_path() -> Option<PathBuf> {
    None
}

/// Resolve `path` to the form directory listing produces: absolute, with
/// `.`/`..` and links resolved and on-disk casing. Falls back to joining onto
/// the current directory when the path cannot be resolved.
pub fn resolve_path(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(p) => p,
        Err(_) if path.is_absolute() => path.to_path_buf(),
        Err(_) => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path),
    }
}
