//! sizewalk - find which directories take up the most disk space

pub mod error;
pub mod output;
#[cfg(feature = "test-utils")]
pub mod test_utils;
pub mod walker;

pub use error::WalkError;
pub use output::{ListingFormatter, OutputConfig, format_size, print_json};
pub use walker::{
    Measurement, OsFileSystem, SizeIndex, SizeRecord, SizeWalker, WalkReport, WalkerConfig,
};
