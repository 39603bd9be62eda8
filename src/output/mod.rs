//! Size report formatting and display
//!
//! The walker produces an unordered index; everything here works on records
//! already sorted largest first:
//!
//! - `config` - Output configuration types
//! - `size` - 1024-based human-readable sizes
//! - `listing` - Console listing with paging and a summary footer
//! - `json` - JSON output

mod config;
mod json;
mod listing;
mod size;

// Re-export public types and functions
pub use config::OutputConfig;
pub use json::{print_json, to_json};
pub use listing::{CONTINUE_PROMPT, EXIT_PROMPT, ListingFormatter, prompt};
pub use size::format_size;
