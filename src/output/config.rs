//! Output configuration types

const DEFAULT_DECIMALS: usize = 2;
const DEFAULT_PAGE_SIZE: usize = 25;

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Decimal places for human-readable sizes
    pub decimals: usize,
    /// Lines between "Press Enter" pauses; 0 disables paging
    pub page_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            decimals: DEFAULT_DECIMALS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
