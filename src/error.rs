//! Error types for the simulator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Rejected simulator configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page table must have at least one page")]
    NoPages,

    #[error("{pages} pages exceeds the limit of {max}")]
    TooManyPages { pages: usize, max: usize },

    #[error("page size must be non-zero")]
    ZeroPageSize,

    #[error("process size unit must be non-zero")]
    ZeroUnitSize,

    #[error("invalid unit range {min}..={max}")]
    InvalidUnitRange { min: u32, max: u32 },

    /// The smallest request must fit in one page or placement can never finish.
    #[error("smallest process ({min_size} MB) exceeds page size ({page_size} MB)")]
    MinSizeExceedsPage { min_size: u32, page_size: u32 },

    #[error("{0} overflows a 32-bit value")]
    Overflow(&'static str),
}

/// Top-level error
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
