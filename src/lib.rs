pub mod allocator;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod simulator;

// Re-export commonly used items for convenience
pub use config::SimConfig;
pub use error::{ConfigError, SimError};
pub use io::Report;
pub use memory::{Allocation, PageTable};
pub use simulator::{Simulator, Summary};
