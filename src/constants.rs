pub const TOTAL_PAGES: usize = 100;
// cap for pool sizes given on the command line
pub const MAX_PAGES: usize = 1_000_000;
pub const PAGE_SIZE_MB: u32 = 160;
pub const TOTAL_MEMORY_MB: u32 = TOTAL_PAGES as u32 * PAGE_SIZE_MB;

// each generated unit is 80 MB, drawn as 1..=30 units
pub const PROCESS_SIZE_UNIT_MB: u32 = 80;
pub const MIN_UNITS: u32 = 1;
pub const MAX_UNITS: u32 = 30;

pub const START_ADDRESS: u32 = 2000;

pub const FREE_PAGE: u32 = 0;
pub const PAGE_TABLE_WRAP: usize = 20;
