use crate::constants::*;
use crate::error::ConfigError;

/// Memory pool and request-generator parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub total_pages: usize,
    pub page_size: u32,
    pub unit_size: u32,
    pub min_units: u32,
    pub max_units: u32,
    pub base_address: u32,
}

impl SimConfig {
    /// Total capacity of the pool in size-units
    pub fn total_memory(&self) -> u64 {
        self.total_pages as u64 * u64::from(self.page_size)
    }

    pub fn min_process_size(&self) -> u32 {
        self.min_units * self.unit_size
    }

    pub fn max_process_size(&self) -> u32 {
        self.max_units * self.unit_size
    }

    /// Check the parameters before any simulation runs.
    ///
    /// The placement loop redraws requests until one fits the remaining pages,
    /// so it only terminates if the smallest possible request fits in a single
    /// page. Configurations breaking that are rejected here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_pages == 0 {
            return Err(ConfigError::NoPages);
        }
        if self.total_pages > MAX_PAGES {
            return Err(ConfigError::TooManyPages {
                pages: self.total_pages,
                max: MAX_PAGES,
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.unit_size == 0 {
            return Err(ConfigError::ZeroUnitSize);
        }
        if self.min_units == 0 || self.min_units > self.max_units {
            return Err(ConfigError::InvalidUnitRange {
                min: self.min_units,
                max: self.max_units,
            });
        }

        let max_size = self
            .max_units
            .checked_mul(self.unit_size)
            .ok_or(ConfigError::Overflow("largest process size"))?;
        // min_units <= max_units, so this cannot overflow once max_size didn't
        let min_size = self.min_process_size();
        if min_size > self.page_size {
            return Err(ConfigError::MinSizeExceedsPage {
                min_size,
                page_size: self.page_size,
            });
        }
        // rounding up to whole pages
        max_size
            .checked_add(self.page_size - 1)
            .ok_or(ConfigError::Overflow("largest page-rounded process size"))?;

        let span = u32::try_from(self.total_pages)
            .ok()
            .and_then(|pages| pages.checked_mul(self.page_size))
            .ok_or(ConfigError::Overflow("total memory"))?;
        self.base_address
            .checked_add(span)
            .ok_or(ConfigError::Overflow("last start address"))?;

        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            total_pages: TOTAL_PAGES,
            page_size: PAGE_SIZE_MB,
            unit_size: PROCESS_SIZE_UNIT_MB,
            min_units: MIN_UNITS,
            max_units: MAX_UNITS,
            base_address: START_ADDRESS,
        }
    }
}
