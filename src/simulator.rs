use tracing::{debug, trace};

use crate::allocator::{pages_needed, ProcessSizeGenerator};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::memory::{Allocation, PageTable, ProcessId};

/// First-fit contiguous allocator over a fixed page pool.
///
/// Each instance owns its own random stream, so two simulators built from the
/// same seed and config produce identical allocations and page tables.
pub struct Simulator {
    config: SimConfig,
    seed: u64,
    generator: ProcessSizeGenerator,
    page_table: PageTable,
    allocations: Vec<Allocation>,
    next_free_index: usize,
    next_address: u32,
    next_pid: ProcessId,
}

impl Simulator {
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Simulator with the reference configuration, which always validates
    pub fn with_reference(seed: u64) -> Self {
        Self::build(SimConfig::default(), seed)
    }

    fn build(config: SimConfig, seed: u64) -> Self {
        Simulator {
            generator: ProcessSizeGenerator::new(&config, seed),
            page_table: PageTable::new(config.total_pages),
            allocations: Vec::new(),
            next_free_index: 0,
            next_address: config.base_address,
            next_pid: 1,
            config,
            seed,
        }
    }

    /// Place processes until every page is owned
    pub fn run(&mut self) {
        while self.step().is_some() {}
        debug!(
            seed = self.seed,
            processes = self.allocations.len(),
            "page table full"
        );
    }

    /// Place exactly one process at the lowest free page. Returns `None` once
    /// the table is full.
    pub fn step(&mut self) -> Option<Allocation> {
        let total_pages = self.config.total_pages;
        if self.next_free_index == total_pages {
            return None;
        }
        let remaining = total_pages - self.next_free_index;

        // Redraw until a request fits. Terminates because validate() guarantees
        // the smallest request needs one page and at least one page is free.
        // Changing the unit range or page size without that check would make
        // this loop spin forever.
        let mut attempts: u32 = 0;
        let (size, pages) = loop {
            attempts += 1;
            let size = self.generator.next_size();
            let pages = pages_needed(size, self.config.page_size);
            if pages <= remaining {
                break (size, pages);
            }
            trace!(size, pages, remaining, "request does not fit, redrawing");
        };

        let start_page = self.next_free_index;
        self.page_table.assign(start_page..start_page + pages, self.next_pid);

        let allocation = Allocation {
            pid: self.next_pid,
            start_address: self.next_address,
            process_size: size,
            pages_allocated: pages,
            unused_space: pages as u32 * self.config.page_size - size,
            start_page,
        };
        self.allocations.push(allocation);

        debug!(
            pid = allocation.pid,
            start_page,
            pages,
            size,
            attempts,
            "allocated process"
        );

        self.next_free_index += pages;
        self.next_address += pages as u32 * self.config.page_size;
        self.next_pid += 1;

        Some(allocation)
    }

    pub fn is_complete(&self) -> bool {
        self.next_free_index == self.config.total_pages
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn summary(&self) -> Summary {
        Summary::from_allocations(&self.allocations)
    }
}

/// Totals over an allocation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub process_count: usize,
    pub pages_used: usize,
    pub total_requested: u64,
    pub total_unused: u64,
    pub largest_process: u32,
    pub smallest_process: u32,
}

impl Summary {
    pub fn from_allocations(allocations: &[Allocation]) -> Self {
        if allocations.is_empty() {
            return Summary::default();
        }
        Summary {
            process_count: allocations.len(),
            pages_used: allocations.iter().map(|a| a.pages_allocated).sum(),
            total_requested: allocations.iter().map(|a| u64::from(a.process_size)).sum(),
            total_unused: allocations.iter().map(|a| u64::from(a.unused_space)).sum(),
            largest_process: allocations.iter().map(|a| a.process_size).max().unwrap_or(0),
            smallest_process: allocations.iter().map(|a| a.process_size).min().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_reference(seed: u64) -> Simulator {
        let mut sim = Simulator::with_reference(seed);
        sim.run();
        sim
    }

    #[test]
    fn test_fills_every_page() {
        let sim = run_reference(42);
        assert!(sim.is_complete());
        assert!(sim.page_table().is_full());
        let pages: usize = sim.allocations().iter().map(|a| a.pages_allocated).sum();
        assert_eq!(pages, 100);
    }

    #[test]
    fn test_first_record_starts_at_base() {
        let sim = run_reference(1);
        let first = sim.allocations()[0];
        assert_eq!(first.pid, 1);
        assert_eq!(first.start_address, 2000);
        assert_eq!(first.start_page, 0);
    }

    #[test]
    fn test_records_are_consistent() {
        let sim = run_reference(2024);
        let mut expected_page = 0;
        let mut expected_address = 2000;

        for (i, alloc) in sim.allocations().iter().enumerate() {
            assert_eq!(alloc.pid as usize, i + 1);
            assert_eq!(alloc.start_page, expected_page);
            assert_eq!(alloc.start_address, expected_address);
            assert_eq!(alloc.process_size % 80, 0);
            assert!((80..=2400).contains(&alloc.process_size));
            assert_eq!(
                alloc.unused_space,
                alloc.pages_allocated as u32 * 160 - alloc.process_size
            );
            assert!(alloc.unused_space < 160);

            for page in alloc.pages() {
                assert_eq!(sim.page_table().owner(page), Some(alloc.pid));
            }

            expected_page += alloc.pages_allocated;
            expected_address += alloc.pages_allocated as u32 * 160;
        }
        assert_eq!(expected_page, 100);
    }

    #[test]
    fn test_step_never_overshoots() {
        let mut sim = Simulator::with_reference(99);
        let mut used = 0;
        while let Some(alloc) = sim.step() {
            assert!(alloc.pages_allocated <= 100 - used);
            used += alloc.pages_allocated;
        }
        assert_eq!(used, 100);
        // further steps are no-ops
        assert_eq!(sim.step(), None);
    }

    #[test]
    fn test_run_is_idempotent_when_full() {
        let mut sim = run_reference(5);
        let before = sim.allocations().to_vec();
        sim.run();
        assert_eq!(sim.allocations(), before.as_slice());
    }

    #[test]
    fn test_same_seed_same_result() {
        let a = run_reference(314159);
        let b = run_reference(314159);
        assert_eq!(a.allocations(), b.allocations());
        assert!(a.page_table().iter().eq(b.page_table().iter()));
    }

    #[test]
    fn test_unused_space_examples() {
        // Force single-size requests to pin down the rounding behavior
        let config = SimConfig {
            min_units: 2,
            max_units: 2,
            ..SimConfig::default()
        };
        let mut sim = Simulator::new(config, 0).unwrap();
        let alloc = sim.step().unwrap();
        assert_eq!(alloc.process_size, 160);
        assert_eq!(alloc.pages_allocated, 1);
        assert_eq!(alloc.unused_space, 0);

        let config = SimConfig {
            min_units: 3,
            max_units: 3,
            unit_size: 80,
            page_size: 240,
            ..SimConfig::default()
        };
        let mut sim = Simulator::new(config, 0).unwrap();
        assert_eq!(sim.step().unwrap().unused_space, 0);

        let config = SimConfig {
            min_units: 1,
            max_units: 3,
            ..SimConfig::default()
        };
        let mut sim = Simulator::new(config, 0).unwrap();
        sim.run();
        for alloc in sim.allocations() {
            match alloc.process_size {
                240 => {
                    assert_eq!(alloc.pages_allocated, 2);
                    assert_eq!(alloc.unused_space, 80);
                }
                160 => assert_eq!(alloc.unused_space, 0),
                80 => assert_eq!(alloc.unused_space, 80),
                other => panic!("unexpected size {}", other),
            }
        }
    }

    #[test]
    fn test_small_pool() {
        let config = SimConfig {
            total_pages: 1,
            ..SimConfig::default()
        };
        let mut sim = Simulator::new(config, 8).unwrap();
        sim.run();
        assert_eq!(sim.allocations().len(), 1);
        assert_eq!(sim.allocations()[0].pages_allocated, 1);
        assert!(sim.allocations()[0].process_size <= 160);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            min_units: 3,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulator::new(config, 0),
            Err(ConfigError::MinSizeExceedsPage { .. })
        ));
    }

    #[test]
    fn test_summary() {
        let sim = run_reference(77);
        let summary = sim.summary();
        assert_eq!(summary.process_count, sim.allocations().len());
        assert_eq!(summary.pages_used, 100);
        assert_eq!(summary.total_requested + summary.total_unused, 16_000);
        assert!(summary.smallest_process >= 80);
        assert!(summary.largest_process <= 2400);
        assert!(summary.smallest_process <= summary.largest_process);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::from_allocations(&[]), Summary::default());
    }
}
