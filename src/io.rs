use std::fmt;
use std::fs;
use std::path::Path;

use crate::constants::PAGE_TABLE_WRAP;
use crate::error::{Result, SimError};
use crate::simulator::Simulator;

/// Human-readable report of a finished simulation
pub struct Report<'a> {
    sim: &'a Simulator,
}

impl<'a> Report<'a> {
    pub fn new(sim: &'a Simulator) -> Self {
        Report { sim }
    }

    fn write_allocations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary Report Format Example:")?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<16}{:<26}{:<25}{}",
            "Process Id MG",
            "Starting Memory Address",
            "Size of the Process MB",
            "Unused Space MG"
        )?;
        for a in self.sim.allocations() {
            writeln!(
                f,
                "{:>7}        {:>7}                 {:>7}                 {:>5}",
                a.pid, a.start_address, a.process_size, a.unused_space
            )?;
        }
        Ok(())
    }

    fn write_constants(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.sim.config();
        writeln!(f)?;
        writeln!(f, "Method:  userMemoryAllocation")?;
        writeln!(f)?;
        writeln!(f, "Memory constants:")?;
        writeln!(
            f,
            " - Total memory: {} MB ({} pages x {} MB)",
            config.total_memory(),
            config.total_pages,
            config.page_size
        )?;
        writeln!(f, " - Page size: {} MB", config.page_size)?;
        writeln!(
            f,
            " - Process size unit: {} MB (random {}..{} units)",
            config.unit_size, config.min_units, config.max_units
        )?;
        writeln!(f, " - Starting address: {}", config.base_address)?;
        writeln!(f, " - Seed: {}", self.sim.seed())
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.sim.summary();
        writeln!(f)?;
        writeln!(f, "Totals:")?;
        writeln!(f, " - Processes: {}", summary.process_count)?;
        writeln!(
            f,
            " - Pages used: {} of {}",
            summary.pages_used,
            self.sim.page_table().len()
        )?;
        writeln!(f, " - Requested: {} MB", summary.total_requested)?;
        writeln!(f, " - Unused (internal fragmentation): {} MB", summary.total_unused)?;
        writeln!(
            f,
            " - Process size range: {}..{} MB",
            summary.smallest_process, summary.largest_process
        )
    }

    /// `index:owner` pairs joined by `" | "`, wrapped every `PAGE_TABLE_WRAP`
    /// entries. The separator only goes between entries on the same line, so
    /// lines never end with a dangling `" | "`.
    fn write_page_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.sim.page_table();
        writeln!(f)?;
        writeln!(f, "Memory Page Table (index:pid):")?;
        for index in 0..table.len() {
            if index % PAGE_TABLE_WRAP != 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}:{}", index, table.raw_owner(index))?;
            if (index + 1) % PAGE_TABLE_WRAP == 0 || index + 1 == table.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_allocations(f)?;
        self.write_constants(f)?;
        self.write_summary(f)?;
        self.write_page_table(f)
    }
}

/// Write the rendered report to a file
pub fn write_report<P: AsRef<Path>>(path: P, report: &Report<'_>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, report.to_string()).map_err(|source| SimError::Write {
        path: path.to_path_buf(),
        source,
    })
}
