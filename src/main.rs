//! Paging Simulator - Main Entry Point
//!
//! Usage: paging-simulator [OPTIONS] [SEED]
//!
//! Fills a 100-page memory pool with randomly sized processes using first-fit
//! contiguous placement, then prints the allocation table and page map.
//! Runs are reproducible when a seed is given; otherwise the current time is used.

use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use paging_simulator::constants::*;
use paging_simulator::io::write_report;
use paging_simulator::{Report, SimConfig, SimError, Simulator};

#[derive(Parser)]
#[command(name = "paging-simulator")]
#[command(about = "First-fit fixed-size page allocation simulator")]
#[command(version)]
struct Cli {
    /// Random seed; non-numeric values fall back to a time-based seed
    #[arg(allow_hyphen_values = true)]
    seed: Option<String>,

    /// Also write the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't print the report to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Log each placement to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Number of pages in the pool (at most 1000000)
    #[arg(long, default_value_t = TOTAL_PAGES)]
    pages: usize,

    /// Page size in MB
    #[arg(long, default_value_t = PAGE_SIZE_MB)]
    page_size: u32,

    /// Size of one process unit in MB
    #[arg(long, default_value_t = PROCESS_SIZE_UNIT_MB)]
    unit_size: u32,

    /// Smallest process, in units
    #[arg(long, default_value_t = MIN_UNITS)]
    min_units: u32,

    /// Largest process, in units
    #[arg(long, default_value_t = MAX_UNITS)]
    max_units: u32,

    /// Address reported for the first page
    #[arg(long, default_value_t = START_ADDRESS)]
    base_address: u32,
}

impl Cli {
    fn sim_config(&self) -> SimConfig {
        SimConfig {
            total_pages: self.pages,
            page_size: self.page_size,
            unit_size: self.unit_size,
            min_units: self.min_units,
            max_units: self.max_units,
            base_address: self.base_address,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse the seed argument, falling back to the current time when it is
/// missing or not an integer. Negative seeds keep their two's-complement bits.
fn resolve_seed(arg: Option<&str>) -> u64 {
    let Some(arg) = arg else {
        return time_seed();
    };
    let text = arg.trim();
    match text.parse::<i64>() {
        Ok(seed) => seed as u64,
        Err(_) => text.parse::<u64>().unwrap_or_else(|_| {
            debug!(arg, "ignoring unparsable seed");
            time_seed()
        }),
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let seed = resolve_seed(cli.seed.as_deref());
    let mut sim = Simulator::new(cli.sim_config(), seed)?;
    debug!(seed, "starting allocation");
    sim.run();

    let report = Report::new(&sim);
    if !cli.quiet {
        print!("{}", report);
    }
    if let Some(path) = &cli.output {
        write_report(path, &report)?;
        debug!(path = %path.display(), "report written");
    }

    Ok(())
}
