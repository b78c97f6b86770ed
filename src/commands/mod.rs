// Command handlers module
pub mod config;
pub mod monitor;
pub mod report;
pub mod simulate;
pub mod version;

// Re-exports for cleaner imports
pub use monitor::execute as monitor;
pub use report::execute as report;
pub use simulate::execute as simulate;
pub use version::execute as version;

use anyhow::Result;
use clap::ArgMatches;
use std::path::PathBuf;

use crate::core::{Config, DelayPlacement};

/// Load the persisted config and apply any flags given on the command line.
///
/// Flags that a subcommand does not define are ignored.
pub(crate) fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::load()?;

    if let Ok(Some(path)) = matches.try_get_one::<PathBuf>("db") {
        config.database_path = Some(path.clone());
    }
    if let Ok(Some(quantum)) = matches.try_get_one::<f64>("quantum") {
        config.quantum = *quantum;
    }
    if let Ok(Some(iterations)) = matches.try_get_one::<u64>("iterations") {
        config.iterations = Some(*iterations);
    }
    if matches!(matches.try_get_one::<bool>("unbounded"), Ok(Some(true))) {
        config.iterations = None;
    }
    if let Ok(Some(interval)) = matches.try_get_one::<u64>("interval-ms") {
        config.tick_delay_ms = *interval;
    }
    if matches!(matches.try_get_one::<bool>("delay-after-batch"), Ok(Some(true))) {
        config.delay_placement = DelayPlacement::AfterBatch;
    }

    config.validate()?;
    Ok(config)
}
