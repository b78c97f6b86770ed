//! Monitor command handler.
//!
//! Runs the sampling loop on a background thread and persists every tick.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::sync::atomic::Ordering;

use crate::core::{MonitoringLoop, SnapshotCollector, SqliteSink};
use crate::ui::{dimmed, info, success, warn};

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let db_path = config.resolve_database_path()?;

    // Without a reachable database there is nothing to monitor into
    let mut sink = SqliteSink::open(&db_path)
        .with_context(|| format!("Database connection failed: {:?}", db_path))?;

    if matches.get_flag("fresh") {
        sink.reset().context("Failed to reset database tables")?;
        warn("Existing metrics were dropped");
    }

    let collector = SnapshotCollector::with_config(config.collector_config());
    let handle = MonitoringLoop::new(collector, sink, config.monitor_settings())
        .spawn()
        .context("Failed to start monitoring thread")?;

    let stop = handle.stop_flag();
    ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
        .context("Failed to install Ctrl-C handler")?;

    match config.iterations {
        Some(n) => info(&format!("Monitoring {} ticks into {}", n, db_path.display())),
        None => info(&format!("Monitoring into {} until stopped", db_path.display())),
    }
    dimmed("Press Ctrl-C to stop after the current tick");

    let summary = handle.wait()?;

    success(&format!(
        "Monitoring finished: {} ticks, {} failed",
        summary.ticks_run, summary.ticks_failed
    ));
    Ok(())
}
