//! One-shot snapshot and simulation, nothing is persisted.

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;

use crate::core::scheduling::simulate_all;
use crate::core::{AlgorithmResult, SnapshotCollector, SnapshotSource, SystemSnapshot};
use crate::ui::{print_results, print_system};

#[derive(Serialize)]
struct SimulationOutput<'a> {
    system: &'a SystemSnapshot,
    process_count: usize,
    results: &'a [AlgorithmResult],
}

/// Execute the simulate command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let json_output = matches.get_flag("json");

    let mut collector = SnapshotCollector::with_config(config.collector_config());
    let snapshot = collector.collect().context("Failed to collect snapshot")?;
    let results = simulate_all(&snapshot.processes, &config.simulation_params());

    if json_output {
        let output = SimulationOutput {
            system: &snapshot.system,
            process_count: snapshot.processes.len(),
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_system(&snapshot.system, snapshot.processes.len());
    print_results(&results);
    Ok(())
}
