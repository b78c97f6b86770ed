//! Terminal tables for simulation results, reports and events.

use colored::Colorize;

use super::formatters::{format_mb, format_seconds, format_timestamp};
use crate::core::{AlgorithmResult, AlgorithmSummary, EventType, SystemEvent, SystemSnapshot};

/// Print the host reading of one snapshot
pub fn print_system(system: &SystemSnapshot, process_count: usize) {
    println!("{}", "System".white().bold());
    println!(
        "  CPU        {:>6.1}%  ({} physical cores)",
        system.cpu_percent, system.cpu_count
    );
    println!(
        "  Memory     {} used, {} free",
        format_mb(system.memory_used_mb),
        format_mb(system.memory_free_mb)
    );
    println!("  Disk       {:>6.1}% used", system.disk_used_percent);
    println!(
        "  Network    {} B received, {} B sent",
        system.bytes_received, system.bytes_sent
    );
    println!("  Processes  {}", process_count);
    println!();
}

/// Print one row per algorithm, marking the lowest average wait
pub fn print_results(results: &[AlgorithmResult]) {
    let best = results
        .iter()
        .map(|r| r.avg_wait_time)
        .fold(f64::INFINITY, f64::min);

    println!(
        "{}",
        format!("{:<10} {:>14} {:>18}", "Algorithm", "Avg wait", "Avg turnaround")
            .white()
            .bold()
    );
    for result in results {
        let line = format!(
            "{:<10} {:>14} {:>18}",
            result.algorithm.name(),
            format_seconds(result.avg_wait_time),
            format_seconds(result.avg_turnaround_time)
        );
        if result.avg_wait_time == best {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

/// Print per-algorithm averages of stored records
pub fn print_summaries(summaries: &[AlgorithmSummary]) {
    println!(
        "{}",
        format!(
            "{:<10} {:>8} {:>12} {:>16} {:>8} {:>11}  {:<19}",
            "Algorithm", "Samples", "Avg wait", "Avg turnaround", "CPU %", "Processes", "Last sample"
        )
        .white()
        .bold()
    );
    for summary in summaries {
        println!(
            "{} {:>8} {:>12} {:>16} {:>8.1} {:>11.0}  {:<19}",
            format!("{:<10}", summary.algorithm.name()).cyan(),
            summary.samples,
            format_seconds(summary.avg_wait_time),
            format_seconds(summary.avg_turnaround_time),
            summary.avg_cpu_utilization,
            summary.avg_throughput,
            format_timestamp(summary.last_timestamp)
        );
    }
}

/// Print system events, errors highlighted
pub fn print_events(events: &[SystemEvent]) {
    for event in events {
        let label = format!("{:<16}", event.event_type.label());
        let label = match event.event_type {
            EventType::DatabaseError | EventType::SystemError => label.red().bold(),
            EventType::SlowTick => label.yellow(),
            EventType::MonitorStarted | EventType::MonitorStopped => label.dimmed(),
        };
        println!(
            "{}  {} {}",
            format_timestamp(event.timestamp).dimmed(),
            label,
            event.description
        );
    }
}
