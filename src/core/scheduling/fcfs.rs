use super::{Algorithm, Schedule, ScheduleEntry};
use crate::core::snapshot::ProcessSample;

/// First-Come-First-Served: serve in order of arrival
pub fn fcfs(processes: &[ProcessSample]) -> Schedule {
    let mut ordered: Vec<&ProcessSample> = processes.iter().collect();
    ordered.sort_by_key(|p| p.arrival_time);
    run_in_order(Algorithm::Fcfs, &ordered)
}

/// Non-preemptive kernel shared by FCFS, SJF and Priority.
///
/// Each process waits for the sum of the bursts served before it.
pub(super) fn run_in_order(algorithm: Algorithm, ordered: &[&ProcessSample]) -> Schedule {
    let mut elapsed = 0.0;
    let entries = ordered
        .iter()
        .map(|p| {
            let wait_time = elapsed;
            elapsed += p.burst_time;
            ScheduleEntry {
                pid: p.pid,
                wait_time,
                turnaround_time: wait_time + p.burst_time,
            }
        })
        .collect();

    Schedule { algorithm, entries }
}
