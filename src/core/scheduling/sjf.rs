use super::fcfs::run_in_order;
use super::{Algorithm, Schedule};
use crate::core::snapshot::ProcessSample;

/// Non-preemptive Shortest-Job-First. Equal bursts keep their input order.
pub fn sjf(processes: &[ProcessSample]) -> Schedule {
    let mut ordered: Vec<&ProcessSample> = processes.iter().collect();
    ordered.sort_by(|a, b| a.burst_time.total_cmp(&b.burst_time));
    run_in_order(Algorithm::Sjf, &ordered)
}
