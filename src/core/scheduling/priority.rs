use super::fcfs::run_in_order;
use super::{Algorithm, Schedule};
use crate::core::snapshot::ProcessSample;

/// Non-preemptive Priority scheduling. Lower nice values are served first.
pub fn priority(processes: &[ProcessSample]) -> Schedule {
    let mut ordered: Vec<&ProcessSample> = processes.iter().collect();
    ordered.sort_by_key(|p| p.priority);
    run_in_order(Algorithm::Priority, &ordered)
}
