use super::{Algorithm, RrTurnaround, Schedule, ScheduleEntry};
use crate::core::snapshot::ProcessSample;

/// Round Robin with a fixed quantum, scanning processes in input order.
///
/// A process's wait is its completion clock minus its own burst. Processes
/// with no burst are never scheduled and keep a wait of zero. Entries are
/// returned in input order.
pub fn round_robin(
    processes: &[ProcessSample],
    quantum: f64,
    turnaround: RrTurnaround,
) -> Schedule {
    let mut remaining: Vec<f64> = processes.iter().map(|p| p.burst_time).collect();
    let mut finished: Vec<bool> = remaining.iter().map(|&r| r <= 0.0).collect();
    let mut wait_times = vec![0.0; processes.len()];
    let mut clock = 0.0;

    while finished.iter().any(|done| !done) {
        // Skip rounds in which every live process takes a full slice and none
        // finishes. One spare round absorbs rounding in the subtraction.
        let active: Vec<usize> = (0..processes.len()).filter(|&i| !finished[i]).collect();
        let full_rounds = active
            .iter()
            .map(|&i| ((remaining[i] / quantum).ceil() - 2.0).max(0.0))
            .fold(f64::INFINITY, f64::min);
        if full_rounds >= 1.0 {
            clock += full_rounds * quantum * active.len() as f64;
            for &i in &active {
                remaining[i] -= full_rounds * quantum;
            }
        }

        for i in active {
            let left = remaining[i] - quantum;
            if remaining[i] > quantum && left < remaining[i] {
                clock += quantum;
                remaining[i] = left;
            } else {
                clock += remaining[i].max(0.0);
                remaining[i] = 0.0;
                finished[i] = true;
                wait_times[i] = clock - processes[i].burst_time;
            }
        }
    }

    let entries = processes
        .iter()
        .zip(wait_times)
        .map(|(p, wait_time)| ScheduleEntry {
            pid: p.pid,
            wait_time,
            turnaround_time: match turnaround {
                RrTurnaround::CollectorSeeded => p.turnaround_time,
                RrTurnaround::Simulated => wait_time + p.burst_time,
            },
        })
        .collect();

    Schedule {
        algorithm: Algorithm::RoundRobin,
        entries,
    }
}
