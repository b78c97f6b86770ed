//! Scheduling simulators.
//!
//! Each simulator is a pure function over the same process snapshot. None of
//! them mutates its input; the four algorithms can run back to back against
//! one collection without interfering.

mod fcfs;
mod priority;
mod round_robin;
mod sjf;

pub use fcfs::fcfs;
pub use priority::priority;
pub use round_robin::round_robin;
pub use sjf::sjf;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::snapshot::ProcessSample;
use crate::error::SchedError;

/// Default Round Robin time slice, in seconds of CPU time
pub const DEFAULT_QUANTUM: f64 = 2.0;

/// Smallest accepted Round Robin time slice
pub const MIN_QUANTUM: f64 = 0.001;

/// The four simulated disciplines, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF")]
    Sjf,
    #[serde(rename = "RR")]
    RoundRobin,
    #[serde(rename = "Priority")]
    Priority,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
    ];

    /// Name stored alongside persisted records
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::RoundRobin => "RR",
            Algorithm::Priority => "Priority",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "rr" | "round-robin" | "roundrobin" => Ok(Algorithm::RoundRobin),
            "priority" => Ok(Algorithm::Priority),
            other => Err(SchedError::other(format!("Unknown algorithm: {}", other))),
        }
    }
}

/// How Round Robin reports turnaround time.
///
/// `CollectorSeeded` averages the turnaround values seeded by the collector
/// instead of deriving them from the simulated clock. Downstream consumers of
/// stored records rely on this, so it stays the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RrTurnaround {
    #[default]
    CollectorSeeded,
    Simulated,
}

/// Tunables shared by all simulators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub quantum: f64,
    pub rr_turnaround: RrTurnaround,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            rr_turnaround: RrTurnaround::default(),
        }
    }
}

/// Aggregate outcome of one algorithm on one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub algorithm: Algorithm,
    pub avg_wait_time: f64,
    pub avg_turnaround_time: f64,
}

/// Per-process timing under one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub pid: u32,
    pub wait_time: f64,
    pub turnaround_time: f64,
}

/// Full simulated schedule, entries in service order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub algorithm: Algorithm,
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Average wait and turnaround over all entries.
    ///
    /// An empty schedule summarizes to zero for every algorithm.
    pub fn summary(&self) -> AlgorithmResult {
        AlgorithmResult {
            algorithm: self.algorithm,
            avg_wait_time: mean(self.entries.iter().map(|e| e.wait_time)),
            avg_turnaround_time: mean(self.entries.iter().map(|e| e.turnaround_time)),
        }
    }
}

/// Build the full schedule of one algorithm
pub fn schedule(
    algorithm: Algorithm,
    processes: &[ProcessSample],
    params: &SimulationParams,
) -> Schedule {
    match algorithm {
        Algorithm::Fcfs => fcfs(processes),
        Algorithm::Sjf => sjf(processes),
        Algorithm::RoundRobin => round_robin(processes, params.quantum, params.rr_turnaround),
        Algorithm::Priority => priority(processes),
    }
}

/// Run one algorithm and return its averages
pub fn simulate(
    algorithm: Algorithm,
    processes: &[ProcessSample],
    params: &SimulationParams,
) -> AlgorithmResult {
    schedule(algorithm, processes, params).summary()
}

/// Run all four algorithms in emission order against the same input
pub fn simulate_all(processes: &[ProcessSample], params: &SimulationParams) -> Vec<AlgorithmResult> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| simulate(algorithm, processes, params))
        .collect()
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
pub(crate) fn sample(pid: u32, arrival_time: i64, burst_time: f64, priority: i32) -> ProcessSample {
    ProcessSample {
        pid,
        arrival_time,
        burst_time,
        priority,
        name: format!("p{}", pid),
        ..Default::default()
    }
}
