//! Builds persisted performance records from simulator output.

use serde::{Deserialize, Serialize};

use super::scheduling::{Algorithm, AlgorithmResult};
use super::snapshot::{Snapshot, SystemSnapshot};

/// Persisted per-algorithm outcome of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub timestamp: i64, // Unix timestamp
    pub cpu_utilization: f32,
    /// Number of sampled processes, not a completion rate
    pub throughput: u64,
    pub turnaround_time: f64,
    pub waiting_time: f64,
    /// Same as `waiting_time`
    pub response_time: f64,
    pub algorithm: Algorithm,
}

/// One tick's worth of writes, committed atomically by the sink
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickBatch {
    pub metric: SystemSnapshot,
    pub records: Vec<PerformanceRecord>,
}

/// Build one record per algorithm result against the same snapshot
pub fn aggregate(snapshot: &Snapshot, results: &[AlgorithmResult]) -> TickBatch {
    let throughput = snapshot.processes.len() as u64;

    let records = results
        .iter()
        .map(|result| PerformanceRecord {
            timestamp: snapshot.system.timestamp,
            cpu_utilization: snapshot.system.cpu_percent,
            throughput,
            turnaround_time: result.avg_turnaround_time,
            waiting_time: result.avg_wait_time,
            response_time: result.avg_wait_time,
            algorithm: result.algorithm,
        })
        .collect();

    TickBatch {
        metric: snapshot.system.clone(),
        records,
    }
}
