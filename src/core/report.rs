//! Summaries over stored performance records.

use serde::Serialize;

use super::aggregator::PerformanceRecord;
use super::scheduling::Algorithm;

/// Averages of one algorithm's records over a query window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub algorithm: Algorithm,
    pub samples: usize,
    pub avg_wait_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_cpu_utilization: f64,
    pub avg_throughput: f64,
    pub first_timestamp: i64,
    pub last_timestamp: i64,
}

/// Summarize records per algorithm, in emission order.
///
/// Algorithms without records are left out.
pub fn summarize(records: &[PerformanceRecord]) -> Vec<AlgorithmSummary> {
    Algorithm::ALL
        .iter()
        .filter_map(|&algorithm| {
            let matching: Vec<&PerformanceRecord> =
                records.iter().filter(|r| r.algorithm == algorithm).collect();
            if matching.is_empty() {
                return None;
            }

            let n = matching.len() as f64;
            let avg = |f: fn(&PerformanceRecord) -> f64| {
                matching.iter().map(|&r| f(r)).sum::<f64>() / n
            };

            Some(AlgorithmSummary {
                algorithm,
                samples: matching.len(),
                avg_wait_time: avg(|r| r.waiting_time),
                avg_turnaround_time: avg(|r| r.turnaround_time),
                avg_cpu_utilization: avg(|r| r.cpu_utilization as f64),
                avg_throughput: avg(|r| r.throughput as f64),
                first_timestamp: matching.iter().map(|r| r.timestamp).min().unwrap_or_default(),
                last_timestamp: matching.iter().map(|r| r.timestamp).max().unwrap_or_default(),
            })
        })
        .collect()
}
