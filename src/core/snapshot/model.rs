use serde::{Deserialize, Serialize};

/// One OS process at sample time.
///
/// `wait_time` and `turnaround_time` are the collector's baseline reading
/// (elapsed wall-clock time since creation). Simulators compute their own
/// timing and only read the remaining fields as inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessSample {
    pub pid: u32,
    pub arrival_time: i64, // Unix timestamp of process creation
    pub burst_time: f64,   // CPU seconds consumed (user + system)
    pub memory_usage: f64, // Resident memory in MB
    pub priority: i32,     // Nice value, lower runs first
    pub wait_time: f64,
    pub turnaround_time: f64,
    pub name: String,
}

/// Point-in-time host resource reading, persisted as a system metric row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub timestamp: i64, // Unix timestamp
    pub cpu_percent: f32,
    pub cpu_count: usize,
    pub memory_free_mb: f64,
    pub memory_used_mb: f64,
    pub disk_used_percent: f32,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

/// Everything one collection pass produced.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub system: SystemSnapshot,
    pub processes: Vec<ProcessSample>,
}
