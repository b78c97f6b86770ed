use std::path::Path;
use std::time::Duration;

use sysinfo::{
    Disks, Networks, Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System,
};

use crate::error::{ProcessReadError, Result};
use crate::platform::process_nice;

use super::model::*;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Anything that can produce a snapshot for one tick.
pub trait SnapshotSource: Send {
    fn collect(&mut self) -> Result<Snapshot>;
}

/// Configuration for snapshot collection
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Blocking window used to measure CPU utilization
    pub cpu_sample_interval: Duration,
    /// Mount point whose usage is reported as `disk_used_percent`
    pub disk_mount_point: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            cpu_sample_interval: Duration::from_secs(1),
            disk_mount_point: "/".to_string(),
        }
    }
}

/// Collects host counters and the live process table through sysinfo
pub struct SnapshotCollector {
    system: System,
    disks: Disks,
    networks: Networks,
    config: CollectorConfig,
}

impl SnapshotCollector {
    /// Create a new SnapshotCollector with default configuration
    pub fn new() -> Self {
        Self::with_config(CollectorConfig::default())
    }

    /// Create a new SnapshotCollector with custom configuration
    pub fn with_config(config: CollectorConfig) -> Self {
        Self {
            system: System::new(),
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            config,
        }
    }

    fn collect_system(&mut self) -> SystemSnapshot {
        // The only intentional blocking point of a tick
        self.system.refresh_cpu_usage();
        std::thread::sleep(
            self.config
                .cpu_sample_interval
                .max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        );
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();
        self.disks.refresh(true);
        self.networks.refresh(true);

        let (bytes_received, bytes_sent) = self
            .networks
            .values()
            .fold((0u64, 0u64), |(rx, tx), data| {
                (
                    rx.saturating_add(data.total_received()),
                    tx.saturating_add(data.total_transmitted()),
                )
            });

        SystemSnapshot {
            timestamp: chrono::Utc::now().timestamp(),
            cpu_percent: self.system.global_cpu_usage(),
            cpu_count: System::physical_core_count().unwrap_or(1).max(1),
            memory_free_mb: self.system.available_memory() as f64 / BYTES_PER_MB,
            memory_used_mb: self.system.used_memory() as f64 / BYTES_PER_MB,
            disk_used_percent: self.disk_used_percent(),
            bytes_received,
            bytes_sent,
        }
    }

    fn disk_used_percent(&self) -> f32 {
        let target = Path::new(&self.config.disk_mount_point);
        let disk = self
            .disks
            .iter()
            .find(|disk| disk.mount_point() == target)
            .or_else(|| self.disks.iter().next());

        match disk {
            Some(disk) => {
                let total = disk.total_space();
                let used = total.saturating_sub(disk.available_space());
                if total > 0 {
                    (used as f32 / total as f32) * 100.0
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }

    fn collect_processes(&mut self) -> Vec<ProcessSample> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        let now = chrono::Utc::now().timestamp();
        let reads = self.system.processes().values().map(read_process);
        collect_samples(reads, now)
    }
}

impl Default for SnapshotCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for SnapshotCollector {
    fn collect(&mut self) -> Result<Snapshot> {
        let system = self.collect_system();
        let processes = self.collect_processes();
        log::debug!("Collected {} process samples", processes.len());
        Ok(Snapshot { system, processes })
    }
}

/// Raw per-process reading before normalization
#[derive(Debug, Clone, Default)]
pub struct RawProcess {
    pub pid: u32,
    pub name: String,
    pub start_time: i64,
    pub cpu_time_secs: f64,
    pub memory_bytes: u64,
    pub nice: i32,
}

fn read_process(proc: &Process) -> std::result::Result<RawProcess, ProcessReadError> {
    if proc.status() == ProcessStatus::Zombie {
        return Err(ProcessReadError::Zombie);
    }

    let pid = proc.pid().as_u32();
    let nice = process_nice(pid)?;

    Ok(RawProcess {
        pid,
        name: proc.name().to_string_lossy().to_string(),
        start_time: proc.start_time() as i64,
        cpu_time_secs: proc.accumulated_cpu_time() as f64 / 1000.0,
        memory_bytes: proc.memory(),
        nice,
    })
}

/// Normalize one raw reading into a sample with baseline timing fields
pub fn sample_from_raw(raw: RawProcess, now: i64) -> ProcessSample {
    let wait_time = now.saturating_sub(raw.start_time).max(0) as f64;
    let burst_time = raw.cpu_time_secs.max(0.0);

    ProcessSample {
        pid: raw.pid,
        arrival_time: raw.start_time,
        burst_time,
        memory_usage: raw.memory_bytes as f64 / BYTES_PER_MB,
        priority: raw.nice,
        wait_time,
        turnaround_time: wait_time + burst_time,
        name: raw.name,
    }
}

/// Turn per-process reads into samples, skipping processes that failed to read
pub fn collect_samples<I>(reads: I, now: i64) -> Vec<ProcessSample>
where
    I: IntoIterator<Item = std::result::Result<RawProcess, ProcessReadError>>,
{
    reads
        .into_iter()
        .filter_map(|read| match read {
            Ok(raw) => Some(sample_from_raw(raw, now)),
            Err(e) => {
                log::trace!("Skipping process: {}", e);
                None
            }
        })
        .collect()
}
