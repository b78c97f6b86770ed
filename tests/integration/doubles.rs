// Test doubles for the snapshot source and persistence sink

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use schedmon::core::{
    PersistenceSink, ProcessSample, Snapshot, SnapshotSource, SystemEvent, SystemSnapshot,
    TickBatch,
};
use schedmon::{Result, SchedError};

pub fn processes() -> Vec<ProcessSample> {
    vec![
        ProcessSample {
            pid: 1,
            arrival_time: 0,
            burst_time: 5.0,
            turnaround_time: 5.0,
            ..Default::default()
        },
        ProcessSample {
            pid: 2,
            arrival_time: 1,
            burst_time: 2.0,
            turnaround_time: 3.0,
            ..Default::default()
        },
        ProcessSample {
            pid: 3,
            arrival_time: 2,
            burst_time: 8.0,
            turnaround_time: 10.0,
            ..Default::default()
        },
    ]
}

/// Returns the same snapshot every tick, failing on chosen tick indices
pub struct FakeSource {
    pub calls: usize,
    pub fail_on: HashSet<usize>,
    pub timestamp: i64,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            calls: 0,
            fail_on: HashSet::new(),
            timestamp: 1_700_000_000,
        }
    }

    pub fn failing_on(ticks: &[usize]) -> Self {
        Self {
            fail_on: ticks.iter().copied().collect(),
            ..Self::new()
        }
    }
}

impl SnapshotSource for FakeSource {
    fn collect(&mut self) -> Result<Snapshot> {
        let call = self.calls;
        self.calls += 1;

        if self.fail_on.contains(&call) {
            return Err(SchedError::collection("process table unavailable"));
        }

        Ok(Snapshot {
            system: SystemSnapshot {
                timestamp: self.timestamp + call as i64,
                cpu_percent: 25.0,
                cpu_count: 4,
                ..Default::default()
            },
            processes: processes(),
        })
    }
}

/// Records what it receives; shared state survives the loop moving threads
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub batches: Arc<Mutex<Vec<TickBatch>>>,
    pub events: Arc<Mutex<Vec<SystemEvent>>>,
    pub fail_batches_on: HashSet<usize>,
    pub fail_events: bool,
    pub batch_calls: Arc<Mutex<usize>>,
}

impl RecordingSink {
    pub fn failing_batches_on(calls: &[usize]) -> Self {
        Self {
            fail_batches_on: calls.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn event_labels(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.label().to_string())
            .collect()
    }
}

impl PersistenceSink for RecordingSink {
    fn write_batch(&mut self, batch: &TickBatch) -> Result<()> {
        let mut calls = self.batch_calls.lock().unwrap();
        let call = *calls;
        *calls += 1;

        if self.fail_batches_on.contains(&call) {
            return Err(SchedError::Database(rusqlite::Error::QueryReturnedNoRows));
        }
        self.batches.lock().unwrap().push(batch.clone());
        Ok(())
    }

    fn log_event(&mut self, event: &SystemEvent) -> Result<()> {
        if self.fail_events {
            return Err(SchedError::Database(rusqlite::Error::InvalidQuery));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
