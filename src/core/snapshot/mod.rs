//! Snapshot collection.
//!
//! Turns host counters and the live process table into the normalized model
//! consumed by the scheduling simulators.

mod collector;
mod model;

pub use collector::{
    collect_samples, sample_from_raw, CollectorConfig, RawProcess, SnapshotCollector,
    SnapshotSource,
};
pub use model::{ProcessSample, Snapshot, SystemSnapshot};
