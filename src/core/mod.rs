// Core business logic module

pub mod aggregator;
pub mod config;
pub mod monitor;
pub mod report;
pub mod scheduling;
pub mod snapshot;
pub mod store;

// Re-export commonly used items
pub use aggregator::{aggregate, PerformanceRecord, TickBatch};
pub use config::Config;
pub use monitor::{
    DelayPlacement, MonitorHandle, MonitorSettings, MonitorState, MonitorSummary, MonitoringLoop,
};
pub use report::{summarize, AlgorithmSummary};
pub use scheduling::{Algorithm, AlgorithmResult, RrTurnaround, SimulationParams};
pub use snapshot::{ProcessSample, Snapshot, SnapshotCollector, SnapshotSource, SystemSnapshot};
pub use store::{EventType, PersistenceSink, RecordFilter, SqliteSink, SystemEvent};
