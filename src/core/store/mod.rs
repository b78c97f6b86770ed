//! Persistence sink for tick batches and operational events.

mod sqlite;

pub use sqlite::SqliteSink;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::aggregator::TickBatch;
use super::scheduling::Algorithm;
use crate::error::{Result, SchedError};

/// Durable destination for everything the monitoring loop produces.
///
/// `write_batch` must be atomic: either every row of the batch is stored or
/// none is.
pub trait PersistenceSink: Send {
    fn write_batch(&mut self, batch: &TickBatch) -> Result<()>;

    fn log_event(&mut self, event: &SystemEvent) -> Result<()>;
}

/// Classification of an operational event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    DatabaseError,
    SystemError,
    SlowTick,
    MonitorStarted,
    MonitorStopped,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::DatabaseError => "Database Error",
            EventType::SystemError => "System Error",
            EventType::SlowTick => "Slow Tick",
            EventType::MonitorStarted => "Monitor Started",
            EventType::MonitorStopped => "Monitor Stopped",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventType {
    type Err = SchedError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Database Error" => Ok(EventType::DatabaseError),
            "System Error" => Ok(EventType::SystemError),
            "Slow Tick" => Ok(EventType::SlowTick),
            "Monitor Started" => Ok(EventType::MonitorStarted),
            "Monitor Stopped" => Ok(EventType::MonitorStopped),
            other => Err(SchedError::other(format!("Unknown event type: {}", other))),
        }
    }
}

/// Operational diagnostic entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemEvent {
    pub event_type: EventType,
    pub description: String,
    pub timestamp: i64, // Unix timestamp
}

impl SystemEvent {
    /// Create an event stamped with the current time
    pub fn now<S: Into<String>>(event_type: EventType, description: S) -> Self {
        Self {
            event_type,
            description: description.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Query over stored performance records. Bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub algorithm: Option<Algorithm>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub limit: Option<usize>,
}
