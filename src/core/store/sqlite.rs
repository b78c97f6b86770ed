use std::fs;
use std::path::Path;

use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};

use super::{EventType, PersistenceSink, RecordFilter, SystemEvent};
use crate::core::aggregator::{PerformanceRecord, TickBatch};
use crate::core::scheduling::Algorithm;
use crate::error::Result;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS system_metrics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp INTEGER NOT NULL,
        cpu_percent REAL,
        cpu_count INTEGER,
        memory_free REAL,
        memory_used REAL,
        disk_used REAL,
        bytes_received INTEGER,
        bytes_sent INTEGER
    );
    CREATE TABLE IF NOT EXISTS performance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp INTEGER NOT NULL,
        cpu_utilization REAL,
        throughput INTEGER,
        turnaround_time REAL,
        waiting_time REAL,
        response_time REAL,
        algorithm TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_performance_algorithm_time
        ON performance (algorithm, timestamp);
    CREATE TABLE IF NOT EXISTS system_events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_time INTEGER NOT NULL,
        event_type TEXT NOT NULL,
        event_description TEXT
    );
";

/// SQLite-backed persistence sink.
///
/// Holds a single connection owned by whichever thread runs the monitoring
/// loop; there is no locking.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        log::info!("Database connection established: {}", path.display());

        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Drop all tables and recreate an empty schema
    pub fn reset(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "DROP TABLE IF EXISTS system_metrics;
             DROP TABLE IF EXISTS performance;
             DROP TABLE IF EXISTS system_events;",
        )?;
        self.conn.execute_batch(SCHEMA)?;
        log::info!("Tables 'system_metrics', 'performance', and 'system_events' are ready");
        Ok(())
    }

    /// Performance records matching `filter`, oldest first
    pub fn performance_records(&self, filter: &RecordFilter) -> Result<Vec<PerformanceRecord>> {
        let mut sql = String::from(
            "SELECT timestamp, cpu_utilization, throughput, turnaround_time, waiting_time, \
             response_time, algorithm FROM performance WHERE 1 = 1",
        );
        let mut values: Vec<Value> = Vec::new();

        if let Some(algorithm) = filter.algorithm {
            sql.push_str(" AND algorithm = ?");
            values.push(Value::Text(algorithm.name().to_string()));
        }
        if let Some(from) = filter.from {
            sql.push_str(" AND timestamp >= ?");
            values.push(Value::Integer(from));
        }
        if let Some(to) = filter.to {
            sql.push_str(" AND timestamp <= ?");
            values.push(Value::Integer(to));
        }
        sql.push_str(" ORDER BY timestamp, id");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            values.push(Value::Integer(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(values.iter()), record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Most recent system events, newest first
    pub fn recent_events(&self, limit: usize) -> Result<Vec<SystemEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_time, event_type, event_description FROM system_events \
             ORDER BY id DESC LIMIT ?1",
        )?;

        let events = stmt
            .query_map(params![limit as i64], |row| {
                let label: String = row.get(1)?;
                let event_type = label
                    .parse::<EventType>()
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

                Ok(SystemEvent {
                    event_type,
                    description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    timestamp: row.get(0)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PerformanceRecord> {
    let name: String = row.get(6)?;
    let algorithm = name
        .parse::<Algorithm>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(PerformanceRecord {
        timestamp: row.get(0)?,
        cpu_utilization: row.get::<_, f64>(1)? as f32,
        throughput: row.get::<_, i64>(2)?.max(0) as u64,
        turnaround_time: row.get(3)?,
        waiting_time: row.get(4)?,
        response_time: row.get(5)?,
        algorithm,
    })
}

impl PersistenceSink for SqliteSink {
    fn write_batch(&mut self, batch: &TickBatch) -> Result<()> {
        // Dropping an uncommitted transaction rolls it back
        let tx = self.conn.transaction()?;

        let metric = &batch.metric;
        tx.execute(
            "INSERT INTO system_metrics (timestamp, cpu_percent, cpu_count, memory_free, \
             memory_used, disk_used, bytes_received, bytes_sent) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                metric.timestamp,
                metric.cpu_percent as f64,
                metric.cpu_count as i64,
                metric.memory_free_mb,
                metric.memory_used_mb,
                metric.disk_used_percent as f64,
                metric.bytes_received as i64,
                metric.bytes_sent as i64,
            ],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO performance (timestamp, cpu_utilization, throughput, \
                 turnaround_time, waiting_time, response_time, algorithm) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for record in &batch.records {
                stmt.execute(params![
                    record.timestamp,
                    record.cpu_utilization as f64,
                    record.throughput as i64,
                    record.turnaround_time,
                    record.waiting_time,
                    record.response_time,
                    record.algorithm.name(),
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn log_event(&mut self, event: &SystemEvent) -> Result<()> {
        self.conn.execute(
            "INSERT INTO system_events (event_time, event_type, event_description) \
             VALUES (?1, ?2, ?3)",
            params![event.timestamp, event.event_type.label(), event.description],
        )?;
        Ok(())
    }
}
