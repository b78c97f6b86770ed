//! Monitoring loop: collect, simulate and persist on a fixed cadence.
//!
//! Every tick is isolated. A failing tick is logged as a system event and the
//! loop moves on; only exhausting the configured tick count or raising the
//! stop flag ends a run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::aggregator::aggregate;
use super::scheduling::{simulate_all, SimulationParams};
use super::snapshot::SnapshotSource;
use super::store::{EventType, PersistenceSink, SystemEvent};
use crate::error::{Result, SchedError};

/// Longest uninterrupted sleep while pacing, so a stop request is seen quickly
const PAUSE_SLICE: Duration = Duration::from_millis(100);

/// Where the inter-tick delay is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayPlacement {
    /// Sleep between consecutive ticks
    #[default]
    BetweenTicks,
    /// Sleep once after the whole bounded run
    AfterBatch,
}

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub iterations: Option<u64>,
    pub tick_delay: Duration,
    pub delay_placement: DelayPlacement,
    pub tick_budget: Option<Duration>,
    pub params: SimulationParams,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            iterations: Some(100),
            tick_delay: Duration::from_secs(1),
            delay_placement: DelayPlacement::default(),
            tick_budget: None,
            params: SimulationParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Stopped,
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub ticks_run: u64,
    pub ticks_failed: u64,
}

pub struct MonitoringLoop<C, S> {
    source: C,
    sink: S,
    settings: MonitorSettings,
}

impl<C: SnapshotSource, S: PersistenceSink> MonitoringLoop<C, S> {
    pub fn new(source: C, sink: S, settings: MonitorSettings) -> Self {
        Self {
            source,
            sink,
            settings,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// One collect, simulate, persist pass
    pub fn run_tick(&mut self) -> Result<()> {
        let snapshot = self.source.collect()?;
        let results = simulate_all(&snapshot.processes, &self.settings.params);
        let batch = aggregate(&snapshot, &results);

        self.sink.write_batch(&batch)?;
        log::info!(
            "Performance metrics inserted for all algorithms ({} processes)",
            snapshot.processes.len()
        );
        Ok(())
    }

    /// Run ticks until the configured count is exhausted or `stop` is raised
    pub fn run(&mut self, stop: &AtomicBool) -> MonitorSummary {
        let mut summary = MonitorSummary::default();
        self.record_event(SystemEvent::now(
            EventType::MonitorStarted,
            match self.settings.iterations {
                Some(n) => format!("Monitoring started for {} ticks", n),
                None => "Monitoring started until stopped".to_string(),
            },
        ));

        while !stop.load(Ordering::Relaxed) && self.has_ticks_left(summary.ticks_run) {
            let started = Instant::now();

            if let Err(e) = self.run_tick() {
                summary.ticks_failed += 1;
                self.report_failure(&e);
            }
            summary.ticks_run += 1;
            self.check_budget(started.elapsed());

            if self.settings.delay_placement == DelayPlacement::BetweenTicks
                && self.has_ticks_left(summary.ticks_run)
            {
                pause(self.settings.tick_delay, stop);
            }
        }

        if self.settings.delay_placement == DelayPlacement::AfterBatch {
            pause(self.settings.tick_delay, stop);
        }

        self.record_event(SystemEvent::now(
            EventType::MonitorStopped,
            format!(
                "Monitoring stopped after {} ticks ({} failed)",
                summary.ticks_run, summary.ticks_failed
            ),
        ));
        summary
    }

    fn has_ticks_left(&self, ticks_run: u64) -> bool {
        self.settings.iterations.map_or(true, |n| ticks_run < n)
    }

    fn report_failure(&mut self, err: &SchedError) {
        // Any partial writes were rolled back by the sink's transaction
        let (event_type, message) = if err.is_persistence() {
            (
                EventType::DatabaseError,
                format!("Error while inserting metrics into database: {}", err),
            )
        } else {
            (EventType::SystemError, format!("Unexpected error: {}", err))
        };

        log::error!("{}", message);
        self.record_event(SystemEvent::now(event_type, message));
    }

    fn check_budget(&mut self, elapsed: Duration) {
        let Some(budget) = self.settings.tick_budget else {
            return;
        };
        if elapsed > budget {
            let message = format!(
                "Tick took {} ms (budget {} ms)",
                elapsed.as_millis(),
                budget.as_millis()
            );
            log::warn!("{}", message);
            self.record_event(SystemEvent::now(EventType::SlowTick, message));
        }
    }

    /// Event log writes never fail the loop
    fn record_event(&mut self, event: SystemEvent) {
        match self.sink.log_event(&event) {
            Ok(()) => log::info!(
                "Logged system event: {} - {}",
                event.event_type,
                event.description
            ),
            Err(e) => log::error!("Failed to log system event: {}", e),
        }
    }
}

impl<C, S> MonitoringLoop<C, S>
where
    C: SnapshotSource + 'static,
    S: PersistenceSink + 'static,
{
    /// Start the loop on a dedicated background thread
    pub fn spawn(mut self) -> Result<MonitorHandle<C, S>> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_for_thread = Arc::clone(&stop);

        let thread = thread::Builder::new()
            .name("schedmon-monitor".to_string())
            .spawn(move || {
                let summary = self.run(&stop_for_thread);
                (summary, self)
            })?;

        Ok(MonitorHandle { stop, thread })
    }
}

/// Lifecycle handle for a loop running in the background
pub struct MonitorHandle<C, S> {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<(MonitorSummary, MonitoringLoop<C, S>)>,
}

impl<C, S> MonitorHandle<C, S> {
    /// Ask the loop to stop after the current tick
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Shared stop flag, e.g. for a signal handler
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn state(&self) -> MonitorState {
        if self.thread.is_finished() {
            MonitorState::Stopped
        } else {
            MonitorState::Running
        }
    }

    /// Block until the loop exits and return its summary
    pub fn wait(self) -> Result<MonitorSummary> {
        self.join().map(|(summary, _)| summary)
    }

    /// Block until the loop exits and hand back the loop itself
    pub fn join(self) -> Result<(MonitorSummary, MonitoringLoop<C, S>)> {
        self.thread
            .join()
            .map_err(|_| SchedError::other("monitor thread panicked"))
    }
}

fn pause(delay: Duration, stop: &AtomicBool) {
    let deadline = Instant::now() + delay;
    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::sleep((deadline - now).min(PAUSE_SLICE));
    }
}
