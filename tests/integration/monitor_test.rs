// Integration tests for the monitoring loop lifecycle and failure isolation

use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::{Duration, Instant};

use schedmon::core::{
    Algorithm, DelayPlacement, MonitorSettings, MonitorState, MonitoringLoop,
};

use super::doubles::{FakeSource, RecordingSink};

fn settings(iterations: Option<u64>, delay_ms: u64) -> MonitorSettings {
    MonitorSettings {
        iterations,
        tick_delay: Duration::from_millis(delay_ms),
        ..Default::default()
    }
}

#[test]
fn test_bounded_run_writes_one_batch_per_tick() {
    let sink = RecordingSink::default();
    let mut monitor = MonitoringLoop::new(FakeSource::new(), sink.clone(), settings(Some(3), 0));

    let summary = monitor.run(&AtomicBool::new(false));

    assert_eq!(summary.ticks_run, 3);
    assert_eq!(summary.ticks_failed, 0);
    assert_eq!(sink.batch_count(), 3);

    let batches = sink.batches.lock().unwrap();
    for batch in batches.iter() {
        let algorithms: Vec<Algorithm> = batch.records.iter().map(|r| r.algorithm).collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());
        assert!(batch.records.iter().all(|r| r.throughput == 3));
        assert!(batch.records.iter().all(|r| r.cpu_utilization == 25.0));
    }

    // FCFS over bursts 5, 2, 8 in arrival order
    assert_eq!(batches[0].records[0].waiting_time, 4.0);
    assert_eq!(batches[0].records[0].turnaround_time, 9.0);
    // Round Robin turnaround comes from the collector-seeded values
    assert_eq!(batches[0].records[2].turnaround_time, 6.0);
}

#[test]
fn test_sink_failure_does_not_stop_following_ticks() {
    let sink = RecordingSink::failing_batches_on(&[0]);
    let mut monitor = MonitoringLoop::new(FakeSource::new(), sink.clone(), settings(Some(2), 0));

    let summary = monitor.run(&AtomicBool::new(false));

    assert_eq!(summary.ticks_run, 2);
    assert_eq!(summary.ticks_failed, 1);
    assert_eq!(sink.batch_count(), 1);
    assert!(sink.event_labels().contains(&"Database Error".to_string()));
}

#[test]
fn test_collection_failure_is_logged_as_system_error() {
    let sink = RecordingSink::default();
    let source = FakeSource::failing_on(&[1]);
    let mut monitor = MonitoringLoop::new(source, sink.clone(), settings(Some(3), 0));

    let summary = monitor.run(&AtomicBool::new(false));

    assert_eq!(summary.ticks_failed, 1);
    assert_eq!(sink.batch_count(), 2);

    let labels = sink.event_labels();
    assert_eq!(labels.first().map(String::as_str), Some("Monitor Started"));
    assert_eq!(labels.last().map(String::as_str), Some("Monitor Stopped"));
    assert_eq!(labels.iter().filter(|l| *l == "System Error").count(), 1);
    assert!(!labels.contains(&"Database Error".to_string()));
}

#[test]
fn test_event_log_failures_are_swallowed() {
    let sink = RecordingSink {
        fail_events: true,
        ..RecordingSink::failing_batches_on(&[0, 1])
    };
    let mut monitor = MonitoringLoop::new(FakeSource::new(), sink.clone(), settings(Some(3), 0));

    let summary = monitor.run(&AtomicBool::new(false));

    assert_eq!(summary.ticks_run, 3);
    assert_eq!(summary.ticks_failed, 2);
    assert_eq!(sink.batch_count(), 1);
    assert!(sink.event_labels().is_empty());
}

#[test]
fn test_raised_stop_flag_runs_no_ticks() {
    let sink = RecordingSink::default();
    let mut monitor = MonitoringLoop::new(FakeSource::new(), sink.clone(), settings(None, 0));

    let summary = monitor.run(&AtomicBool::new(true));

    assert_eq!(summary.ticks_run, 0);
    assert_eq!(sink.batch_count(), 0);
}

#[test]
fn test_delay_applies_between_ticks() {
    let mut monitor = MonitoringLoop::new(
        FakeSource::new(),
        RecordingSink::default(),
        settings(Some(3), 40),
    );

    let started = Instant::now();
    monitor.run(&AtomicBool::new(false));

    // Two gaps for three ticks
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[test]
fn test_delay_after_batch_option() {
    let mut monitor = MonitoringLoop::new(
        FakeSource::new(),
        RecordingSink::default(),
        MonitorSettings {
            delay_placement: DelayPlacement::AfterBatch,
            ..settings(Some(3), 40)
        },
    );

    let started = Instant::now();
    let summary = monitor.run(&AtomicBool::new(false));

    assert_eq!(summary.ticks_run, 3);
    assert!(started.elapsed() >= Duration::from_millis(40));
}

#[test]
fn test_spawned_loop_stops_on_request() {
    let sink = RecordingSink::default();
    let handle = MonitoringLoop::new(FakeSource::new(), sink.clone(), settings(None, 5))
        .spawn()
        .unwrap();

    assert_eq!(handle.state(), MonitorState::Running);

    thread::sleep(Duration::from_millis(50));
    handle.stop();
    let summary = handle.wait().unwrap();

    assert!(summary.ticks_run >= 1);
    assert_eq!(sink.batch_count() as u64, summary.ticks_run);
}

#[test]
fn test_spawned_bounded_loop_finishes_on_its_own() {
    let handle = MonitoringLoop::new(
        FakeSource::new(),
        RecordingSink::default(),
        settings(Some(4), 0),
    )
    .spawn()
    .unwrap();

    let (summary, monitor) = handle.join().unwrap();
    assert_eq!(summary.ticks_run, 4);
    assert_eq!(monitor.sink().batch_count(), 4);
}
