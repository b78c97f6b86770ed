use schedmon::core::{Config, DelayPlacement, RrTurnaround};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.iterations, Some(100));
    assert_eq!(config.tick_delay_ms, 1000);
    assert!(config.database_path.is_none());
}

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("missing.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("schedmon").join("config.json");

    let config = Config {
        iterations: None,
        tick_delay_ms: 250,
        delay_placement: DelayPlacement::AfterBatch,
        quantum: 4.0,
        rr_turnaround: RrTurnaround::Simulated,
        tick_budget_ms: Some(3000),
        database_path: Some(PathBuf::from("/tmp/metrics.db")),
        ..Default::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_empty_or_corrupted_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();

    let empty = temp_dir.path().join("empty.json");
    std::fs::write(&empty, "").unwrap();
    assert_eq!(Config::load_from(&empty).unwrap(), Config::default());

    let corrupted = temp_dir.path().join("corrupted.json");
    std::fs::write(&corrupted, "{ not json").unwrap();
    assert_eq!(Config::load_from(&corrupted).unwrap(), Config::default());
}

#[test]
fn test_configured_database_path_wins() {
    let config = Config {
        database_path: Some(PathBuf::from("/data/custom.db")),
        ..Default::default()
    };
    assert_eq!(
        config.resolve_database_path().unwrap(),
        PathBuf::from("/data/custom.db")
    );
}
