use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::monitor::{DelayPlacement, MonitorSettings};
use super::scheduling::{RrTurnaround, SimulationParams, DEFAULT_QUANTUM, MIN_QUANTUM};
use super::snapshot::CollectorConfig;
use crate::error::SchedError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of ticks per run, `None` runs until stopped
    pub iterations: Option<u64>,
    pub tick_delay_ms: u64,
    pub delay_placement: DelayPlacement,
    pub cpu_sample_interval_ms: u64,
    /// Round Robin quantum in CPU seconds
    pub quantum: f64,
    pub rr_turnaround: RrTurnaround,
    /// Soft per-tick deadline; overruns are reported, never cancelled
    pub tick_budget_ms: Option<u64>,
    pub database_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: Some(100),
            tick_delay_ms: 1000,
            delay_placement: DelayPlacement::default(),
            cpu_sample_interval_ms: 1000,
            quantum: DEFAULT_QUANTUM,
            rr_turnaround: RrTurnaround::default(),
            tick_budget_ms: None,
            database_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // If the file is empty or corrupted, return default config
        if data.is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config {:?}: {}", config_path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("schedmon").join("config.json"))
    }

    /// Configured database path, or the default under the user data directory
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir().with_context(|| "Could not determine data directory")?;
        Ok(data_dir.join("schedmon").join("schedmon.db"))
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !self.quantum.is_finite() || self.quantum < MIN_QUANTUM {
            return Err(SchedError::config(format!(
                "quantum must be at least {} seconds, got {}",
                MIN_QUANTUM, self.quantum
            )));
        }
        if self.iterations == Some(0) {
            return Err(SchedError::config("iterations must be at least 1"));
        }
        Ok(())
    }

    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            quantum: self.quantum,
            rr_turnaround: self.rr_turnaround,
        }
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            cpu_sample_interval: Duration::from_millis(self.cpu_sample_interval_ms),
            ..Default::default()
        }
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            iterations: self.iterations,
            tick_delay: Duration::from_millis(self.tick_delay_ms),
            delay_placement: self.delay_placement,
            tick_budget: self.tick_budget_ms.map(Duration::from_millis),
            params: self.simulation_params(),
        }
    }
}
