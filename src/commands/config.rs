use crate::core::{Config, DelayPlacement, RrTurnaround};
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;

/// Settable configuration keys
enum ConfigKey {
    Iterations,
    TickDelayMs,
    DelayPlacement,
    CpuSampleIntervalMs,
    Quantum,
    RrTurnaround,
    TickBudgetMs,
    DatabasePath,
}

impl ConfigKey {
    const NAMES: [&'static str; 8] = [
        "iterations",
        "tick-delay-ms",
        "delay-placement",
        "cpu-sample-interval-ms",
        "quantum",
        "rr-turnaround",
        "tick-budget-ms",
        "database-path",
    ];

    fn parse(name: &str) -> Result<Self> {
        Ok(match name {
            "iterations" => ConfigKey::Iterations,
            "tick-delay-ms" => ConfigKey::TickDelayMs,
            "delay-placement" => ConfigKey::DelayPlacement,
            "cpu-sample-interval-ms" => ConfigKey::CpuSampleIntervalMs,
            "quantum" => ConfigKey::Quantum,
            "rr-turnaround" => ConfigKey::RrTurnaround,
            "tick-budget-ms" => ConfigKey::TickBudgetMs,
            "database-path" => ConfigKey::DatabasePath,
            other => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                other,
                Self::NAMES.join(", ")
            ),
        })
    }

    /// Apply `value`; "none" clears optional keys
    fn apply(&self, config: &mut Config, value: &str) -> Result<()> {
        let is_none = value.eq_ignore_ascii_case("none");
        match self {
            ConfigKey::Iterations => {
                config.iterations = if is_none { None } else { Some(parse_number(value)?) }
            }
            ConfigKey::TickDelayMs => config.tick_delay_ms = parse_number(value)?,
            ConfigKey::DelayPlacement => {
                config.delay_placement = match value {
                    "between-ticks" => DelayPlacement::BetweenTicks,
                    "after-batch" => DelayPlacement::AfterBatch,
                    _ => bail!("delay-placement must be 'between-ticks' or 'after-batch'"),
                }
            }
            ConfigKey::CpuSampleIntervalMs => config.cpu_sample_interval_ms = parse_number(value)?,
            ConfigKey::Quantum => {
                config.quantum = value
                    .parse()
                    .with_context(|| format!("Invalid quantum: {}", value))?
            }
            ConfigKey::RrTurnaround => {
                config.rr_turnaround = match value {
                    "collector-seeded" => RrTurnaround::CollectorSeeded,
                    "simulated" => RrTurnaround::Simulated,
                    _ => bail!("rr-turnaround must be 'collector-seeded' or 'simulated'"),
                }
            }
            ConfigKey::TickBudgetMs => {
                config.tick_budget_ms = if is_none { None } else { Some(parse_number(value)?) }
            }
            ConfigKey::DatabasePath => {
                config.database_path = if is_none { None } else { Some(PathBuf::from(value)) }
            }
        }
        Ok(())
    }
}

fn parse_number(value: &str) -> Result<u64> {
    value
        .parse()
        .with_context(|| format!("Expected a non-negative integer, got '{}'", value))
}

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => show(),
        Some(("path", _)) => {
            println!("{}", Config::get_config_path()?.display());
            Ok(())
        }
        Some(("set", sub_matches)) => set(sub_matches),
        Some(("reset", _)) => {
            Config::default().save()?;
            println!("{}", "✓ Configuration reset to defaults".green());
            Ok(())
        }
        _ => {
            println!("Use 'schedmon config --help' for more information.");
            Ok(())
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!();
    println!(
        "{} {}",
        "Database:".white().bold(),
        config.resolve_database_path()?.display().to_string().cyan()
    );
    Ok(())
}

fn set(matches: &ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .context("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut config = Config::load()?;
    ConfigKey::parse(key)?.apply(&mut config, value)?;
    config.validate()?;
    config.save()?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}
