//! Report command handler.
//!
//! Reads stored performance records back and summarizes them per algorithm.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::{summarize, Algorithm, RecordFilter, SqliteSink};
use crate::ui::{bold, print_events, print_summaries, warn};

/// Unix timestamp `minutes` before `now`, clamped at the range of i64
fn since_timestamp(now: i64, minutes: u64) -> i64 {
    let seconds = i64::try_from(minutes)
        .unwrap_or(i64::MAX)
        .saturating_mul(60);
    now.saturating_sub(seconds)
}

/// Execute the report command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let db_path = config.resolve_database_path()?;

    if !db_path.exists() {
        warn(&format!("No database at {}. Run 'schedmon monitor' first.", db_path.display()));
        return Ok(());
    }

    let sink = SqliteSink::open(&db_path)
        .with_context(|| format!("Database connection failed: {:?}", db_path))?;

    let algorithm = matches
        .get_one::<String>("algorithm")
        .map(|name| name.parse::<Algorithm>())
        .transpose()?;
    let from = matches
        .get_one::<u64>("since")
        .map(|&minutes| since_timestamp(chrono::Utc::now().timestamp(), minutes));

    let filter = RecordFilter {
        algorithm,
        from,
        ..Default::default()
    };
    let records = sink
        .performance_records(&filter)
        .context("Failed to fetch performance data")?;
    let summaries = summarize(&records);

    let events = match matches.get_one::<usize>("events") {
        Some(&limit) => sink.recent_events(limit).context("Failed to fetch system events")?,
        None => Vec::new(),
    };

    if matches.get_flag("json") {
        let output = serde_json::json!({
            "summaries": summaries,
            "events": events,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if summaries.is_empty() {
        warn("No performance records match the given filters");
    } else {
        bold(&format!("{} performance records", records.len()));
        println!();
        print_summaries(&summaries);
    }

    if !events.is_empty() {
        println!();
        bold("Recent system events");
        print_events(&events);
    }

    Ok(())
}
