//! Subcommands and the input handling they share.

pub mod analytics;
pub mod calendar;
pub mod config;
pub mod goal;
pub mod streak;
pub mod summary;
pub mod template;
pub mod window;

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::Args;
use habitrack_core::{Config, HabitRecord};
use serde::Serialize;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Options shared by every command that reads habit records.
#[derive(Args, Debug)]
pub struct HabitInput {
    /// JSON array of habit records; `-` reads stdin
    pub file: PathBuf,

    /// Evaluate as of this time (RFC 3339 or YYYY-MM-DD[THH:MM[:SS]])
    #[arg(long)]
    pub now: Option<String>,
}

impl HabitInput {
    pub fn habits(&self) -> CliResult<Vec<HabitRecord>> {
        load_habits(&self.file)
    }

    pub fn now(&self, config: &Config) -> CliResult<NaiveDateTime> {
        resolve_now(self.now.as_deref(), config)
    }
}

pub fn load_habits(file: &Path) -> CliResult<Vec<HabitRecord>> {
    let content = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file).map_err(|e| format!("cannot read {}: {e}", file.display()))?
    };

    let habits: Vec<HabitRecord> = serde_json::from_str(&content)?;
    tracing::debug!(count = habits.len(), "loaded habit records");
    Ok(habits)
}

/// `--now` as written, or the system clock in the configured offset.
pub fn resolve_now(now: Option<&str>, config: &Config) -> CliResult<NaiveDateTime> {
    let Some(raw) = now else {
        return Ok(config.preferences.utc_offset.wall_clock(Utc::now()));
    };
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Ok(dt.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    Err(format!("invalid --now value: {raw}").into())
}

/// Keep only the habit with `id`, when one is requested.
pub fn select_habits(habits: Vec<HabitRecord>, id: Option<&str>) -> CliResult<Vec<HabitRecord>> {
    let Some(id) = id else {
        return Ok(habits);
    };
    let selected: Vec<HabitRecord> = habits.into_iter().filter(|h| h.id == id).collect();
    if selected.is_empty() {
        return Err(format!("no habit with id: {id}").into());
    }
    Ok(selected)
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
