//! Consecutive-period streaks over a completion set.
//!
//! Daily habits count consecutive calendar days. Weekly habits count
//! consecutive week buckets, each keyed by the first day of its week, so the
//! current and longest streak share one bucketing and stay correct across
//! year boundaries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::completion::CompletionSet;
use crate::date::{CompletionDate, WeekStart};

/// How often a habit is meant to be performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

impl Frequency {
    /// Days between two adjacent streak units.
    fn step_days(&self) -> i64 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => f.write_str("daily"),
            Frequency::Weekly => f.write_str("weekly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Frequency::Daily),
            "weekly" | "week" => Ok(Frequency::Weekly),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

/// Current and longest streak of a habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub current: u32,
    pub longest: u32,
}

/// Compute both streaks in one call.
pub fn compute_streaks(
    dates: &CompletionSet,
    frequency: Frequency,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> StreakResult {
    let units = units(dates, frequency, week_start);
    let step = frequency.step_days();
    let anchor = anchor(CompletionDate::of(now), frequency, week_start);

    let result = StreakResult {
        current: current_run(&units, anchor, step),
        longest: longest_run(&units, step),
    };
    tracing::trace!(%frequency, units = units.len(), ?result, "computed streaks");
    result
}

/// Streak ending today or, when today is not done yet, ending yesterday.
///
/// For weekly habits "today" is the current week bucket and "yesterday" the
/// preceding one. A gap of more than one unit yields 0.
pub fn current_streak(
    dates: &CompletionSet,
    frequency: Frequency,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> u32 {
    let units = units(dates, frequency, week_start);
    let anchor = anchor(CompletionDate::of(now), frequency, week_start);
    current_run(&units, anchor, frequency.step_days())
}

/// Longest run of consecutive units anywhere in the set.
pub fn longest_streak(dates: &CompletionSet, frequency: Frequency, week_start: WeekStart) -> u32 {
    let units = units(dates, frequency, week_start);
    longest_run(&units, frequency.step_days())
}

fn units(dates: &CompletionSet, frequency: Frequency, week_start: WeekStart) -> BTreeSet<CompletionDate> {
    match frequency {
        Frequency::Daily => dates.iter().collect(),
        Frequency::Weekly => dates.iter().map(|d| d.week_start(week_start)).collect(),
    }
}

fn anchor(today: CompletionDate, frequency: Frequency, week_start: WeekStart) -> CompletionDate {
    match frequency {
        Frequency::Daily => today,
        Frequency::Weekly => today.week_start(week_start),
    }
}

fn current_run(units: &BTreeSet<CompletionDate>, anchor: CompletionDate, step: i64) -> u32 {
    let mut cursor = if units.contains(&anchor) {
        Some(anchor)
    } else {
        match anchor.offset_days(-step) {
            Some(previous) if units.contains(&previous) => Some(previous),
            _ => return 0,
        }
    };

    let mut streak = 0;
    while let Some(unit) = cursor {
        if !units.contains(&unit) {
            break;
        }
        streak += 1;
        cursor = unit.offset_days(-step);
    }
    streak
}

fn longest_run(units: &BTreeSet<CompletionDate>, step: i64) -> u32 {
    let mut iter = units.iter();
    let Some(first) = iter.next() else {
        return 0;
    };

    let mut longest = 0;
    let mut running = 1;
    let mut previous = *first;
    for &unit in iter {
        if previous.days_until(unit) == step {
            running += 1;
        } else {
            longest = longest.max(running);
            running = 1;
        }
        previous = unit;
    }
    longest.max(running)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(days: &[&str]) -> CompletionSet {
        CompletionSet::try_from_inputs(days.iter().copied()).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn empty_set_has_no_streaks() {
        let empty = CompletionSet::new();
        for freq in [Frequency::Daily, Frequency::Weekly] {
            assert_eq!(current_streak(&empty, freq, at("2024-03-12T18:00"), WeekStart::Sunday), 0);
            assert_eq!(longest_streak(&empty, freq, WeekStart::Sunday), 0);
        }
    }

    #[test]
    fn three_days_ending_today() {
        let dates = set(&["2024-03-10", "2024-03-11", "2024-03-12"]);
        let now = at("2024-03-12T18:00");
        assert_eq!(current_streak(&dates, Frequency::Daily, now, WeekStart::Sunday), 3);
    }

    #[test]
    fn streak_survives_until_end_of_next_day() {
        let dates = set(&["2024-03-10", "2024-03-11"]);
        let now = at("2024-03-12T23:59");
        assert_eq!(current_streak(&dates, Frequency::Daily, now, WeekStart::Sunday), 2);
    }

    #[test]
    fn gap_of_more_than_one_day_breaks_streak() {
        let dates = set(&["2024-03-08"]);
        let now = at("2024-03-12T09:00");
        assert_eq!(current_streak(&dates, Frequency::Daily, now, WeekStart::Sunday), 0);

        let dates = set(&["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-10"]);
        assert_eq!(current_streak(&dates, Frequency::Daily, now, WeekStart::Sunday), 0);
    }

    #[test]
    fn future_dates_do_not_extend_current_streak() {
        let dates = set(&["2024-03-12", "2024-03-13", "2024-03-14"]);
        let now = at("2024-03-12T08:00");
        assert_eq!(current_streak(&dates, Frequency::Daily, now, WeekStart::Sunday), 1);
    }

    #[test]
    fn longest_daily_streak_picks_the_longer_run() {
        let dates = set(&[
            "2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05",
            "2024-01-10", "2024-01-11", "2024-01-12",
        ]);
        assert_eq!(longest_streak(&dates, Frequency::Daily, WeekStart::Sunday), 5);
    }

    #[test]
    fn longest_daily_streak_of_single_day() {
        let dates = set(&["2024-01-01"]);
        assert_eq!(longest_streak(&dates, Frequency::Daily, WeekStart::Sunday), 1);
    }

    #[test]
    fn longest_daily_streak_across_month_and_leap_day() {
        let dates = set(&["2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(longest_streak(&dates, Frequency::Daily, WeekStart::Sunday), 3);
    }

    #[test]
    fn weekly_current_streak_counts_buckets() {
        // Weeks starting 2024-02-25, 03-03, 03-10 (Sunday start)
        let dates = set(&["2024-02-27", "2024-03-05", "2024-03-06", "2024-03-11"]);
        let now = at("2024-03-12T10:00");
        assert_eq!(current_streak(&dates, Frequency::Weekly, now, WeekStart::Sunday), 3);
    }

    #[test]
    fn weekly_current_streak_starts_from_last_week() {
        let dates = set(&["2024-02-27", "2024-03-05"]);
        let now = at("2024-03-12T10:00");
        assert_eq!(current_streak(&dates, Frequency::Weekly, now, WeekStart::Sunday), 2);

        let dates = set(&["2024-02-27"]);
        assert_eq!(current_streak(&dates, Frequency::Weekly, now, WeekStart::Sunday), 0);
    }

    #[test]
    fn weekly_buckets_follow_week_start() {
        // Sunday 2024-03-10 and Monday 2024-03-11
        let dates = set(&["2024-03-10", "2024-03-11"]);
        assert_eq!(longest_streak(&dates, Frequency::Weekly, WeekStart::Sunday), 1);
        assert_eq!(longest_streak(&dates, Frequency::Weekly, WeekStart::Monday), 2);
    }

    #[test]
    fn weekly_longest_streak_crosses_year_boundary() {
        let dates = set(&["2023-12-20", "2023-12-27", "2024-01-03", "2024-01-10"]);
        assert_eq!(longest_streak(&dates, Frequency::Weekly, WeekStart::Sunday), 4);
    }

    #[test]
    fn compute_streaks_matches_individual_calls() {
        let dates = set(&["2024-03-01", "2024-03-02", "2024-03-11", "2024-03-12"]);
        let now = at("2024-03-12T12:00");
        let result = compute_streaks(&dates, Frequency::Daily, now, WeekStart::Sunday);
        assert_eq!(result, StreakResult { current: 2, longest: 2 });
    }

    #[test]
    fn frequency_parse() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("hourly".parse::<Frequency>().is_err());
    }
}
