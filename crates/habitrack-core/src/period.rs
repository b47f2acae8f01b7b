//! Period windows for goal evaluation.
//!
//! A window is a pair of inclusive calendar days computed relative to the
//! caller-supplied `now`.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::date::{CompletionDate, WeekStart};

/// The recurring window over which a goal target is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Day,
    Week,
    Month,
}

impl GoalPeriod {
    /// Fixed human label for the current period.
    pub fn label(&self) -> &'static str {
        match self {
            GoalPeriod::Day => "Today",
            GoalPeriod::Week => "This week",
            GoalPeriod::Month => "This month",
        }
    }
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GoalPeriod::Day => "day",
            GoalPeriod::Week => "week",
            GoalPeriod::Month => "month",
        };
        f.write_str(name)
    }
}

impl FromStr for GoalPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(GoalPeriod::Day),
            "week" | "weekly" => Ok(GoalPeriod::Week),
            "month" | "monthly" => Ok(GoalPeriod::Month),
            other => Err(format!("unknown goal period: {other}")),
        }
    }
}

/// Inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: CompletionDate,
    pub end: CompletionDate,
}

impl PeriodWindow {
    pub fn contains(&self, date: CompletionDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both bounds.
    pub fn len_days(&self) -> i64 {
        self.start.days_until(self.end) + 1
    }

    /// Last representable instant of the window (`end` at 23:59:59.999).
    pub fn last_instant(&self) -> NaiveDateTime {
        self.end
            .as_naive()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Every day in the window, oldest first.
    pub fn days(&self) -> impl Iterator<Item = CompletionDate> {
        let start = self.start;
        (0..self.len_days().max(0)).filter_map(move |offset| start.offset_days(offset))
    }
}

/// Resolve the current `period` window around `now`.
pub fn resolve_window(period: GoalPeriod, now: NaiveDateTime, week_start: WeekStart) -> PeriodWindow {
    let today = CompletionDate::of(now);

    match period {
        GoalPeriod::Day => PeriodWindow {
            start: today,
            end: today,
        },
        GoalPeriod::Week => {
            let start = today.week_start(week_start);
            let end = start
                .offset_days(6)
                .unwrap_or_else(|| CompletionDate::from(NaiveDate::MAX));
            PeriodWindow { start, end }
        }
        GoalPeriod::Month => {
            let first = today
                .as_naive()
                .with_day0(0)
                .unwrap_or_else(|| today.as_naive());
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(NaiveDate::MAX);
            PeriodWindow {
                start: first.into(),
                end: last.into(),
            }
        }
    }
}

/// The seven days of the week containing `now`.
pub fn week_dates(now: NaiveDateTime, week_start: WeekStart) -> Vec<CompletionDate> {
    resolve_window(GoalPeriod::Week, now, week_start).days().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn d(s: &str) -> CompletionDate {
        s.parse().unwrap()
    }

    #[test]
    fn day_window_is_today() {
        let w = resolve_window(GoalPeriod::Day, at("2024-03-12T18:00:00"), WeekStart::Sunday);
        assert_eq!(w.start, d("2024-03-12"));
        assert_eq!(w.end, d("2024-03-12"));
        assert_eq!(w.len_days(), 1);
    }

    #[test]
    fn week_window_sunday_start() {
        // Tuesday
        let w = resolve_window(GoalPeriod::Week, at("2024-03-12T18:00:00"), WeekStart::Sunday);
        assert_eq!(w.start, d("2024-03-10"));
        assert_eq!(w.end, d("2024-03-16"));
    }

    #[test]
    fn week_window_monday_start() {
        let w = resolve_window(GoalPeriod::Week, at("2024-03-10T09:00:00"), WeekStart::Monday);
        assert_eq!(w.start, d("2024-03-04"));
        assert_eq!(w.end, d("2024-03-10"));
    }

    #[test]
    fn week_window_crosses_year_boundary() {
        let w = resolve_window(GoalPeriod::Week, at("2025-01-01T12:00:00"), WeekStart::Sunday);
        assert_eq!(w.start, d("2024-12-29"));
        assert_eq!(w.end, d("2025-01-04"));
    }

    #[test]
    fn month_window_handles_leap_february() {
        let w = resolve_window(GoalPeriod::Month, at("2024-02-14T00:00:00"), WeekStart::Sunday);
        assert_eq!(w.start, d("2024-02-01"));
        assert_eq!(w.end, d("2024-02-29"));

        let w = resolve_window(GoalPeriod::Month, at("2023-12-31T23:59:59"), WeekStart::Sunday);
        assert_eq!(w.start, d("2023-12-01"));
        assert_eq!(w.end, d("2023-12-31"));
    }

    #[test]
    fn contains_is_inclusive() {
        let w = PeriodWindow {
            start: d("2024-03-10"),
            end: d("2024-03-16"),
        };
        assert!(w.contains(d("2024-03-10")));
        assert!(w.contains(d("2024-03-16")));
        assert!(!w.contains(d("2024-03-17")));
        assert!(!w.contains(d("2024-03-09")));
    }

    #[test]
    fn week_dates_lists_seven_days() {
        let days = week_dates(at("2024-03-12T07:00:00"), WeekStart::Monday);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], d("2024-03-11"));
        assert_eq!(days[6], d("2024-03-17"));
    }

    #[test]
    fn last_instant_is_end_of_day() {
        let w = resolve_window(GoalPeriod::Week, at("2024-03-12T07:00:00"), WeekStart::Sunday);
        assert_eq!(w.last_instant(), at("2024-03-16T23:59:59") + chrono::Duration::milliseconds(999));
    }

    #[test]
    fn goal_period_parse_and_label() {
        assert_eq!("Week".parse::<GoalPeriod>().unwrap(), GoalPeriod::Week);
        assert_eq!("monthly".parse::<GoalPeriod>().unwrap(), GoalPeriod::Month);
        assert!("year".parse::<GoalPeriod>().is_err());
        assert_eq!(GoalPeriod::Month.label(), "This month");
        assert_eq!(GoalPeriod::Day.to_string(), "day");
    }
}
