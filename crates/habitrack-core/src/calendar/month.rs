//! A single month laid out as a week-aligned grid.
//!
//! The grid starts with blank cells up to the first day of the month, then
//! holds the day numbers in order. Completions are aggregated per day across
//! all active habits.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::date::{normalize, CompletionDate, WeekStart};
use crate::error::ValidationError;
use crate::habit::HabitRecord;
use crate::period::PeriodWindow;

const SUNDAY_FIRST: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONDAY_FIRST: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Column headers for a grid starting on `week_start`.
pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => SUNDAY_FIRST,
        WeekStart::Monday => MONDAY_FIRST,
    }
}

/// One month of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first: NaiveDate,
    week_start: WeekStart,
}

impl CalendarMonth {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMonth`] when `month` is outside
    /// 1..=12 or the year cannot be represented.
    pub fn new(year: i32, month: u32, week_start: WeekStart) -> Result<Self, ValidationError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ValidationError::InvalidMonth { year, month })?;
        Ok(Self { first, week_start })
    }

    /// The month containing `date`.
    pub fn containing(date: CompletionDate, week_start: WeekStart) -> Self {
        let naive = date.as_naive();
        Self {
            first: naive.with_day(1).unwrap_or(naive),
            week_start,
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// e.g. "March 2024"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn first_day(&self) -> CompletionDate {
        self.first.into()
    }

    pub fn days_in_month(&self) -> u32 {
        self.window().len_days() as u32
    }

    /// Inclusive window from the first to the last day of the month.
    pub fn window(&self) -> PeriodWindow {
        let last = self
            .first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        PeriodWindow {
            start: self.first.into(),
            end: last.into(),
        }
    }

    /// Blank cells before day 1.
    pub fn leading_blanks(&self) -> u32 {
        self.week_start.days_since_start(self.first.weekday())
    }

    /// Blank cells followed by day numbers.
    pub fn grid(&self) -> Vec<Option<u32>> {
        let blanks = (0..self.leading_blanks()).map(|_| None);
        let days = (1..=self.days_in_month()).map(Some);
        blanks.chain(days).collect()
    }

    /// The grid split into weeks, the last one padded with blanks.
    pub fn rows(&self) -> Vec<[Option<u32>; 7]> {
        self.grid()
            .chunks(7)
            .map(|chunk| {
                let mut row = [None; 7];
                row[..chunk.len()].copy_from_slice(chunk);
                row
            })
            .collect()
    }

    /// Previous month; stays put at the lower edge of the calendar.
    pub fn previous(&self) -> Self {
        match self.first.checked_sub_months(Months::new(1)) {
            Some(first) => Self { first, ..*self },
            None => *self,
        }
    }

    /// Next month; stays put at the upper edge of the calendar.
    pub fn next(&self) -> Self {
        match self.first.checked_add_months(Months::new(1)) {
            Some(first) => Self { first, ..*self },
            None => *self,
        }
    }

    /// `YYYY-MM-DD` key of `day`, if the day exists in this month.
    pub fn day_key(&self, day: u32) -> Option<String> {
        self.first.with_day(day).map(|d| CompletionDate::from(d).to_string())
    }

    /// Ids of active habits completed on each day of this month.
    ///
    /// Completion strings that cannot be normalised are skipped here; this is
    /// display aggregation, not streak accounting.
    pub fn completion_map(&self, habits: &[HabitRecord]) -> BTreeMap<u32, BTreeSet<String>> {
        let window = self.window();
        let mut map: BTreeMap<u32, BTreeSet<String>> = BTreeMap::new();

        for habit in habits.iter().filter(|h| h.is_active()) {
            for key in habit.completion_keys() {
                let date = match normalize(key) {
                    Ok(date) => date,
                    Err(err) => {
                        tracing::debug!(habit = %habit.id, %err, "skipping completion in calendar");
                        continue;
                    }
                };
                if window.contains(date) {
                    map.entry(date.day()).or_default().insert(habit.id.clone());
                }
            }
        }
        map
    }

    /// Everything needed to render the month.
    pub fn view(&self, habits: &[HabitRecord], today: CompletionDate) -> CalendarView {
        let completions = self
            .completion_map(habits)
            .into_iter()
            .map(|(day, ids)| (day, ids.into_iter().collect()))
            .collect();

        CalendarView {
            year: self.year(),
            month: self.month(),
            title: self.title(),
            weekday_labels: weekday_labels(self.week_start).iter().map(|s| s.to_string()).collect(),
            grid: self.grid(),
            today: self.window().contains(today).then(|| today.day()),
            completions,
        }
    }
}

/// Render-ready month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekday_labels: Vec<String>,
    pub grid: Vec<Option<u32>>,
    /// Day number of today when it falls in this month
    pub today: Option<u32>,
    pub completions: BTreeMap<u32, Vec<String>>,
}
