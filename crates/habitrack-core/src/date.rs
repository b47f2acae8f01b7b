//! Calendar-day normalisation.
//!
//! Every completion is reduced to a [`CompletionDate`]: a calendar day with no
//! time-of-day and no timezone. Inputs that carry an offset keep the day as it
//! was written; nothing is shifted into another zone. Epoch milliseconds are
//! read as UTC calendar days.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DateError;

/// Largest magnitude accepted for epoch-millisecond inputs (±100,000,000 days).
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// `%#z` takes `Z`, `+09`, `+0900` and `+09:00`
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// A single calendar day on which a habit was completed.
///
/// Serialises as `YYYY-MM-DD`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompletionDate(NaiveDate);

impl CompletionDate {
    /// Build from year, month (1-12) and day (1-31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                DateError::invalid(
                    format!("{year:04}-{month:02}-{day:02}"),
                    "not a valid calendar date",
                )
            })
    }

    /// The calendar day of a wall-clock instant.
    pub fn of(now: NaiveDateTime) -> Self {
        Self(now.date())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Shift by a signed number of days. `None` past chrono's representable range.
    pub fn offset_days(&self, days: i64) -> Option<Self> {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        shifted.map(Self)
    }

    /// The previous calendar day.
    pub fn previous(&self) -> Option<Self> {
        self.offset_days(-1)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: CompletionDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// First day of the week containing this date.
    ///
    /// Clamps to `self` at the lower edge of the representable range.
    pub fn week_start(&self, week_start: WeekStart) -> Self {
        let back = week_start.days_since_start(self.weekday());
        self.offset_days(-(back as i64)).unwrap_or(*self)
    }
}

impl fmt::Display for CompletionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CompletionDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date_str(s)
    }
}

impl TryFrom<String> for CompletionDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_date_str(&value)
    }
}

impl From<CompletionDate> for String {
    fn from(date: CompletionDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for CompletionDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// First day of the week used for weekly buckets and week windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    #[serde(alias = "Sunday")]
    Sunday,
    #[serde(alias = "Monday")]
    Monday,
}

impl WeekStart {
    /// Days elapsed since the start of the week (0-6).
    pub fn days_since_start(&self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            other => Err(format!("unknown first day of week: {other}")),
        }
    }
}

/// Display format for dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
}

/// Anything that can be reduced to a calendar day.
pub trait IntoCompletionDate {
    fn into_completion_date(self) -> Result<CompletionDate, DateError>;
}

/// Canonicalise a date-like input to a [`CompletionDate`].
///
/// # Errors
///
/// Returns [`DateError::Invalid`] when the input is malformed, names a day
/// that does not exist, or is a non-finite/out-of-range timestamp.
pub fn normalize<T: IntoCompletionDate>(input: T) -> Result<CompletionDate, DateError> {
    input.into_completion_date()
}

impl IntoCompletionDate for CompletionDate {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        Ok(self)
    }
}

impl IntoCompletionDate for &str {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        parse_date_str(self)
    }
}

impl IntoCompletionDate for String {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        parse_date_str(&self)
    }
}

impl IntoCompletionDate for &String {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        parse_date_str(self)
    }
}

impl IntoCompletionDate for NaiveDate {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        Ok(CompletionDate(self))
    }
}

impl IntoCompletionDate for NaiveDateTime {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        Ok(CompletionDate(self.date()))
    }
}

impl<Tz: TimeZone> IntoCompletionDate for DateTime<Tz> {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        Ok(CompletionDate(self.date_naive()))
    }
}

/// Epoch milliseconds, read as a UTC calendar day.
impl IntoCompletionDate for f64 {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        if !self.is_finite() {
            return Err(DateError::invalid(self.to_string(), "non-finite timestamp"));
        }
        if self.abs() > MAX_EPOCH_MILLIS {
            return Err(DateError::invalid(self.to_string(), "timestamp out of range"));
        }
        (self.floor() as i64).into_completion_date()
    }
}

/// Epoch milliseconds, read as a UTC calendar day.
impl IntoCompletionDate for i64 {
    fn into_completion_date(self) -> Result<CompletionDate, DateError> {
        DateTime::<Utc>::from_timestamp_millis(self)
            .map(|dt| CompletionDate(dt.date_naive()))
            .ok_or_else(|| DateError::invalid(self.to_string(), "timestamp out of range"))
    }
}

fn parse_date_str(raw: &str) -> Result<CompletionDate, DateError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DateError::invalid(raw, "empty date"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(CompletionDate(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(CompletionDate(dt.date_naive()));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(CompletionDate(dt.date_naive()));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(CompletionDate(dt.date()));
        }
    }

    Err(DateError::invalid(
        raw,
        "expected YYYY-MM-DD or an ISO-8601 date-time",
    ))
}

/// Format a date for display.
pub fn format_date(date: CompletionDate, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::MonthDayYear => "%m/%d/%Y",
        DateFormat::DayMonthYear => "%d/%m/%Y",
    };
    date.as_naive().format(pattern).to_string()
}

/// Signed day difference, positive when `a` is after `b`.
pub fn days_between(a: CompletionDate, b: CompletionDate) -> i64 {
    b.days_until(a)
}

/// Position of `date` within its week (0-6), counted from `week_start`.
pub fn day_of_week_index(date: CompletionDate, week_start: WeekStart) -> u32 {
    week_start.days_since_start(date.weekday())
}

/// Human-readable distance from `today`, e.g. "Yesterday" or "3 weeks ago".
pub fn relative_label(date: CompletionDate, today: CompletionDate) -> String {
    let days_ago = date.days_until(today);

    match days_ago {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        -1 => "Tomorrow".to_string(),
        d if d < 0 => format!("In {} days", -d),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => plural_ago(d / 7, "week"),
        d if d < 365 => plural_ago(d / 30, "month"),
        d => plural_ago(d / 365, "year"),
    }
}

fn plural_ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
