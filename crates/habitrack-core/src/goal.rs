//! Goal progress for the current period.
//!
//! A goal is a completion target over a day, week or month. A habit without a
//! goal (no target, a non-positive target, or no period) gets the zeroed
//! [`GoalProgress`] rather than an error.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::completion::CompletionSet;
use crate::date::WeekStart;
use crate::period::{resolve_window, GoalPeriod, PeriodWindow};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A completion target over a recurring period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub target: u32,
    pub period: GoalPeriod,
}

impl GoalConfig {
    /// Build from optional record fields. `None` means "no goal".
    pub fn from_parts(target: Option<i64>, period: Option<GoalPeriod>) -> Option<Self> {
        let target = u32::try_from(target?).ok().filter(|t| *t > 0)?;
        Some(Self {
            target,
            period: period?,
        })
    }

    pub fn progress(&self, dates: &CompletionSet, now: NaiveDateTime, week_start: WeekStart) -> GoalProgress {
        goal_progress(dates, Some(i64::from(self.target)), Some(self.period), now, week_start)
    }
}

/// Progress towards a goal within the current period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub current_count: u32,
    pub target_count: u32,
    /// Rounded, clamped to 0-100
    pub completion_percentage: u32,
    pub remaining_count: u32,
    pub is_completed: bool,
    pub period_label: String,
    /// Whole days until the period ends; 0 for daily goals
    pub days_left: i64,
}

impl GoalProgress {
    /// Whether a goal was configured at all.
    pub fn has_goal(&self) -> bool {
        self.target_count > 0
    }
}

/// Count completions in the current `period` window against `target`.
///
/// Returns the zeroed "no goal" value when `target` is absent or
/// non-positive, or when `period` is absent.
pub fn goal_progress(
    dates: &CompletionSet,
    target: Option<i64>,
    period: Option<GoalPeriod>,
    now: NaiveDateTime,
    week_start: WeekStart,
) -> GoalProgress {
    let Some(goal) = GoalConfig::from_parts(target, period) else {
        return GoalProgress::default();
    };

    let window = resolve_window(goal.period, now, week_start);
    let current_count = u32::try_from(dates.count_in(&window)).unwrap_or(u32::MAX);

    let progress = GoalProgress {
        current_count,
        target_count: goal.target,
        completion_percentage: percentage(current_count, goal.target),
        remaining_count: goal.target.saturating_sub(current_count),
        is_completed: current_count >= goal.target,
        period_label: goal.period.label().to_string(),
        days_left: days_left(goal.period, &window, now),
    };
    tracing::trace!(period = %goal.period, ?window, ?progress, "computed goal progress");
    progress
}

/// `min(100, round(count / target * 100))`, rounding halves up.
fn percentage(count: u32, target: u32) -> u32 {
    round_percent(u64::from(count), u64::from(target)).min(100) as u32
}

/// `round(part / whole * 100)` with halves rounded up; 0 when `whole` is 0.
pub(crate) fn round_percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    (part * 200 + whole) / (whole * 2)
}

/// Ceiling of the days between `now` and the last instant of the window.
fn days_left(period: GoalPeriod, window: &PeriodWindow, now: NaiveDateTime) -> i64 {
    if period == GoalPeriod::Day {
        return 0;
    }
    let remaining_ms = (window.last_instant() - now).num_milliseconds();
    if remaining_ms <= 0 {
        return 0;
    }
    (remaining_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// One-line description of what is still needed.
pub fn goal_message(progress: &GoalProgress) -> String {
    if !progress.has_goal() {
        return "No goal set for this habit.".to_string();
    }

    if progress.is_completed {
        return format!(
            "Goal completed! You've reached your target of {} for {}.",
            progress.target_count,
            progress.period_label.to_lowercase()
        );
    }

    if progress.days_left == 0 {
        return format!("{} more needed today to reach your goal.", progress.remaining_count);
    }

    let unit = if progress.days_left == 1 { "day" } else { "days" };
    format!(
        "{} more needed over the next {} {} to reach your goal.",
        progress.remaining_count, progress.days_left, unit
    )
}
