//! Dashboard analytics across all habits
//!
//! This module aggregates completion data over a trailing window:
//! - **Completion rate**: completions in the window over the possible total
//! - **Most consistent habit**: the active habit with the most recent completions
//! - **Category breakdown**: active habits per category
//! - **Weekday pattern**: all-time completions per day of the week

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::date::CompletionDate;
use crate::error::DateError;
use crate::goal::round_percent;
use crate::habit::HabitRecord;
use crate::period::PeriodWindow;

/// Category used for habits without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// The active habit with the best recent completion rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistentHabit {
    pub id: String,
    pub title: String,
    /// Completions in the window as a rounded percentage of its length
    pub rate: u32,
}

/// Completions falling on one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: String,
    pub completions: u32,
}

/// Complete analytics report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitAnalyticsReport {
    pub total_habits: u32,
    pub active_habits: u32,
    /// Length of the trailing window in days
    pub window_days: u32,
    /// Completions by active habits within the trailing window ending today
    pub recent_completions: u32,
    /// Rounded percentage of `active_habits * window_days`
    pub completion_rate: u32,
    pub most_consistent_habit: Option<ConsistentHabit>,
    pub category_breakdown: BTreeMap<String, u32>,
    /// Sunday first
    pub weekday_completion: Vec<WeekdayCount>,
}

/// Analyzer for dashboard statistics
#[derive(Debug, Clone)]
pub struct HabitAnalyzer {
    /// Trailing window used for rates
    pub window_days: u32,
}

impl Default for HabitAnalyzer {
    fn default() -> Self {
        Self { window_days: 30 }
    }
}

impl HabitAnalyzer {
    /// Create a new analyzer with the default 30-day window
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new analyzer with a custom window
    pub fn with_window(window_days: u32) -> Self {
        Self { window_days }
    }

    /// The trailing `window_days` days ending on `today`, both inclusive.
    ///
    /// A zero-length window comes back inverted and counts nothing.
    pub fn window(&self, today: CompletionDate) -> PeriodWindow {
        let start = today
            .offset_days(1 - i64::from(self.window_days))
            .unwrap_or(today);
        PeriodWindow { start, end: today }
    }

    /// Analyze `habits` as of `today`
    ///
    /// # Errors
    ///
    /// Returns a [`DateError`] when any stored completion cannot be normalised.
    pub fn analyze(&self, habits: &[HabitRecord], today: CompletionDate) -> Result<HabitAnalyticsReport, DateError> {
        let window = self.window(today);

        let mut report = HabitAnalyticsReport {
            total_habits: habits.len() as u32,
            window_days: self.window_days,
            ..Default::default()
        };
        let mut best: Option<(usize, &HabitRecord)> = None;
        let mut weekday_counts = [0u32; 7];

        for habit in habits.iter().filter(|h| h.is_active()) {
            let dates = habit.completion_set()?;
            report.active_habits += 1;

            let recent = dates.count_in(&window);
            report.recent_completions += recent as u32;
            if best.map_or(true, |(count, _)| recent > count) {
                best = Some((recent, habit));
            }

            let category = habit
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(UNCATEGORIZED);
            *report.category_breakdown.entry(category.to_string()).or_default() += 1;

            for date in dates.iter() {
                weekday_counts[date.weekday().num_days_from_sunday() as usize] += 1;
            }
        }

        let window_days = u64::from(self.window_days);
        report.completion_rate = round_percent(
            u64::from(report.recent_completions),
            u64::from(report.active_habits) * window_days,
        ) as u32;
        report.most_consistent_habit = best.map(|(count, habit)| ConsistentHabit {
            id: habit.id.clone(),
            title: habit.title.clone(),
            rate: round_percent(count as u64, window_days) as u32,
        });
        report.weekday_completion = WEEKDAYS
            .iter()
            .zip(weekday_counts)
            .map(|(day, completions)| WeekdayCount {
                weekday: weekday_name(*day).to_string(),
                completions,
            })
            .collect();

        tracing::debug!(
            active = report.active_habits,
            recent = report.recent_completions,
            rate = report.completion_rate,
            "analyzed habits"
        );
        Ok(report)
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streak::Frequency;

    fn habit(id: &str, category: Option<&str>, days: &[&str], archived: bool) -> HabitRecord {
        HabitRecord {
            id: id.into(),
            title: format!("Habit {id}"),
            description: None,
            frequency: Frequency::Daily,
            completions: None,
            completed_dates: Some(days.iter().map(|s| s.to_string()).collect()),
            category: category.map(String::from),
            tags: Vec::new(),
            archived,
            goal_target: None,
            goal_period: None,
            created_at: None,
        }
    }

    fn today() -> CompletionDate {
        "2024-03-31".parse().unwrap()
    }

    #[test]
    fn empty_input_gives_zeroed_report() {
        let report = HabitAnalyzer::new().analyze(&[], today()).unwrap();
        assert_eq!(report.total_habits, 0);
        assert_eq!(report.completion_rate, 0);
        assert!(report.most_consistent_habit.is_none());
        assert_eq!(report.weekday_completion.len(), 7);
        assert_eq!(report.weekday_completion[0].weekday, "Sunday");
    }

    #[test]
    fn completion_rate_over_active_habits() {
        let habits = vec![
            habit("a", Some("Health"), &["2024-03-30", "2024-03-31", "2024-03-29"], false),
            habit("b", None, &["2024-03-31", "2024-01-01"], false),
            habit("c", Some("Health"), &["2024-03-31"], true),
        ];
        let report = HabitAnalyzer::new().analyze(&habits, today()).unwrap();
        assert_eq!(report.total_habits, 3);
        assert_eq!(report.active_habits, 2);
        assert_eq!(report.recent_completions, 4);
        // 4 / 60 = 6.67%
        assert_eq!(report.completion_rate, 7);
    }

    #[test]
    fn most_consistent_prefers_first_on_ties() {
        let habits = vec![
            habit("a", None, &["2024-03-30", "2024-03-31"], false),
            habit("b", None, &["2024-03-29", "2024-03-31"], false),
            habit("c", None, &["2024-03-31"], false),
        ];
        let best = HabitAnalyzer::new()
            .analyze(&habits, today())
            .unwrap()
            .most_consistent_habit
            .unwrap();
        assert_eq!(best.id, "a");
        assert_eq!(best.rate, 7);
    }

    #[test]
    fn category_breakdown_counts_active_only() {
        let habits = vec![
            habit("a", Some("Health"), &[], false),
            habit("b", Some("Health"), &[], false),
            habit("c", None, &[], false),
            habit("d", Some("Learning"), &[], true),
        ];
        let report = HabitAnalyzer::new().analyze(&habits, today()).unwrap();
        assert_eq!(report.category_breakdown.get("Health"), Some(&2));
        assert_eq!(report.category_breakdown.get(UNCATEGORIZED), Some(&1));
        assert!(report.category_breakdown.get("Learning").is_none());
    }

    #[test]
    fn weekday_pattern_counts_all_time() {
        // 2024-03-31 Sunday, 2024-03-25 Monday, 2023-01-01 Sunday
        let habits = vec![habit("a", None, &["2024-03-31", "2024-03-25", "2023-01-01"], false)];
        let report = HabitAnalyzer::new().analyze(&habits, today()).unwrap();
        assert_eq!(report.weekday_completion[0].completions, 2);
        assert_eq!(report.weekday_completion[1].completions, 1);
    }

    #[test]
    fn custom_window() {
        // 2024-03-24 falls just outside the seven days ending 2024-03-31
        let habits = vec![habit("a", None, &["2024-03-31", "2024-03-25", "2024-03-24"], false)];
        let report = HabitAnalyzer::with_window(7).analyze(&habits, today()).unwrap();
        assert_eq!(report.recent_completions, 2);
        // 2 / 7 = 28.57%
        assert_eq!(report.completion_rate, 29);
    }

    #[test]
    fn every_day_in_window_is_full_rate() {
        let days: Vec<String> = (1..=31).map(|d| format!("2024-03-{d:02}")).collect();
        let days: Vec<&str> = days.iter().map(String::as_str).collect();
        let habits = vec![habit("a", None, &days, false)];
        let report = HabitAnalyzer::new().analyze(&habits, today()).unwrap();
        assert_eq!(report.recent_completions, 30);
        assert_eq!(report.completion_rate, 100);
        assert_eq!(report.most_consistent_habit.unwrap().rate, 100);
    }

    #[test]
    fn future_completions_are_not_recent() {
        let habits = vec![habit("a", None, &["2024-03-31", "2024-04-01", "2024-04-15"], false)];
        let report = HabitAnalyzer::with_window(1).analyze(&habits, today()).unwrap();
        assert_eq!(report.recent_completions, 1);
        assert_eq!(report.completion_rate, 100);
    }

    #[test]
    fn zero_window_counts_nothing() {
        let habits = vec![habit("a", None, &["2024-03-31"], false)];
        let report = HabitAnalyzer::with_window(0).analyze(&habits, today()).unwrap();
        assert_eq!(report.recent_completions, 0);
        assert_eq!(report.completion_rate, 0);
    }

    #[test]
    fn malformed_completion_is_reported() {
        let habits = vec![habit("a", None, &["31/03/2024"], false)];
        assert!(HabitAnalyzer::new().analyze(&habits, today()).is_err());
    }
}
