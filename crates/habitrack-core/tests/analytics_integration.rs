//! Integration tests for dashboard aggregates.
//!
//! Tests the analyzer, streak summary and calendar month over one exported
//! habit document.

use chrono::NaiveDateTime;
use habitrack_core::{
    CalendarMonth, CompletionDate, HabitAnalyzer, HabitRecord, StreakSummary, ValidationError,
    WeekStart,
};

const HABITS: &str = r#"[
    {
        "id": "a",
        "title": "Stretch",
        "frequency": "daily",
        "category": "Health",
        "completedDates": ["2024-03-29", "2024-03-30T07:15:00", "2024-03-31"]
    },
    {
        "id": "b",
        "title": "Journal",
        "frequency": "daily",
        "completions": {"2024-02-01": true, "2024-03-31": true, "2024-03-15": false}
    },
    {
        "id": "c",
        "title": "Old habit",
        "frequency": "daily",
        "category": "Health",
        "archived": true,
        "completedDates": ["2024-03-31"]
    }
]"#;

fn habits() -> Vec<HabitRecord> {
    serde_json::from_str(HABITS).unwrap()
}

fn today() -> CompletionDate {
    "2024-03-31".parse().unwrap()
}

#[test]
fn test_analytics_report() {
    let report = HabitAnalyzer::new().analyze(&habits(), today()).unwrap();

    assert_eq!(report.total_habits, 3);
    assert_eq!(report.active_habits, 2);
    assert_eq!(report.window_days, 30);
    assert_eq!(report.recent_completions, 4);
    // 4 of 60 possible
    assert_eq!(report.completion_rate, 7);

    let best = report.most_consistent_habit.unwrap();
    assert_eq!(best.id, "a");
    assert_eq!(best.rate, 10);

    assert_eq!(report.category_breakdown.get("Health"), Some(&1));
    assert_eq!(report.category_breakdown.get("Uncategorized"), Some(&1));

    let sunday = &report.weekday_completion[0];
    assert_eq!(sunday.weekday, "Sunday");
    assert_eq!(sunday.completions, 2);
    let thursday = &report.weekday_completion[4];
    assert_eq!(thursday.weekday, "Thursday");
    assert_eq!(thursday.completions, 1);
}

#[test]
fn test_analytics_respects_window() {
    let report = HabitAnalyzer::with_window(60).analyze(&habits(), today()).unwrap();
    assert_eq!(report.recent_completions, 5);
    assert_eq!(report.window_days, 60);
}

#[test]
fn test_streak_summary() {
    let now = NaiveDateTime::parse_from_str("2024-03-31T10:00", "%Y-%m-%dT%H:%M").unwrap();
    let summary = StreakSummary::compute(&habits(), now, WeekStart::Sunday).unwrap();

    assert_eq!(summary.total_habits, 3);
    assert_eq!(summary.archived_habits, 1);
    let leader = summary.longest_current.unwrap();
    assert_eq!(leader.id, "a");
    assert_eq!(leader.streak, 3);
    assert_eq!(summary.completed_today, 2);
    assert_eq!(summary.today_rate, 100);
}

#[test]
fn test_calendar_view_for_month() {
    let month = CalendarMonth::containing(today(), WeekStart::Sunday);
    let view = month.view(&habits(), today());

    assert_eq!(view.title, "March 2024");
    assert_eq!(view.weekday_labels[0], "Sun");
    // 2024-03-01 is a Friday
    assert_eq!(view.grid.iter().take_while(|c| c.is_none()).count(), 5);
    assert_eq!(view.grid.len(), 36);
    assert_eq!(view.today, Some(31));
    assert_eq!(view.completions.get(&31), Some(&vec!["a".to_string(), "b".to_string()]));
    assert_eq!(view.completions.get(&29), Some(&vec!["a".to_string()]));
    assert!(view.completions.get(&15).is_none());

    let feb = month.previous().view(&habits(), today());
    assert_eq!(feb.today, None);
    assert_eq!(feb.completions.get(&1), Some(&vec!["b".to_string()]));
}

#[test]
fn test_calendar_monday_start_and_rows() {
    let month = CalendarMonth::new(2024, 3, WeekStart::Monday).unwrap();
    assert_eq!(month.leading_blanks(), 4);
    let rows = month.rows();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0][4], Some(1));
    assert_eq!(rows[4][6], Some(31));
}

#[test]
fn test_calendar_rejects_invalid_month() {
    let err = CalendarMonth::new(2024, 13, WeekStart::Sunday).unwrap_err();
    assert_eq!(err, ValidationError::InvalidMonth { year: 2024, month: 13 });
}

#[test]
fn test_calendar_skips_unreadable_completion() {
    let mut habits = habits();
    habits[0].completed_dates = Some(vec!["garbage".into(), "2024-03-02".into()]);
    let view = CalendarMonth::containing(today(), WeekStart::Sunday).view(&habits, today());
    assert_eq!(view.completions.get(&2), Some(&vec!["a".to_string()]));
}
