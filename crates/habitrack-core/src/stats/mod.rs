//! Statistics module for Habitrack
//!
//! This module provides dashboard analytics across habits, including the
//! trailing-window completion rate, category and weekday breakdowns, and
//! streak leaders.

mod habit_analytics;
mod streak_summary;

pub use habit_analytics::{
    ConsistentHabit, HabitAnalyticsReport, HabitAnalyzer, WeekdayCount, UNCATEGORIZED,
};

pub use streak_summary::{StreakLeader, StreakSummary};
