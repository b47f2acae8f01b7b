//! # Habitrack Core Library
//!
//! This library provides the temporal analytics behind the Habitrack habit
//! tracker. Persistence and authentication live in an external document store;
//! this crate only turns a habit's completion days into derived values. A
//! standalone CLI binary exposes every computation over exported habit records.
//!
//! ## Architecture
//!
//! - **Dates**: canonical calendar days with no time-of-day or timezone
//! - **Periods**: inclusive day/week/month windows around a caller-supplied `now`
//! - **Streaks**: current and longest runs of consecutive days or week buckets
//! - **Goals**: completions in the current window against a target
//! - **Calendar / Stats**: month grids and dashboard aggregates
//!
//! Nothing in the core reads the system clock; `now` is always a parameter.
//!
//! ## Key Components
//!
//! - [`CompletionSet`]: deduplicated completion days
//! - [`compute_streaks`]: current and longest streak
//! - [`goal_progress`]: progress towards a goal in the current period
//! - [`HabitRecord`]: habit document as exported by the persistence layer
//! - [`Config`]: Application configuration management

pub mod calendar;
pub mod completion;
pub mod date;
pub mod error;
pub mod goal;
pub mod habit;
pub mod period;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod templates;

pub use calendar::{CalendarMonth, CalendarView};
pub use completion::CompletionSet;
pub use date::{normalize, CompletionDate, DateFormat, IntoCompletionDate, WeekStart};
pub use error::{ConfigError, CoreError, DateError, ValidationError};
pub use goal::{goal_message, goal_progress, GoalConfig, GoalProgress};
pub use habit::{HabitRecord, HabitSnapshot, NewHabit};
pub use period::{resolve_window, week_dates, GoalPeriod, PeriodWindow};
pub use stats::{HabitAnalyticsReport, HabitAnalyzer, StreakSummary};
pub use storage::{Config, UtcOffset};
pub use streak::{compute_streaks, current_streak, longest_streak, Frequency, StreakResult};
pub use templates::{HabitTemplate, HABIT_TEMPLATES};
