//! Habit records as supplied by the persistence layer.
//!
//! Field names follow the exported documents (camelCase). Completions arrive
//! either as a `day -> completed` map or as a plain list of days; the map wins
//! when both are present.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::completion::CompletionSet;
use crate::date::WeekStart;
use crate::error::DateError;
use crate::goal::{goal_message, goal_progress, GoalConfig, GoalProgress};
use crate::period::GoalPeriod;
use crate::streak::{compute_streaks, Frequency, StreakResult};

/// A stored habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completions: Option<HashMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_dates: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archived: bool,
    /// Signed so that bad stored values read as "no goal" instead of failing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_target: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_period: Option<GoalPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl HabitRecord {
    pub fn is_active(&self) -> bool {
        !self.archived
    }

    /// Raw completion day strings, before normalisation.
    pub fn completion_keys(&self) -> Vec<&str> {
        match (&self.completions, &self.completed_dates) {
            (Some(map), _) => map
                .iter()
                .filter(|(_, done)| **done)
                .map(|(day, _)| day.as_str())
                .collect(),
            (None, Some(list)) => list.iter().map(String::as_str).collect(),
            (None, None) => Vec::new(),
        }
    }

    /// Normalised completion days.
    ///
    /// # Errors
    ///
    /// Returns the first [`DateError`] among the stored days.
    pub fn completion_set(&self) -> Result<CompletionSet, DateError> {
        CompletionSet::try_from_inputs(self.completion_keys())
    }

    pub fn goal(&self) -> Option<GoalConfig> {
        GoalConfig::from_parts(self.goal_target, self.goal_period)
    }

    /// # Errors
    ///
    /// Returns a [`DateError`] when a stored day cannot be normalised.
    pub fn streaks(&self, now: NaiveDateTime, week_start: WeekStart) -> Result<StreakResult, DateError> {
        let dates = self.completion_set()?;
        Ok(compute_streaks(&dates, self.frequency, now, week_start))
    }

    /// # Errors
    ///
    /// Returns a [`DateError`] when a stored day cannot be normalised.
    pub fn goal_progress(&self, now: NaiveDateTime, week_start: WeekStart) -> Result<GoalProgress, DateError> {
        let dates = self.completion_set()?;
        Ok(goal_progress(&dates, self.goal_target, self.goal_period, now, week_start))
    }

    /// Streaks and goal progress in one pass over the completion set.
    ///
    /// # Errors
    ///
    /// Returns a [`DateError`] when a stored day cannot be normalised.
    pub fn snapshot(&self, now: NaiveDateTime, week_start: WeekStart) -> Result<HabitSnapshot, DateError> {
        let dates = self.completion_set()?;
        let streaks = compute_streaks(&dates, self.frequency, now, week_start);
        let goal = self.goal().map(|g| g.progress(&dates, now, week_start));
        let goal_message = goal.as_ref().map(goal_message);

        Ok(HabitSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            frequency: self.frequency,
            completions: dates.len(),
            streaks,
            goal,
            goal_message,
        })
    }
}

/// Derived values for one habit, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitSnapshot {
    pub id: String,
    pub title: String,
    pub frequency: Frequency,
    pub completions: usize,
    pub streaks: StreakResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_message: Option<String>,
}

/// Data for a habit that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_target: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_period: Option<GoalPeriod>,
}
