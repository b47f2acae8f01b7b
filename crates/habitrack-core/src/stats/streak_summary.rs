//! Streak leaders and today's completion ratio.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::date::{CompletionDate, WeekStart};
use crate::error::DateError;
use crate::goal::round_percent;
use crate::habit::HabitRecord;
use crate::streak::compute_streaks;

/// A habit holding a streak record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakLeader {
    pub id: String,
    pub title: String,
    pub streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub total_habits: u32,
    pub active_habits: u32,
    pub archived_habits: u32,
    /// Active habit with the longest running streak, if any streak is running
    pub longest_current: Option<StreakLeader>,
    /// Habit (archived included) with the longest streak ever
    pub longest_overall: Option<StreakLeader>,
    pub completed_today: u32,
    /// `completed_today / active_habits`, rounded percentage
    pub today_rate: u32,
}

impl StreakSummary {
    /// # Errors
    ///
    /// Returns a [`DateError`] when any stored completion cannot be normalised.
    pub fn compute(habits: &[HabitRecord], now: NaiveDateTime, week_start: WeekStart) -> Result<Self, DateError> {
        let today = CompletionDate::of(now);
        let mut summary = StreakSummary {
            total_habits: habits.len() as u32,
            ..Default::default()
        };

        for habit in habits {
            let dates = habit.completion_set()?;
            let streaks = compute_streaks(&dates, habit.frequency, now, week_start);

            take_if_longer(&mut summary.longest_overall, habit, streaks.longest);

            if !habit.is_active() {
                summary.archived_habits += 1;
                continue;
            }
            summary.active_habits += 1;
            take_if_longer(&mut summary.longest_current, habit, streaks.current);
            if dates.contains(today) {
                summary.completed_today += 1;
            }
        }

        summary.today_rate =
            round_percent(u64::from(summary.completed_today), u64::from(summary.active_habits)) as u32;
        Ok(summary)
    }
}

/// Strictly longer streaks replace the leader; zero never leads.
fn take_if_longer(slot: &mut Option<StreakLeader>, habit: &HabitRecord, streak: u32) {
    let best = slot.as_ref().map_or(0, |leader| leader.streak);
    if streak > best {
        *slot = Some(StreakLeader {
            id: habit.id.clone(),
            title: habit.title.clone(),
            streak,
        });
    }
}
