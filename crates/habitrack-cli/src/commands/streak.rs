use clap::Args;
use habitrack_core::date::{format_date, relative_label};
use habitrack_core::{compute_streaks, CompletionDate, Config, Frequency, StreakResult};
use serde::Serialize;

use super::{print_json, select_habits, HabitInput};

#[derive(Args, Debug)]
pub struct StreakArgs {
    #[command(flatten)]
    input: HabitInput,

    /// Only this habit id
    #[arg(long)]
    habit: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitStreak {
    id: String,
    title: String,
    frequency: Frequency,
    #[serde(flatten)]
    streaks: StreakResult,
    /// Latest completion in the configured date format
    #[serde(skip_serializing_if = "Option::is_none")]
    last_completed: Option<String>,
    /// e.g. "Yesterday", "3 days ago"
    #[serde(skip_serializing_if = "Option::is_none")]
    last_completed_relative: Option<String>,
}

pub fn run(args: StreakArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let now = args.input.now(&config)?;
    let today = CompletionDate::of(now);
    let habits = select_habits(args.input.habits()?, args.habit.as_deref())?;

    let mut rows = Vec::with_capacity(habits.len());
    for habit in habits {
        let dates = habit.completion_set()?;
        let streaks = compute_streaks(&dates, habit.frequency, now, config.week_start());
        let latest = dates.latest();
        rows.push(HabitStreak {
            id: habit.id,
            title: habit.title,
            frequency: habit.frequency,
            streaks,
            last_completed: latest.map(|d| format_date(d, config.preferences.date_format)),
            last_completed_relative: latest.map(|d| relative_label(d, today)),
        });
    }
    print_json(&rows)
}
