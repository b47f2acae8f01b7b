use clap::Args;
use habitrack_core::{goal_message, Config, GoalProgress};
use serde::Serialize;

use super::{print_json, select_habits, HabitInput};

#[derive(Args, Debug)]
pub struct GoalArgs {
    #[command(flatten)]
    input: HabitInput,

    /// Only this habit id
    #[arg(long)]
    habit: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitGoal {
    id: String,
    title: String,
    #[serde(flatten)]
    progress: GoalProgress,
    message: String,
}

pub fn run(args: GoalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let now = args.input.now(&config)?;
    let habits = select_habits(args.input.habits()?, args.habit.as_deref())?;

    let mut rows = Vec::with_capacity(habits.len());
    for habit in habits {
        let progress = habit.goal_progress(now, config.week_start())?;
        rows.push(HabitGoal {
            message: goal_message(&progress),
            id: habit.id,
            title: habit.title,
            progress,
        });
    }
    print_json(&rows)
}
