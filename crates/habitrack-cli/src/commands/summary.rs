use clap::Args;
use habitrack_core::{Config, StreakSummary};

use super::{print_json, HabitInput};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    input: HabitInput,
}

pub fn run(args: SummaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let now = args.input.now(&config)?;
    let habits = args.input.habits()?;

    let summary = StreakSummary::compute(&habits, now, config.week_start())?;
    print_json(&summary)
}
