use clap::Args;
use habitrack_core::{CompletionDate, Config, HabitAnalyzer};

use super::{print_json, HabitInput};

#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    #[command(flatten)]
    input: HabitInput,

    /// Trailing window in days (defaults to analytics.consistency_window_days)
    #[arg(long)]
    window: Option<u32>,
}

pub fn run(args: AnalyticsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let today = CompletionDate::of(args.input.now(&config)?);
    let habits = args.input.habits()?;

    let window = args.window.unwrap_or(config.analytics.consistency_window_days);
    let report = HabitAnalyzer::with_window(window).analyze(&habits, today)?;
    print_json(&report)
}
