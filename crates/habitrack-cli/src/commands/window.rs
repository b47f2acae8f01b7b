use clap::Args;
use habitrack_core::date::format_date;
use habitrack_core::{resolve_window, CompletionDate, Config, GoalPeriod};
use serde::Serialize;

use super::{print_json, resolve_now};

#[derive(Args, Debug)]
pub struct WindowArgs {
    /// day, week or month
    period: GoalPeriod,

    /// Resolve around this time instead of the system clock
    #[arg(long)]
    now: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowOutput {
    period: GoalPeriod,
    label: &'static str,
    start: CompletionDate,
    end: CompletionDate,
    /// `start` in the configured date format
    start_label: String,
    end_label: String,
    days: Vec<CompletionDate>,
}

pub fn run(args: WindowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let now = resolve_now(args.now.as_deref(), &config)?;

    let window = resolve_window(args.period, now, config.week_start());
    let date_format = config.preferences.date_format;
    print_json(&WindowOutput {
        period: args.period,
        label: args.period.label(),
        start: window.start,
        end: window.end,
        start_label: format_date(window.start, date_format),
        end_label: format_date(window.end, date_format),
        days: window.days().collect(),
    })
}
