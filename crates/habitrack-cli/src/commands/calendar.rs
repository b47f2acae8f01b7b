use clap::Args;
use habitrack_core::date::format_date;
use habitrack_core::{CalendarMonth, CalendarView, CompletionDate, Config};
use serde::Serialize;

use super::{print_json, HabitInput};

#[derive(Args, Debug)]
pub struct CalendarArgs {
    #[command(flatten)]
    input: HabitInput,

    /// Year to show (defaults to the current one)
    #[arg(long, requires = "month")]
    year: Option<i32>,

    /// Month to show, 1-12
    #[arg(long, requires = "year")]
    month: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarOutput {
    #[serde(flatten)]
    view: CalendarView,
    /// Today in the configured date format
    today_label: String,
}

pub fn run(args: CalendarArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let today = CompletionDate::of(args.input.now(&config)?);
    let habits = args.input.habits()?;

    let month = match (args.year, args.month) {
        (Some(year), Some(month)) => CalendarMonth::new(year, month, config.week_start())?,
        _ => CalendarMonth::containing(today, config.week_start()),
    };
    print_json(&CalendarOutput {
        view: month.view(&habits, today),
        today_label: format_date(today, config.preferences.date_format),
    })
}
