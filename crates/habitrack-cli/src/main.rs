use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitrack", version, about = "Habitrack CLI")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current and longest streaks
    Streak(commands::streak::StreakArgs),
    /// Goal progress for the current period
    Goal(commands::goal::GoalArgs),
    /// Month calendar with completions per day
    Calendar(commands::calendar::CalendarArgs),
    /// Completion analytics across habits
    Analytics(commands::analytics::AnalyticsArgs),
    /// Streak leaders and today's completions
    Summary(commands::summary::SummaryArgs),
    /// Resolve a day, week or month window
    Window(commands::window::WindowArgs),
    /// Built-in habit templates
    Template {
        #[command(subcommand)]
        action: commands::template::TemplateAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Streak(args) => commands::streak::run(args),
        Commands::Goal(args) => commands::goal::run(args),
        Commands::Calendar(args) => commands::calendar::run(args),
        Commands::Analytics(args) => commands::analytics::run(args),
        Commands::Summary(args) => commands::summary::run(args),
        Commands::Window(args) => commands::window::run(args),
        Commands::Template { action } => commands::template::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
