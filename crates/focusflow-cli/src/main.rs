use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use focusflow_core::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusflow", version, about = "FocusFlow productivity dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Daily habits
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Daily and weekly goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Activity streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Achievement badges
    Achievements {
        #[command(subcommand)]
        action: commands::achievements::AchievementsAction,
    },
    /// Productivity insights
    Insights {
        #[command(subcommand)]
        action: commands::insights::InsightsAction,
    },
    /// Month calendar of tasks
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// User preferences stored with your data
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// User profile and login state
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Data management
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Install the stderr log subscriber. `FOCUSFLOW_LOG` wins over the
/// configured filter.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("FOCUSFLOW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action, &config),
        Commands::Timer { action } => commands::timer::run(action, &config),
        Commands::Habit { action } => commands::habit::run(action, &config),
        Commands::Goal { action } => commands::goal::run(action, &config),
        Commands::Note { action } => commands::note::run(action, &config),
        Commands::Streak { action } => commands::streak::run(action, &config),
        Commands::Achievements { action } => commands::achievements::run(action, &config),
        Commands::Insights { action } => commands::insights::run(action, &config),
        Commands::Calendar { action } => commands::calendar::run(action, &config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Profile { action } => commands::profile::run(action, &config),
        Commands::Data { action } => commands::data::run(action, &config),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "focusflow", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
