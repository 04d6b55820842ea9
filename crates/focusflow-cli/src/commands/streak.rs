use clap::Subcommand;
use focusflow_core::Config;

use super::{open_dashboard, print_json, report, CliResult, Prompt};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Print the current and longest streak
    Show,
    /// Reset the streak to zero
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(action: StreakAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;

    match action {
        StreakAction::Show => print_json(app.streak())?,
        StreakAction::Reset { yes } => {
            if !app.reset_streak(&mut Prompt::new(yes))? {
                println!("Streak kept");
            }
        }
    }

    report(&mut app, config);
    Ok(())
}
