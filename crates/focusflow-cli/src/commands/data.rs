use clap::Subcommand;
use focusflow_core::Config;

use super::{open_dashboard, report, CliResult, Prompt};

#[derive(Subcommand)]
pub enum DataAction {
    /// Delete tasks, habits, notes, goals, streak, timer totals and achievements
    Wipe {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(action: DataAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;

    match action {
        DataAction::Wipe { yes } => {
            if !app.wipe_all(&mut Prompt::new(yes))? {
                println!("Nothing was deleted");
            }
        }
    }

    report(&mut app, config);
    Ok(())
}
