use clap::Subcommand;
use focusflow_core::Config;

use super::{open_dashboard, print_json, CliResult};

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// List every badge and whether it is unlocked
    List,
}

pub fn run(action: AchievementsAction, config: &Config) -> CliResult {
    let app = open_dashboard(config)?;
    match action {
        AchievementsAction::List => print_json(&app.achievement_statuses())?,
    }
    Ok(())
}
