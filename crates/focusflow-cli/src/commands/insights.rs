use clap::Subcommand;
use focusflow_core::Config;

use super::{open_dashboard, print_json, CliResult};

#[derive(Subcommand)]
pub enum InsightsAction {
    /// Lifetime totals
    Summary,
    /// Completed tasks for each of the last seven days
    Week {
        /// Print JSON instead of a bar chart
        #[arg(long)]
        json: bool,
    },
    /// Today at a glance
    Dashboard,
}

pub fn run(action: InsightsAction, config: &Config) -> CliResult {
    let app = open_dashboard(config)?;

    match action {
        InsightsAction::Summary => print_json(&app.insight_summary())?,
        InsightsAction::Week { json } => {
            let chart = app.weekly_chart();
            if json {
                print_json(&chart)?;
            } else {
                for bar in &chart {
                    println!("{} {:>3} {}", bar.label, bar.completed, "#".repeat(bar.completed));
                }
            }
        }
        InsightsAction::Dashboard => print_json(&app.dashboard_summary())?,
    }
    Ok(())
}
