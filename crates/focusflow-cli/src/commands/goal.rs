use clap::Subcommand;
use focusflow_core::{Config, GoalKind, GoalPeriod};

use super::{open_dashboard, print_json, report, App, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a daily or weekly goal
    Add {
        /// daily or weekly
        period: GoalPeriod,
        /// Goal title
        title: String,
        /// Target count (default: 1)
        #[arg(long, short, allow_negative_numbers = true)]
        target: Option<i64>,
        /// tasks or pomodoro (default: inferred from the title)
        #[arg(long, short)]
        kind: Option<GoalKind>,
    },
    /// List goals with progress
    List {
        /// Only daily or weekly goals
        period: Option<GoalPeriod>,
    },
    /// Remove a goal
    Remove {
        /// daily or weekly
        period: GoalPeriod,
        /// Goal ID
        id: String,
    },
}

pub fn run(action: GoalAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;
    let result = dispatch(&mut app, action);
    report(&mut app, config);
    result
}

fn dispatch(app: &mut App, action: GoalAction) -> CliResult {
    match action {
        GoalAction::Add {
            period,
            title,
            target,
            kind,
        } => {
            let goal = app.add_goal(period, &title, target, kind)?;
            println!("Goal added: {}", goal.id);
        }
        GoalAction::List { period } => {
            let periods = match period {
                Some(p) => vec![p],
                None => vec![GoalPeriod::Daily, GoalPeriod::Weekly],
            };
            let progress: Vec<_> = periods
                .into_iter()
                .flat_map(|p| app.goal_progress(p))
                .collect();
            print_json(&progress)?;
        }
        GoalAction::Remove { period, id } => {
            if app.remove_goal(period, &id)? {
                println!("Goal removed: {id}");
            } else {
                println!("Goal not found: {id}");
            }
        }
    }
    Ok(())
}
