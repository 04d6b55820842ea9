use clap::Subcommand;
use focusflow_core::Config;
use serde::Serialize;

use super::{open_dashboard, print_json, report, App, CliResult, Prompt};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        /// Habit name
        name: String,
    },
    /// List habits with today's state
    List,
    /// Check or uncheck a habit for today
    Toggle {
        /// Habit ID
        id: String,
    },
    /// Set a habit's streak back to zero
    ResetStreak {
        /// Habit ID
        id: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitRow<'a> {
    id: &'a str,
    name: &'a str,
    streak: u32,
    done_today: bool,
}

pub fn run(action: HabitAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;
    let result = dispatch(&mut app, action);
    report(&mut app, config);
    result
}

fn dispatch(app: &mut App, action: HabitAction) -> CliResult {
    match action {
        HabitAction::Add { name } => {
            let habit = app.add_habit(&name)?;
            println!("Habit added: {}", habit.id);
        }
        HabitAction::List => {
            let today = app.today();
            let rows: Vec<HabitRow> = app
                .habits()
                .iter()
                .map(|h| HabitRow {
                    id: &h.id,
                    name: &h.name,
                    streak: h.streak,
                    done_today: h.is_done_on(today),
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Toggle { id } => match app.toggle_habit(&id)? {
            Some(true) => println!("Habit done today: {id}"),
            Some(false) => println!("Habit unchecked: {id}"),
            None => println!("Habit not found: {id}"),
        },
        HabitAction::ResetStreak { id } => {
            if app.reset_habit_streak(&id)? {
                println!("Habit streak reset: {id}");
            } else {
                println!("Habit not found: {id}");
            }
        }
        HabitAction::Delete { id, yes } => {
            if app.delete_habit(&id, &mut Prompt::new(yes))? {
                println!("Habit deleted: {id}");
            } else {
                println!("Habit not deleted: {id}");
            }
        }
    }
    Ok(())
}
