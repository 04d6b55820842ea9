//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use focusflow_core::{Config, Priority, TaskDraft, TaskFilter, TaskPatch};

use super::{open_dashboard, print_json, report, App, CliResult, Prompt};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Category (default: personal)
        #[arg(long)]
        category: Option<String>,
        /// Priority: high, medium or low (default: medium)
        #[arg(long, short)]
        priority: Option<Priority>,
        /// Due date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List tasks, incomplete first and by priority
    List {
        /// today, upcoming, completed or all
        #[arg(long, short, default_value = "today")]
        filter: TaskFilter,
    },
    /// Edit a task
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New priority
        #[arg(long, short)]
        priority: Option<Priority>,
        /// New date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Mark a task completed, or reopen it
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(action: TaskAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;
    let result = dispatch(&mut app, action);
    report(&mut app, config);
    result
}

fn dispatch(app: &mut App, action: TaskAction) -> CliResult {
    match action {
        TaskAction::Add {
            title,
            category,
            priority,
            date,
        } => {
            let task = app.add_task(TaskDraft {
                title,
                category,
                priority,
                date,
            })?;
            println!("Task added: {}", task.id);
            print_json(&task)?;
        }
        TaskAction::List { filter } => print_json(&app.list_tasks(filter))?,
        TaskAction::Edit {
            id,
            title,
            category,
            priority,
            date,
        } => {
            let patch = TaskPatch {
                title,
                category,
                priority,
                date,
            };
            match app.edit_task(&id, patch)? {
                Some(task) => print_json(&task)?,
                None => println!("Task not found: {id}"),
            }
        }
        TaskAction::Toggle { id } => match app.toggle_task(&id)? {
            Some(true) => println!("Task completed: {id}"),
            Some(false) => println!("Task reopened: {id}"),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Delete { id, yes } => {
            if app.delete_task(&id, &mut Prompt::new(yes))? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not deleted: {id}");
            }
        }
    }
    Ok(())
}
