use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use focusflow_core::{CalendarCell, CalendarMonth, Config};

use super::{open_dashboard, print_json, App, CliResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Show the last-viewed month
    Show {
        /// Highlight this day (YYYY-MM-DD)
        #[arg(long)]
        selected: Option<NaiveDate>,
        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move to the next month and show it
    Next,
    /// Move to the previous month and show it
    Prev,
    /// List tasks on one day
    Day {
        /// Day as YYYY-MM-DD (default: today)
        date: Option<NaiveDate>,
    },
}

pub fn run(action: CalendarAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;

    match action {
        CalendarAction::Show { selected, json } => {
            let month = app.calendar_month()?;
            let cells = app.calendar_grid(selected)?;
            if json {
                print_json(&cells)?;
            } else {
                print_month(&month, &cells);
            }
        }
        CalendarAction::Next => {
            let month = app.next_month()?;
            show(&app, &month)?;
        }
        CalendarAction::Prev => {
            let month = app.prev_month()?;
            show(&app, &month)?;
        }
        CalendarAction::Day { date } => print_json(&app.tasks_on(date))?,
    }
    Ok(())
}

fn show(app: &App, month: &CalendarMonth) -> CliResult {
    let cells = app.calendar_grid(None)?;
    print_month(month, &cells);
    Ok(())
}

/// Text grid. Today is bracketed, days with tasks are starred, days from
/// adjacent months are left blank.
fn print_month(month: &CalendarMonth, cells: &[CalendarCell]) {
    println!("{:^35}", month.label());
    println!("  Su   Mo   Tu   We   Th   Fr   Sa");
    for week in cells.chunks(7) {
        let line: String = week.iter().map(render_cell).collect();
        println!("{}", line.trim_end());
    }
}

fn render_cell(cell: &CalendarCell) -> String {
    if !cell.in_month {
        return " ".repeat(5);
    }
    let day = cell.date.day();
    let mark = if cell.task_count > 0 { '*' } else { ' ' };
    if cell.is_today || cell.is_selected {
        format!("[{day:>2}]{mark}")
    } else {
        format!(" {day:>2} {mark}")
    }
}
