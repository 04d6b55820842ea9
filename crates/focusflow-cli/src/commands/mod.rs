//! Subcommand handlers. Each module owns one command group and exposes a
//! clap `*Action` enum plus a `run` entry point.

pub mod achievements;
pub mod calendar;
pub mod config;
pub mod data;
pub mod goal;
pub mod habit;
pub mod insights;
pub mod note;
pub mod profile;
pub mod settings;
pub mod streak;
pub mod task;
pub mod timer;

use std::io::{BufRead, Write};

use focusflow_core::{Config, Confirm, Dashboard, Database, Event, Severity, SystemClock};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub type App = Dashboard<Database, SystemClock>;

/// Open the dashboard over the configured database.
pub fn open_dashboard(config: &Config) -> Result<App, Box<dyn std::error::Error>> {
    let db = Database::open_at(config.database_path()?)?;
    Ok(Dashboard::load(db, SystemClock)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print queued notifications to stderr and ring the bell on sound cues.
pub fn report(app: &mut App, config: &Config) {
    for event in app.drain_events() {
        match event {
            Event::Notification { message, severity } => {
                eprintln!("{} {message}", severity_tag(severity));
            }
            Event::SoundCue if config.timer.terminal_bell => {
                eprint!("\x07");
                let _ = std::io::stderr().flush();
            }
            _ => {}
        }
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[info]",
        Severity::Success => "[ok]",
        Severity::Warning => "[warn]",
        Severity::Error => "[error]",
    }
}

/// `--yes` or an interactive `[y/N]` prompt on stdin.
pub struct Prompt {
    pub assume_yes: bool,
}

impl Prompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for Prompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
