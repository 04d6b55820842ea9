use clap::Subcommand;
use focusflow_core::{Config, Settings};

use super::{open_dashboard, print_json, report, App, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a setting
    Get {
        /// Setting key (e.g. "pomodoroWork", "theme")
        key: String,
    },
    /// Change a setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Restore default settings
    Reset,
}

pub fn run(action: SettingsAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;
    let result = dispatch(&mut app, action);
    report(&mut app, config);
    result
}

fn dispatch(app: &mut App, action: SettingsAction) -> CliResult {
    match action {
        SettingsAction::Get { key } => match app.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => {
                let known = Settings::keys().join(", ");
                return Err(format!("unknown setting: {key} (expected one of {known})").into());
            }
        },
        SettingsAction::Set { key, value } => {
            app.set_setting(&key, &value)?;
            println!("ok");
        }
        SettingsAction::List => print_json(app.settings())?,
        SettingsAction::Reset => app.reset_settings()?,
    }
    Ok(())
}
