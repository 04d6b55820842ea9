use clap::Subcommand;
use focusflow_core::Config;
use serde::Serialize;

use super::{open_dashboard, print_json, report, App, CliResult, Prompt};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile and login state
    Show,
    /// Log in under a display name
    Login {
        /// Display name
        name: String,
    },
    /// Log out; the profile and data are kept
    Logout {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileView {
    name: Option<String>,
    plan: Option<String>,
    initials: Option<String>,
    logged_in: bool,
}

pub fn run(action: ProfileAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;
    let result = dispatch(&mut app, action);
    report(&mut app, config);
    result
}

fn dispatch(app: &mut App, action: ProfileAction) -> CliResult {
    match action {
        ProfileAction::Show => {
            let profile = app.profile()?;
            let view = ProfileView {
                initials: profile.as_ref().map(|p| p.initials()),
                name: profile.as_ref().map(|p| p.name.clone()),
                plan: profile.map(|p| p.plan),
                logged_in: app.is_logged_in()?,
            };
            print_json(&view)?;
        }
        ProfileAction::Login { name } => {
            let profile = app.login(&name)?;
            println!("Logged in as {} ({})", profile.name, profile.initials());
        }
        ProfileAction::Logout { yes } => {
            if app.logout(&mut Prompt::new(yes))? {
                println!("Logged out");
            }
        }
    }
    Ok(())
}
