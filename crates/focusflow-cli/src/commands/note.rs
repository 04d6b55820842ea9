use clap::Subcommand;
use focusflow_core::Config;

use super::{open_dashboard, print_json, report, App, CliResult, Prompt};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Write a new note
    Add {
        /// Note title (default: Untitled)
        #[arg(long, short, default_value = "")]
        title: String,
        /// Note body
        #[arg(long, short, default_value = "")]
        content: String,
    },
    /// List notes, newest first
    List,
    /// Print one note
    Show {
        /// Note ID
        id: String,
    },
    /// Change a note's title or body
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(long, short)]
        title: Option<String>,
        /// New body
        #[arg(long, short)]
        content: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(action: NoteAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;
    let result = dispatch(&mut app, action);
    report(&mut app, config);
    result
}

fn dispatch(app: &mut App, action: NoteAction) -> CliResult {
    match action {
        NoteAction::Add { title, content } => {
            if let Some(note) = app.save_note(None, &title, &content)? {
                println!("Note added: {}", note.id);
            }
        }
        NoteAction::List => print_json(&app.list_notes())?,
        NoteAction::Show { id } => match app.find_note(&id) {
            Some(note) => print_json(note)?,
            None => println!("Note not found: {id}"),
        },
        NoteAction::Edit { id, title, content } => {
            let Some(existing) = app.find_note(&id).cloned() else {
                println!("Note not found: {id}");
                return Ok(());
            };
            let title = title.unwrap_or(existing.title);
            let content = content.unwrap_or(existing.content);
            if let Some(note) = app.save_note(Some(&id), &title, &content)? {
                print_json(&note)?;
            }
        }
        NoteAction::Delete { id, yes } => {
            if app.delete_note(&id, &mut Prompt::new(yes))? {
                println!("Note deleted: {id}");
            } else {
                println!("Note not deleted: {id}");
            }
        }
    }
    Ok(())
}
