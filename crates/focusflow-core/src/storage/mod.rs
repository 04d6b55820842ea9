mod config;
pub mod database;
pub mod json_path;
mod memory;
mod store;

pub use config::Config;
pub use database::Database;
pub use memory::MemoryStore;
pub use store::{Document, JsonStore, KeyValueStore, StoreKey};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the FocusFlow data directory, creating it if needed.
///
/// `FOCUSFLOW_HOME` overrides the location outright. Otherwise the directory
/// is `~/.config/focusflow[-dev]/`, with the `-dev` suffix when
/// `FOCUSFLOW_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FOCUSFLOW_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSFLOW_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusflow-dev")
            } else {
                base_dir.join("focusflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
