//! User preferences persisted in the store.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, ValidationError};
use crate::storage::json_path;
use crate::storage::{Document, StoreKey};
use crate::timer::TimerDurations;

/// Longest accepted phase: one day.
pub const MAX_PHASE_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    /// Minutes.
    #[serde(default = "default_work")]
    pub pomodoro_work: u32,
    #[serde(default = "default_break")]
    pub pomodoro_break: u32,
    #[serde(default = "default_long_break")]
    pub pomodoro_long_break: u32,
    #[serde(default)]
    pub auto_start_break: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_accent_color() -> String {
    "#6366f1".to_string()
}

fn default_work() -> u32 {
    25
}

fn default_break() -> u32 {
    5
}

fn default_long_break() -> u32 {
    15
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            accent_color: default_accent_color(),
            pomodoro_work: default_work(),
            pomodoro_break: default_break(),
            pomodoro_long_break: default_long_break(),
            auto_start_break: false,
            sound_enabled: true,
        }
    }
}

impl Document for Settings {
    const KEY: StoreKey = StoreKey::Settings;
}

impl Settings {
    pub fn durations(&self) -> TimerDurations {
        TimerDurations::from_minutes(
            self.pomodoro_work,
            self.pomodoro_break,
            self.pomodoro_long_break,
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, minutes) in [
            ("pomodoroWork", self.pomodoro_work),
            ("pomodoroBreak", self.pomodoro_break),
            ("pomodoroLongBreak", self.pomodoro_long_break),
        ] {
            if !(1..=MAX_PHASE_MINUTES).contains(&minutes) {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: format!("must be between 1 and {MAX_PHASE_MINUTES} minutes"),
                });
            }
        }
        validate_accent_color(&self.accent_color)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        json_path::get_by_path(&json, key).map(json_path::display_value)
    }

    /// Returns a copy with `key` replaced; `self` is left untouched.
    pub fn with(&self, key: &str, value: &str) -> Result<Self> {
        let mut json = serde_json::to_value(self)?;
        json_path::set_by_path(&mut json, key, value)?;
        serde_json::from_value(json).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    pub fn keys() -> [&'static str; 7] {
        [
            "theme",
            "accentColor",
            "pomodoroWork",
            "pomodoroBreak",
            "pomodoroLongBreak",
            "autoStartBreak",
            "soundEnabled",
        ]
    }
}

fn validate_accent_color(color: &str) -> Result<(), ValidationError> {
    let hex = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: "accentColor".into(),
            message: format!("'{color}' is not a #rgb or #rrggbb color"),
        })
    }
}
