use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::timer::Phase;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Every user-visible side effect produced by the dashboard.
/// The presentation layer drains these after each operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Notification {
        message: String,
        severity: Severity,
    },
    AchievementUnlocked {
        achievement: Achievement,
    },
    /// Audio cue on pomodoro phase completion, only when sound is enabled.
    SoundCue,
    TimerStarted {
        phase: Phase,
        time_left: u32,
    },
    TimerPaused {
        time_left: u32,
    },
    TimerReset {
        phase: Phase,
        time_left: u32,
    },
    PhaseCompleted {
        from: Phase,
        to: Phase,
        session: u8,
    },
}

impl Event {
    pub fn notify(message: impl Into<String>, severity: Severity) -> Self {
        Event::Notification {
            message: message.into(),
            severity,
        }
    }
}
