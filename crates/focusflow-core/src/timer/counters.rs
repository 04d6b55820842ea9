use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::{Document, StoreKey};

/// Persisted focus-session totals.
///
/// The `today_*` fields describe `last_date` only; read them through
/// [`today_sessions`](Self::today_sessions) and
/// [`today_minutes`](Self::today_minutes), which return zero once the day
/// has rolled over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroCounters {
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub total_minutes: u32,
    #[serde(default)]
    pub today_sessions: u32,
    #[serde(default)]
    pub today_minutes: u32,
    #[serde(default)]
    pub last_date: Option<NaiveDate>,
}

impl Document for PomodoroCounters {
    const KEY: StoreKey = StoreKey::Pomodoro;
}

impl PomodoroCounters {
    /// Count one finished focus session of `minutes` on `today`.
    pub fn record_focus(&mut self, minutes: u32, today: NaiveDate) {
        self.total_sessions = self.total_sessions.saturating_add(1);
        self.total_minutes = self.total_minutes.saturating_add(minutes);

        if self.last_date != Some(today) {
            self.today_sessions = 0;
            self.today_minutes = 0;
            self.last_date = Some(today);
        }

        self.today_sessions = self.today_sessions.saturating_add(1);
        self.today_minutes = self.today_minutes.saturating_add(minutes);
    }

    pub fn today_sessions(&self, today: NaiveDate) -> u32 {
        if self.last_date == Some(today) {
            self.today_sessions
        } else {
            0
        }
    }

    pub fn today_minutes(&self, today: NaiveDate) -> u32 {
        if self.last_date == Some(today) {
            self.today_minutes
        } else {
            0
        }
    }
}
