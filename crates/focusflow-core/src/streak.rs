//! Daily activity streak.
//!
//! A streak counts consecutive calendar days with at least one recorded
//! activity (task completion, habit check, or finished focus session).
//!
//! ```text
//! last active   reconcile(today)     record_activity(today)
//! ----------    ----------------     ----------------------
//! none          no-op                current + 1
//! today         no-op                no-op
//! yesterday     no-op                current + 1
//! older         current = 0          current = 1
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::yesterday;
use crate::storage::{Document, StoreKey};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub longest: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

impl Document for StreakState {
    const KEY: StoreKey = StoreKey::Streak;
}

impl StreakState {
    /// Drop the running streak if a whole day has been skipped.
    ///
    /// Returns `true` when the state changed and must be persisted.
    pub fn reconcile(&mut self, today: NaiveDate) -> bool {
        let Some(last) = self.last_active_date else {
            return false;
        };
        if last == today || last == yesterday(today) {
            return false;
        }
        if self.current == 0 {
            return false;
        }
        self.current = 0;
        true
    }

    /// Count `today` as an active day.
    ///
    /// Returns `true` when the state changed; a second call on the same day
    /// is a no-op.
    pub fn record_activity(&mut self, today: NaiveDate) -> bool {
        match self.last_active_date {
            Some(last) if last == today => return false,
            Some(last) if last == yesterday(today) => self.current += 1,
            None => self.current += 1,
            Some(_) => self.current = 1,
        }
        self.longest = self.longest.max(self.current);
        self.last_active_date = Some(today);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
