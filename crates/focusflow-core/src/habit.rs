use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::yesterday;
use crate::error::ValidationError;
use crate::storage::{Document, StoreKey};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Document for Vec<Habit> {
    const KEY: StoreKey = StoreKey::Habits;
}

impl Habit {
    pub fn new(id: String, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            streak: 0,
            completed_dates: BTreeSet::new(),
            created_at,
        }
    }

    pub fn is_done_on(&self, day: NaiveDate) -> bool {
        self.completed_dates.contains(&day)
    }

    /// Check or uncheck `today`. Returns `true` if the habit is now checked.
    ///
    /// Checking continues the habit's streak when yesterday was checked and
    /// restarts it at 1 otherwise. Unchecking steps the streak back by one.
    pub fn toggle(&mut self, today: NaiveDate) -> bool {
        if self.completed_dates.remove(&today) {
            self.streak = self.streak.saturating_sub(1);
            return false;
        }

        if self.completed_dates.contains(&yesterday(today)) {
            self.streak += 1;
        } else {
            self.streak = 1;
        }
        self.completed_dates.insert(today);
        true
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }
}

pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required("habit name"));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap() + Duration::days(n)
    }

    fn habit() -> Habit {
        Habit::new("h".into(), "Read".into(), Utc::now())
    }

    #[test]
    fn first_check_sets_streak_to_one() {
        let mut h = habit();
        assert!(h.toggle(day(0)));
        assert_eq!(h.streak, 1);
        assert!(h.is_done_on(day(0)));
    }

    #[test]
    fn consecutive_checks_extend_streak() {
        let mut h = habit();
        h.toggle(day(0));
        h.toggle(day(1));
        h.toggle(day(2));
        assert_eq!(h.streak, 3);
    }

    #[test]
    fn check_after_gap_restarts() {
        let mut h = habit();
        h.toggle(day(0));
        h.toggle(day(1));
        h.toggle(day(4));
        assert_eq!(h.streak, 1);
        assert_eq!(h.completed_dates.len(), 3);
    }

    #[test]
    fn uncheck_today_steps_back_and_floors_at_zero() {
        let mut h = habit();
        h.toggle(day(0));
        h.toggle(day(1));
        assert!(!h.toggle(day(1)));
        assert_eq!(h.streak, 1);
        assert!(!h.is_done_on(day(1)));

        let mut h = habit();
        h.toggle(day(0));
        h.reset_streak();
        h.toggle(day(0));
        assert_eq!(h.streak, 0);
    }

    #[test]
    fn reads_habit_without_completed_dates() {
        let h: Habit = serde_json::from_str(
            r#"{"id":"a","name":"Run","streak":2,"createdAt":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(h.completed_dates.is_empty());
        assert_eq!(h.streak, 2);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(validate_name(" \t"), Err(ValidationError::Required("habit name")));
    }
}
