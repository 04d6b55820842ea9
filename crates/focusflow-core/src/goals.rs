//! Daily and weekly goals with derived progress.
//!
//! Progress is never stored. It is recomputed from the task list and the
//! pomodoro counters each time it is read.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::week_start;
use crate::error::ValidationError;
use crate::storage::{Document, StoreKey};
use crate::task::Task;
use crate::timer::PomodoroCounters;

/// Minutes that count as one pomodoro when measuring goal progress.
pub const POMODORO_UNIT_MINUTES: u32 = 25;

pub const DEFAULT_TARGET: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Tasks,
    Pomodoro,
}

impl GoalKind {
    /// Titles mentioning pomodoros, focus or sessions measure focus time;
    /// everything else measures completed tasks.
    pub fn infer(title: &str) -> Self {
        let lower = title.to_lowercase();
        if ["pomodoro", "focus", "session"]
            .iter()
            .any(|word| lower.contains(word))
        {
            GoalKind::Pomodoro
        } else {
            GoalKind::Tasks
        }
    }
}

impl FromStr for GoalKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tasks" | "task" => Ok(GoalKind::Tasks),
            "pomodoro" | "pomodoros" => Ok(GoalKind::Pomodoro),
            other => Err(ValidationError::InvalidValue {
                field: "kind".into(),
                message: format!("expected tasks or pomodoro, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Daily,
    Weekly,
}

impl fmt::Display for GoalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalPeriod::Daily => "daily",
            GoalPeriod::Weekly => "weekly",
        })
    }
}

impl FromStr for GoalPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(GoalPeriod::Daily),
            "weekly" | "week" => Ok(GoalPeriod::Weekly),
            other => Err(ValidationError::InvalidValue {
                field: "period".into(),
                message: format!("expected daily or weekly, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub target: u32,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default)]
    pub daily: Vec<Goal>,
    #[serde(default)]
    pub weekly: Vec<Goal>,
}

impl Document for Goals {
    const KEY: StoreKey = StoreKey::Goals;
}

impl Goals {
    pub fn list(&self, period: GoalPeriod) -> &[Goal] {
        match period {
            GoalPeriod::Daily => &self.daily,
            GoalPeriod::Weekly => &self.weekly,
        }
    }

    pub fn list_mut(&mut self, period: GoalPeriod) -> &mut Vec<Goal> {
        match period {
            GoalPeriod::Daily => &mut self.daily,
            GoalPeriod::Weekly => &mut self.weekly,
        }
    }
}

/// A goal joined with its current progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal: Goal,
    pub period: GoalPeriod,
    pub progress: u32,
    pub percent: u32,
}

/// Raw progress toward `goal`.
///
/// Daily tasks count completed tasks dated today; weekly tasks count completed
/// tasks dated on or after the week start. Pomodoro goals divide minutes by
/// [`POMODORO_UNIT_MINUTES`]: today's minutes for daily goals, all-time
/// minutes for weekly ones.
pub fn progress(
    goal: &Goal,
    period: GoalPeriod,
    tasks: &[Task],
    counters: &PomodoroCounters,
    today: NaiveDate,
) -> u32 {
    match (goal.kind, period) {
        (GoalKind::Tasks, GoalPeriod::Daily) => count_completed(tasks, |d| d == today),
        (GoalKind::Tasks, GoalPeriod::Weekly) => {
            let start = week_start(today);
            count_completed(tasks, |d| d >= start)
        }
        (GoalKind::Pomodoro, GoalPeriod::Daily) => {
            counters.today_minutes(today) / POMODORO_UNIT_MINUTES
        }
        (GoalKind::Pomodoro, GoalPeriod::Weekly) => counters.total_minutes / POMODORO_UNIT_MINUTES,
    }
}

/// `min(100, floor(100 * progress / target))`.
pub fn percent(progress: u32, target: u32) -> u32 {
    let target = u64::from(target.max(1));
    let pct = u64::from(progress) * 100 / target;
    pct.min(100) as u32
}

pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::Required("goal title"));
    }
    Ok(title.to_string())
}

/// A missing or non-positive target becomes [`DEFAULT_TARGET`].
pub fn normalize_target(target: Option<i64>) -> u32 {
    match target {
        Some(t) if t >= 1 => u32::try_from(t).unwrap_or(u32::MAX),
        _ => DEFAULT_TARGET,
    }
}

fn count_completed(tasks: &[Task], on: impl Fn(NaiveDate) -> bool) -> u32 {
    tasks.iter().filter(|t| t.completed && on(t.date)).count() as u32
}
