//! Task records, list filters and display ordering.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::storage::{Document, StoreKey};

pub const DEFAULT_CATEGORY: &str = "personal";

/// Task priority. Ordering follows display order: `High < Medium < Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("expected high, medium or low, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Document for Vec<Task> {
    const KEY: StoreKey = StoreKey::Tasks;
}

/// Input for a new task. Unset fields fall back to today / `personal` /
/// `medium`.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Edit of an existing task; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub date: Option<NaiveDate>,
}

/// List view selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    Today,
    /// Dated after today and not yet completed.
    Upcoming,
    Completed,
    All,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskFilter::Today => task.date == today,
            TaskFilter::Upcoming => task.date > today && !task.completed,
            TaskFilter::Completed => task.completed,
            TaskFilter::All => true,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(TaskFilter::Today),
            "upcoming" => Ok(TaskFilter::Upcoming),
            "completed" => Ok(TaskFilter::Completed),
            "all" => Ok(TaskFilter::All),
            other => Err(ValidationError::InvalidValue {
                field: "filter".into(),
                message: format!("unknown filter '{other}'"),
            }),
        }
    }
}

/// Trimmed, non-empty title.
pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::Required("task title"));
    }
    Ok(title.to_string())
}

/// Incomplete before completed, then high, medium, low. Stable.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|t| (t.completed, t.priority));
}

pub fn filtered(tasks: &[Task], filter: TaskFilter, today: NaiveDate) -> Vec<Task> {
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| filter.matches(t, today))
        .cloned()
        .collect();
    sort_for_display(&mut out);
    out
}

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}
