//! Read-only summaries for the dashboard and insights views.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::task::{self, Task};
use crate::timer::PomodoroCounters;

/// How many tasks the dashboard lists under "recent".
pub const RECENT_TASKS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Completed share of all tasks, floored percent.
    pub completion_rate: u32,
    pub total_sessions: u32,
    pub total_focus_minutes: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Completed tasks dated on one day of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBar {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub label: String,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today_tasks: usize,
    /// Incomplete tasks dated today; shown as the task list badge.
    pub pending_today: usize,
    pub total_focus_minutes: u32,
    pub focus_minutes_today: u32,
    pub current_streak: u32,
    pub recent_tasks: Vec<Task>,
    pub badge_count: usize,
}

pub fn summary(tasks: &[Task], counters: &PomodoroCounters, current_streak: u32, longest_streak: u32) -> InsightSummary {
    let completed = task::completed_count(tasks);
    let rate = if tasks.is_empty() {
        0
    } else {
        (completed * 100 / tasks.len()) as u32
    };
    InsightSummary {
        total_tasks: tasks.len(),
        completed_tasks: completed,
        completion_rate: rate,
        total_sessions: counters.total_sessions,
        total_focus_minutes: counters.total_minutes,
        current_streak,
        longest_streak,
    }
}

/// The seven days ending today, oldest first.
pub fn weekly_chart(tasks: &[Task], today: NaiveDate) -> Vec<DayBar> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayBar {
                date,
                label: date.format("%a").to_string(),
                completed: tasks.iter().filter(|t| t.completed && t.date == date).count(),
            }
        })
        .collect()
}

/// Recent tasks are the first [`RECENT_TASKS`] in stored order, which puts
/// the newest first since tasks are inserted at the front.
pub fn dashboard(
    tasks: &[Task],
    counters: &PomodoroCounters,
    current_streak: u32,
    badge_count: usize,
    today: NaiveDate,
) -> DashboardSummary {
    let todays: Vec<&Task> = tasks.iter().filter(|t| t.date == today).collect();

    DashboardSummary {
        today_tasks: todays.len(),
        pending_today: todays.iter().filter(|t| !t.completed).count(),
        total_focus_minutes: counters.total_minutes,
        focus_minutes_today: counters.today_minutes(today),
        current_streak,
        recent_tasks: tasks.iter().take(RECENT_TASKS).cloned().collect(),
        badge_count,
    }
}
