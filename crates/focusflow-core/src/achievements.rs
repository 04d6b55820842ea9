//! One-way achievement badges.

use serde::{Deserialize, Serialize};

use crate::storage::{Document, StoreKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Achievement {
    FirstTask,
    SevenDayStreak,
    TenPomodoros,
    FiftyTasks,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::FirstTask,
        Achievement::SevenDayStreak,
        Achievement::TenPomodoros,
        Achievement::FiftyTasks,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstTask => "firstTask",
            Achievement::SevenDayStreak => "sevenDayStreak",
            Achievement::TenPomodoros => "tenPomodoros",
            Achievement::FiftyTasks => "fiftyTasks",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstTask => "First Task",
            Achievement::SevenDayStreak => "7 Day Streak",
            Achievement::TenPomodoros => "Focus Master",
            Achievement::FiftyTasks => "Task Champion",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstTask => "Complete your first task",
            Achievement::SevenDayStreak => "Maintain a 7-day streak",
            Achievement::TenPomodoros => "Complete 10 Pomodoro sessions",
            Achievement::FiftyTasks => "Complete 50 tasks",
        }
    }

    fn is_met(&self, stats: &AchievementStats) -> bool {
        match self {
            Achievement::FirstTask => stats.completed_tasks >= 1,
            Achievement::SevenDayStreak => stats.current_streak >= 7,
            Achievement::TenPomodoros => stats.total_sessions >= 10,
            Achievement::FiftyTasks => stats.completed_tasks >= 50,
        }
    }
}

/// Figures the unlock rules are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementStats {
    pub completed_tasks: usize,
    pub current_streak: u32,
    pub total_sessions: u32,
}

/// Persisted unlock state. Flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    #[serde(default)]
    pub badges: Vec<Achievement>,
    #[serde(default)]
    pub first_task: bool,
    #[serde(default)]
    pub seven_day_streak: bool,
    #[serde(default)]
    pub ten_pomodoros: bool,
    #[serde(default)]
    pub fifty_tasks: bool,
}

impl Document for Achievements {
    const KEY: StoreKey = StoreKey::Achievements;
}

/// Listing row for one badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

impl Achievements {
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        *self.flag(achievement)
    }

    /// Unlock every badge whose rule now holds. Returns the badges that were
    /// added to `badges` by this call, in canonical order.
    pub fn evaluate(&mut self, stats: &AchievementStats) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for achievement in Achievement::ALL {
            if *self.flag(achievement) || !achievement.is_met(stats) {
                continue;
            }
            *self.flag_mut(achievement) = true;
            if !self.badges.contains(&achievement) {
                self.badges.push(achievement);
                unlocked.push(achievement);
            }
        }
        unlocked
    }

    pub fn statuses(&self) -> Vec<AchievementStatus> {
        Achievement::ALL
            .iter()
            .map(|a| AchievementStatus {
                id: a.id(),
                title: a.title(),
                description: a.description(),
                unlocked: self.is_unlocked(*a),
            })
            .collect()
    }

    /// Most recently earned badge.
    pub fn latest(&self) -> Option<Achievement> {
        self.badges.last().copied()
    }

    fn flag(&self, achievement: Achievement) -> &bool {
        match achievement {
            Achievement::FirstTask => &self.first_task,
            Achievement::SevenDayStreak => &self.seven_day_streak,
            Achievement::TenPomodoros => &self.ten_pomodoros,
            Achievement::FiftyTasks => &self.fifty_tasks,
        }
    }

    fn flag_mut(&mut self, achievement: Achievement) -> &mut bool {
        match achievement {
            Achievement::FirstTask => &mut self.first_task,
            Achievement::SevenDayStreak => &mut self.seven_day_streak,
            Achievement::TenPomodoros => &mut self.ten_pomodoros,
            Achievement::FiftyTasks => &mut self.fifty_tasks,
        }
    }
}
