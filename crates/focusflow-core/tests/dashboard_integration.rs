//! Integration tests for the dashboard: streaks, achievements, goals, habits
//! and data wipes, driven through the public API with a pinned clock.

use chrono::{Duration, NaiveDate};
use focusflow_core::{
    Achievement, AlwaysConfirm, CoreError, Dashboard, Event, FixedClock, GoalKind, GoalPeriod,
    KeyValueStore, MemoryStore, Severity, StoreKey, TaskDraft, TaskFilter,
};
use proptest::prelude::*;

// Wednesday.
fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
}

fn open() -> (Dashboard<MemoryStore, FixedClock>, FixedClock) {
    let clock = FixedClock::new(start_day());
    let dashboard = Dashboard::load(MemoryStore::new(), clock.clone()).unwrap();
    (dashboard, clock)
}

fn complete_new_task(d: &mut Dashboard<MemoryStore, FixedClock>, title: &str) -> String {
    let task = d.add_task(TaskDraft::new(title)).unwrap();
    d.toggle_task(&task.id).unwrap();
    task.id
}

// ── Streak ───────────────────────────────────────────────────────────

#[test]
fn test_toggle_twice_restores_task_without_double_counting_streak() {
    let (mut d, _clock) = open();
    let task = d.add_task(TaskDraft::new("Write report")).unwrap();

    d.toggle_task(&task.id).unwrap();
    d.toggle_task(&task.id).unwrap();

    assert!(!d.tasks()[0].completed);
    assert_eq!(d.streak().current, 1);
    assert_eq!(d.streak().last_active_date, Some(start_day()));

    // Completing again on the same day still counts once.
    d.toggle_task(&task.id).unwrap();
    assert_eq!(d.streak().current, 1);
}

#[test]
fn test_activity_on_consecutive_days_extends_streak() {
    let (mut d, clock) = open();
    complete_new_task(&mut d, "day one");
    clock.advance_days(1);
    complete_new_task(&mut d, "day two");

    assert_eq!(d.streak().current, 2);
    assert_eq!(d.streak().longest, 2);
}

#[test]
fn test_three_day_gap_resets_streak_on_load() {
    let clock = FixedClock::new(start_day());
    let store = MemoryStore::new();
    let mut d = Dashboard::load(store, clock.clone()).unwrap();
    complete_new_task(&mut d, "a");
    clock.advance_days(1);
    complete_new_task(&mut d, "b");
    assert_eq!(d.streak().current, 2);

    clock.advance_days(3);
    d.reload().unwrap();
    assert_eq!(d.streak().current, 0);
    assert_eq!(d.streak().longest, 2);

    // The reset was persisted.
    let raw = d.store().inner().get(StoreKey::Streak.as_str()).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["current"], 0);
}

#[test]
fn test_activity_after_a_skipped_day_restarts_at_one() {
    let (mut d, clock) = open();
    complete_new_task(&mut d, "a");
    clock.advance_days(2);
    complete_new_task(&mut d, "b");
    assert_eq!(d.streak().current, 1);
    assert_eq!(d.streak().longest, 1);
}

#[test]
fn test_reset_streak_requires_confirmation() {
    let (mut d, _clock) = open();
    complete_new_task(&mut d, "a");

    let mut decline = |_: &str| false;
    assert!(!d.reset_streak(&mut decline).unwrap());
    assert_eq!(d.streak().current, 1);

    assert!(d.reset_streak(&mut AlwaysConfirm).unwrap());
    assert_eq!(d.streak().current, 0);
    assert_eq!(d.streak().longest, 0);
    assert_eq!(d.streak().last_active_date, None);
}

#[test]
fn test_seven_day_streak_unlocks_badge() {
    let (mut d, clock) = open();
    for day in 0..7 {
        complete_new_task(&mut d, &format!("day {day}"));
        clock.advance_days(1);
    }
    assert!(d.achievements().seven_day_streak);
    assert!(d.achievements().badges.contains(&Achievement::SevenDayStreak));
}

// ── Achievements ─────────────────────────────────────────────────────

#[test]
fn test_fifty_tasks_survives_deleting_tasks() {
    let (mut d, _clock) = open();
    let ids: Vec<String> = (0..50).map(|n| complete_new_task(&mut d, &format!("t{n}"))).collect();
    assert!(d.achievements().fifty_tasks);

    for id in &ids[..10] {
        d.delete_task(id, &mut AlwaysConfirm).unwrap();
    }
    d.check_achievements().unwrap();
    assert!(d.achievements().fifty_tasks);
    assert_eq!(
        d.achievements()
            .badges
            .iter()
            .filter(|b| **b == Achievement::FiftyTasks)
            .count(),
        1
    );
}

#[test]
fn test_unlock_is_announced_once() {
    let (mut d, _clock) = open();
    complete_new_task(&mut d, "a");
    complete_new_task(&mut d, "b");
    let unlocks = d
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, Event::AchievementUnlocked { .. }))
        .count();
    assert_eq!(unlocks, 1);
}

// ── Goals ────────────────────────────────────────────────────────────

#[test]
fn test_daily_task_goal_two_of_three_is_66_percent() {
    let (mut d, _clock) = open();
    d.add_goal(GoalPeriod::Daily, "Finish tasks", Some(3), None).unwrap();
    complete_new_task(&mut d, "a");
    complete_new_task(&mut d, "b");
    d.add_task(TaskDraft::new("open")).unwrap();

    let progress = d.goal_progress(GoalPeriod::Daily);
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].progress, 2);
    assert_eq!(progress[0].percent, 66);
}

#[test]
fn test_goal_kind_and_target_defaults() {
    let (mut d, _clock) = open();
    let g = d.add_goal(GoalPeriod::Weekly, "Four focus sessions", Some(0), None).unwrap();
    assert_eq!(g.kind, GoalKind::Pomodoro);
    assert_eq!(g.target, 1);

    let g = d.add_goal(GoalPeriod::Weekly, "Ship it", None, Some(GoalKind::Pomodoro)).unwrap();
    assert_eq!(g.kind, GoalKind::Pomodoro);

    assert!(matches!(
        d.add_goal(GoalPeriod::Daily, "  ", Some(2), None),
        Err(CoreError::Validation(_))
    ));
    assert_eq!(d.goals().daily.len(), 0);
    assert_eq!(d.goals().weekly.len(), 2);
}

#[test]
fn test_weekly_pomodoro_goal_counts_all_time_minutes() {
    // Current behaviour: weekly pomodoro goals measure lifetime focus minutes,
    // not minutes within the week.
    let (mut d, clock) = open();
    d.complete_phase().unwrap();
    clock.advance_days(14);
    d.reload().unwrap();

    d.add_goal(GoalPeriod::Weekly, "Pomodoros", Some(4), None).unwrap();
    d.add_goal(GoalPeriod::Daily, "Pomodoros", Some(4), None).unwrap();
    assert_eq!(d.goal_progress(GoalPeriod::Weekly)[0].progress, 1);
    assert_eq!(d.goal_progress(GoalPeriod::Daily)[0].progress, 0);
}

#[test]
fn test_remove_goal() {
    let (mut d, _clock) = open();
    let g = d.add_goal(GoalPeriod::Daily, "Read", Some(1), None).unwrap();
    assert!(!d.remove_goal(GoalPeriod::Weekly, &g.id).unwrap());
    assert!(d.remove_goal(GoalPeriod::Daily, &g.id).unwrap());
    assert!(d.goal_progress(GoalPeriod::Daily).is_empty());
}

// ── Habits ───────────────────────────────────────────────────────────

#[test]
fn test_habit_toggle_counts_as_activity() {
    let (mut d, clock) = open();
    let h = d.add_habit("Meditate").unwrap();
    assert_eq!(d.toggle_habit(&h.id).unwrap(), Some(true));
    clock.advance_days(1);
    assert_eq!(d.toggle_habit(&h.id).unwrap(), Some(true));

    assert_eq!(d.habits()[0].streak, 2);
    assert_eq!(d.streak().current, 2);

    assert_eq!(d.toggle_habit(&h.id).unwrap(), Some(false));
    assert_eq!(d.habits()[0].streak, 1);

    assert!(d.reset_habit_streak(&h.id).unwrap());
    assert_eq!(d.habits()[0].streak, 0);
    assert!(d.delete_habit(&h.id, &mut AlwaysConfirm).unwrap());
    assert!(d.habits().is_empty());
}

// ── Tasks ────────────────────────────────────────────────────────────

#[test]
fn test_upcoming_excludes_today_and_completed() {
    let (mut d, _clock) = open();
    let tomorrow = start_day() + Duration::days(1);
    d.add_task(TaskDraft::new("today")).unwrap();
    d.add_task(TaskDraft::new("later").date(tomorrow)).unwrap();
    let done = d.add_task(TaskDraft::new("later done").date(tomorrow)).unwrap();
    d.toggle_task(&done.id).unwrap();

    let upcoming: Vec<String> = d.list_tasks(TaskFilter::Upcoming).into_iter().map(|t| t.title).collect();
    assert_eq!(upcoming, ["later"]);
    assert_eq!(d.tasks_on(Some(tomorrow)).len(), 2);
    assert_eq!(d.tasks_on(None).len(), 1);
}

// ── Data wipe ────────────────────────────────────────────────────────

#[test]
fn test_wipe_keeps_profile_settings_and_calendar() {
    let (mut d, _clock) = open();
    d.login("Sam").unwrap();
    d.set_setting("theme", "light").unwrap();
    d.next_month().unwrap();
    complete_new_task(&mut d, "a");
    d.add_habit("Run").unwrap();
    d.save_note(None, "n", "").unwrap();
    d.drain_events();

    assert!(d.wipe_all(&mut AlwaysConfirm).unwrap());

    assert!(d.tasks().is_empty());
    assert!(d.habits().is_empty());
    assert!(d.notes().is_empty());
    assert_eq!(d.streak().current, 0);
    assert!(!d.achievements().first_task);
    assert!(d.is_logged_in().unwrap());
    assert_eq!(d.profile().unwrap().unwrap().name, "Sam");
    assert_eq!(d.settings().get("theme").as_deref(), Some("light"));
    assert_eq!(d.calendar_month().unwrap().month, 4);
    assert!(d
        .drain_events()
        .contains(&Event::notify("All data has been cleared!", Severity::Info)));
    // Defaults were written back.
    assert_eq!(
        d.store().inner().get(StoreKey::Tasks.as_str()).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn test_malformed_document_fails_load() {
    let store = MemoryStore::new();
    store.set(StoreKey::Tasks.as_str(), "{not json").unwrap();
    let result = Dashboard::load(store, FixedClock::new(start_day()));
    assert!(matches!(result, Err(CoreError::Json(_))));
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_toggle_twice_is_identity(extra_toggles in 0usize..4) {
        let (mut d, _clock) = open();
        let task = d.add_task(TaskDraft::new("t")).unwrap();
        for _ in 0..extra_toggles * 2 {
            d.toggle_task(&task.id).unwrap();
        }
        prop_assert!(!d.tasks()[0].completed);
        prop_assert!(d.streak().current <= 1);
    }

    #[test]
    fn prop_achievements_never_relock(ops in proptest::collection::vec(0u8..3, 1..40)) {
        let (mut d, clock) = open();
        let mut ids: Vec<String> = Vec::new();
        let mut unlocked = Vec::new();
        for op in ops {
            match op {
                0 => ids.push(complete_new_task(&mut d, "t")),
                1 => {
                    if let Some(id) = ids.pop() {
                        d.delete_task(&id, &mut AlwaysConfirm).unwrap();
                    }
                }
                _ => {
                    clock.advance_days(3);
                    d.reload().unwrap();
                }
            }
            d.check_achievements().unwrap();
            for a in Achievement::ALL {
                if unlocked.contains(&a) {
                    prop_assert!(d.achievements().is_unlocked(a));
                } else if d.achievements().is_unlocked(a) {
                    unlocked.push(a);
                }
            }
            prop_assert!(d.streak().longest >= d.streak().current);
        }
    }
}
