//! Application state container.
//!
//! [`Dashboard`] owns the document store, the clock, every loaded entity
//! family and the pomodoro timer. Each operation mutates the in-memory state,
//! writes the touched document back in full, and queues the user-visible
//! [`Event`]s it produced. Callers drain them with
//! [`drain_events`](Dashboard::drain_events) after each call.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::achievements::{Achievement, AchievementStats, AchievementStatus, Achievements};
use crate::calendar::{self, CalendarCell, CalendarMonth};
use crate::clock::Clock;
use crate::error::{CoreError, Result, ValidationError};
use crate::events::{Event, Severity};
use crate::goals::{self, Goal, GoalKind, GoalPeriod, GoalProgress, Goals};
use crate::habit::{self, Habit};
use crate::id::generate_id;
use crate::insights::{self, DashboardSummary, DayBar, InsightSummary};
use crate::note::{self, Note, UNTITLED};
use crate::profile::UserProfile;
use crate::settings::Settings;
use crate::storage::{JsonStore, KeyValueStore, StoreKey};
use crate::streak::StreakState;
use crate::task::{self, Task, TaskDraft, TaskFilter, TaskPatch, DEFAULT_CATEGORY};
use crate::timer::{Completion, Phase, PomodoroCounters, PomodoroTimer, TimerSnapshot};

/// Asks the user to approve a destructive operation.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Approves everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}

/// Entity families cleared by [`Dashboard::wipe_all`].
const WIPED_KEYS: [StoreKey; 7] = [
    StoreKey::Tasks,
    StoreKey::Pomodoro,
    StoreKey::Streak,
    StoreKey::Goals,
    StoreKey::Habits,
    StoreKey::Notes,
    StoreKey::Achievements,
];

pub struct Dashboard<S: KeyValueStore, C: Clock> {
    store: JsonStore<S>,
    clock: C,
    tasks: Vec<Task>,
    habits: Vec<Habit>,
    notes: Vec<Note>,
    goals: Goals,
    streak: StreakState,
    counters: PomodoroCounters,
    achievements: Achievements,
    settings: Settings,
    timer: PomodoroTimer,
    events: Vec<Event>,
}

impl<S: KeyValueStore, C: Clock> Dashboard<S, C> {
    /// Open the dashboard over `kv`.
    ///
    /// Writes canonical defaults for any missing document, loads everything,
    /// and drops a lapsed streak.
    ///
    /// # Errors
    /// Fails if the store cannot be read or a stored document is malformed.
    pub fn load(kv: S, clock: C) -> Result<Self> {
        let store = JsonStore::new(kv);
        initialize_documents(&store)?;

        let settings: Settings = store.load()?;
        let timer = PomodoroTimer::new(settings.durations());
        let mut dashboard = Self {
            tasks: store.load()?,
            habits: store.load()?,
            notes: store.load()?,
            goals: store.load()?,
            streak: store.load()?,
            counters: store.load()?,
            achievements: store.load()?,
            settings,
            timer,
            events: Vec::new(),
            store,
            clock,
        };
        dashboard.reconcile_streak()?;
        debug!(tasks = dashboard.tasks.len(), "dashboard loaded");
        Ok(dashboard)
    }

    /// Re-read every document from the store. The timer keeps its state.
    pub fn reload(&mut self) -> Result<()> {
        initialize_documents(&self.store)?;
        self.tasks = self.store.load()?;
        self.habits = self.store.load()?;
        self.notes = self.store.load()?;
        self.goals = self.store.load()?;
        self.streak = self.store.load()?;
        self.counters = self.store.load()?;
        self.achievements = self.store.load()?;
        self.settings = self.store.load()?;
        self.reconcile_streak()
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &JsonStore<S> {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn counters(&self) -> &PomodoroCounters {
        &self.counters
    }

    pub fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.events.push(Event::notify(message, severity));
    }

    /// Surface a validation failure as a warning and hand back the error.
    fn reject(&mut self, err: ValidationError) -> CoreError {
        warn!(error = %err, "validation failed");
        self.notify(err.to_string(), Severity::Warning);
        err.into()
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task at the front of the list.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let title = task::validate_title(&draft.title).map_err(|e| self.reject(e))?;
        let category = draft
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let task = Task {
            id: generate_id(),
            title,
            category,
            priority: draft.priority.unwrap_or_default(),
            date: draft.date.unwrap_or_else(|| self.clock.today()),
            completed: false,
            created_at: self.clock.now(),
        };
        self.tasks.insert(0, task.clone());
        self.store.save(&self.tasks)?;
        debug!(id = %task.id, "task added");
        self.notify("Task added successfully!", Severity::Success);
        Ok(task)
    }

    /// Apply `patch` to task `id`. The title is validated before anything
    /// changes.
    pub fn edit_task(&mut self, id: &str, patch: TaskPatch) -> Result<Option<Task>> {
        let title = match &patch.title {
            Some(title) => Some(task::validate_title(title).map_err(|e| self.reject(e))?),
            None => None,
        };
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(category) = patch.category.map(|c| c.trim().to_string()) {
            if !category.is_empty() {
                task.category = category;
            }
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(date) = patch.date {
            task.date = date;
        }
        let updated = task.clone();

        self.store.save(&self.tasks)?;
        debug!(id, "task updated");
        self.notify("Task updated successfully!", Severity::Success);
        Ok(Some(updated))
    }

    /// Flip task `id`. Returns the new `completed` value.
    ///
    /// Completing a task counts as activity for the streak; un-completing
    /// does not touch it.
    pub fn toggle_task(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.completed = !task.completed;
        let completed = task.completed;

        self.store.save(&self.tasks)?;
        if completed {
            self.record_activity()?;
        }
        self.check_achievements()?;
        debug!(id, completed, "task toggled");
        Ok(Some(completed))
    }

    pub fn delete_task(&mut self, id: &str, confirm: &mut impl Confirm) -> Result<bool> {
        if !self.tasks.iter().any(|t| t.id == id) {
            return Ok(false);
        }
        if !confirm.confirm("Are you sure you want to delete this task?") {
            return Ok(false);
        }
        self.tasks.retain(|t| t.id != id);
        self.store.save(&self.tasks)?;
        debug!(id, "task deleted");
        self.notify("Task deleted", Severity::Info);
        Ok(true)
    }

    /// Filtered tasks in display order.
    pub fn list_tasks(&self, filter: TaskFilter) -> Vec<Task> {
        task::filtered(&self.tasks, filter, self.clock.today())
    }

    // ── Streak ───────────────────────────────────────────────────────

    fn reconcile_streak(&mut self) -> Result<()> {
        let today = self.clock.today();
        if self.streak.reconcile(today) {
            self.store.save(&self.streak)?;
            info!(%today, "streak lapsed");
        }
        Ok(())
    }

    /// Count today as active. A second call on the same day is a no-op.
    pub fn record_activity(&mut self) -> Result<()> {
        let today = self.clock.today();
        if self.streak.record_activity(today) {
            self.store.save(&self.streak)?;
            debug!(current = self.streak.current, "streak advanced");
            self.check_achievements()?;
        }
        Ok(())
    }

    pub fn reset_streak(&mut self, confirm: &mut impl Confirm) -> Result<bool> {
        if !confirm.confirm("Are you sure you want to reset your streak? This cannot be undone.") {
            return Ok(false);
        }
        self.streak.reset();
        self.store.save(&self.streak)?;
        info!("streak reset");
        self.notify("Streak has been reset", Severity::Info);
        Ok(true)
    }

    // ── Achievements ─────────────────────────────────────────────────

    /// Unlock every achievement whose rule now holds and persist the result.
    pub fn check_achievements(&mut self) -> Result<Vec<Achievement>> {
        let stats = AchievementStats {
            completed_tasks: task::completed_count(&self.tasks),
            current_streak: self.streak.current,
            total_sessions: self.counters.total_sessions,
        };
        let unlocked = self.achievements.evaluate(&stats);
        self.store.save(&self.achievements)?;

        for achievement in &unlocked {
            info!(id = achievement.id(), "achievement unlocked");
            self.events.push(Event::AchievementUnlocked {
                achievement: *achievement,
            });
            self.notify(
                format!("🏆 Achievement Unlocked: {}!", achievement.title()),
                Severity::Success,
            );
        }
        Ok(unlocked)
    }

    pub fn achievement_statuses(&self) -> Vec<AchievementStatus> {
        self.achievements.statuses()
    }

    // ── Goals ────────────────────────────────────────────────────────

    /// Add a goal. The kind is inferred from the title when not given and a
    /// missing or non-positive target becomes 1.
    pub fn add_goal(
        &mut self,
        period: GoalPeriod,
        title: &str,
        target: Option<i64>,
        kind: Option<GoalKind>,
    ) -> Result<Goal> {
        let title = goals::validate_title(title).map_err(|e| self.reject(e))?;
        let goal = Goal {
            id: generate_id(),
            kind: kind.unwrap_or_else(|| GoalKind::infer(&title)),
            title,
            target: goals::normalize_target(target),
            created_at: self.clock.now(),
        };
        self.goals.list_mut(period).push(goal.clone());
        self.store.save(&self.goals)?;
        debug!(id = %goal.id, %period, "goal added");
        self.notify("Goal added!", Severity::Success);
        Ok(goal)
    }

    pub fn remove_goal(&mut self, period: GoalPeriod, id: &str) -> Result<bool> {
        let list = self.goals.list_mut(period);
        let before = list.len();
        list.retain(|g| g.id != id);
        if list.len() == before {
            return Ok(false);
        }
        self.store.save(&self.goals)?;
        debug!(id, %period, "goal removed");
        Ok(true)
    }

    pub fn goal_progress(&self, period: GoalPeriod) -> Vec<GoalProgress> {
        let today = self.clock.today();
        self.goals
            .list(period)
            .iter()
            .map(|goal| {
                let progress = goals::progress(goal, period, &self.tasks, &self.counters, today);
                GoalProgress {
                    goal: goal.clone(),
                    period,
                    progress,
                    percent: goals::percent(progress, goal.target),
                }
            })
            .collect()
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub fn add_habit(&mut self, name: &str) -> Result<Habit> {
        let name = habit::validate_name(name).map_err(|e| self.reject(e))?;
        let habit = Habit::new(generate_id(), name, self.clock.now());
        self.habits.push(habit.clone());
        self.store.save(&self.habits)?;
        debug!(id = %habit.id, "habit added");
        self.notify("Habit added!", Severity::Success);
        Ok(habit)
    }

    /// Check or uncheck habit `id` for today. Returns the new checked state.
    pub fn toggle_habit(&mut self, id: &str) -> Result<Option<bool>> {
        let today = self.clock.today();
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };
        let done = habit.toggle(today);

        if done {
            self.record_activity()?;
        }
        self.store.save(&self.habits)?;
        debug!(id, done, "habit toggled");
        Ok(Some(done))
    }

    pub fn reset_habit_streak(&mut self, id: &str) -> Result<bool> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(false);
        };
        habit.reset_streak();
        self.store.save(&self.habits)?;
        debug!(id, "habit streak reset");
        Ok(true)
    }

    pub fn delete_habit(&mut self, id: &str, confirm: &mut impl Confirm) -> Result<bool> {
        if !self.habits.iter().any(|h| h.id == id) {
            return Ok(false);
        }
        if !confirm.confirm("Are you sure you want to delete this habit?") {
            return Ok(false);
        }
        self.habits.retain(|h| h.id != id);
        self.store.save(&self.habits)?;
        debug!(id, "habit deleted");
        Ok(true)
    }

    // ── Notes ────────────────────────────────────────────────────────

    /// Create a note, or update note `id` when given.
    ///
    /// Returns `None` when `id` names no note.
    pub fn save_note(&mut self, id: Option<&str>, title: &str, content: &str) -> Result<Option<Note>> {
        let (title, content) = note::validate(title, content).map_err(|e| self.reject(e))?;
        let title = if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };
        let now = self.clock.now();

        let saved = match id {
            Some(id) => {
                let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
                    return Ok(None);
                };
                note.title = title;
                note.content = content;
                note.updated_at = Some(now);
                note.clone()
            }
            None => {
                let note = Note {
                    id: generate_id(),
                    title,
                    content,
                    created_at: now,
                    updated_at: None,
                };
                self.notes.push(note.clone());
                note
            }
        };

        self.store.save(&self.notes)?;
        debug!(id = %saved.id, "note saved");
        self.notify("Note saved!", Severity::Success);
        Ok(Some(saved))
    }

    pub fn delete_note(&mut self, id: &str, confirm: &mut impl Confirm) -> Result<bool> {
        if !self.notes.iter().any(|n| n.id == id) {
            return Ok(false);
        }
        if !confirm.confirm("Are you sure you want to delete this note?") {
            return Ok(false);
        }
        self.notes.retain(|n| n.id != id);
        self.store.save(&self.notes)?;
        debug!(id, "note deleted");
        Ok(true)
    }

    pub fn list_notes(&self) -> Vec<Note> {
        note::sorted_newest_first(&self.notes)
    }

    pub fn find_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn timer_snapshot(&self) -> TimerSnapshot {
        self.timer.snapshot()
    }

    /// Returns `false` if the timer was already running.
    pub fn timer_start(&mut self) -> bool {
        if !self.timer.start() {
            return false;
        }
        self.events.push(Event::TimerStarted {
            phase: self.timer.phase(),
            time_left: self.timer.time_left(),
        });
        true
    }

    /// Returns `false` if the timer was not running.
    pub fn timer_pause(&mut self) -> bool {
        if !self.timer.pause() {
            return false;
        }
        self.events.push(Event::TimerPaused {
            time_left: self.timer.time_left(),
        });
        true
    }

    pub fn timer_reset(&mut self) {
        self.timer.reset();
        self.events.push(Event::TimerReset {
            phase: self.timer.phase(),
            time_left: self.timer.time_left(),
        });
    }

    /// Advance the timer one second, applying the phase completion if the
    /// countdown ran out.
    pub fn timer_tick(&mut self) -> Result<Option<Completion>> {
        match self.timer.tick() {
            Some(completion) => self.apply_completion(completion).map(Some),
            None => Ok(None),
        }
    }

    /// End the current phase now, with the same side effects as running out.
    pub fn complete_phase(&mut self) -> Result<Completion> {
        let completion = self.timer.complete();
        self.apply_completion(completion)
    }

    fn apply_completion(&mut self, mut completion: Completion) -> Result<Completion> {
        if self.settings.sound_enabled {
            self.events.push(Event::SoundCue);
        }

        if completion.from == Phase::Work {
            let minutes = self.settings.pomodoro_work;
            self.counters.record_focus(minutes, self.clock.today());
            self.store.save(&self.counters)?;
            self.record_activity()?;
            self.check_achievements()?;
            completion.auto_start = self.settings.auto_start_break;
            self.notify(
                format!("Great job! {minutes} minutes of focus completed!"),
                Severity::Success,
            );
        } else {
            self.notify("Break is over! Time to focus!", Severity::Info);
        }

        info!(
            from = completion.from.label(),
            to = completion.to.label(),
            session = completion.session,
            "pomodoro phase completed"
        );
        self.events.push(Event::PhaseCompleted {
            from: completion.from,
            to: completion.to,
            session: completion.session,
        });
        Ok(completion)
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// Validate and store `settings`, then re-initialize the timer from them.
    pub fn update_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate().map_err(|e| self.reject(e))?;
        self.store.save(&settings)?;
        self.timer.set_durations(settings.durations());
        self.settings = settings;
        debug!("settings saved");
        self.notify("Settings saved!", Severity::Success);
        Ok(())
    }

    /// Set one settings field by its camelCase key.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        let updated = match self.settings.with(key, value) {
            Ok(updated) => updated,
            Err(err) => {
                warn!(error = %err, key, "invalid setting");
                self.notify(err.to_string(), Severity::Warning);
                return Err(err);
            }
        };
        self.update_settings(updated)
    }

    pub fn reset_settings(&mut self) -> Result<()> {
        self.update_settings(Settings::default())
    }

    // ── Calendar ─────────────────────────────────────────────────────

    /// The last-viewed month, or the current one.
    pub fn calendar_month(&self) -> Result<CalendarMonth> {
        Ok(self
            .store
            .get(StoreKey::CalendarDate)?
            .unwrap_or_else(|| CalendarMonth::containing(self.clock.today())))
    }

    pub fn next_month(&mut self) -> Result<CalendarMonth> {
        let month = self.calendar_month()?.next();
        self.store.set(StoreKey::CalendarDate, &month)?;
        Ok(month)
    }

    pub fn prev_month(&mut self) -> Result<CalendarMonth> {
        let month = self.calendar_month()?.prev();
        self.store.set(StoreKey::CalendarDate, &month)?;
        Ok(month)
    }

    pub fn calendar_grid(&self, selected: Option<NaiveDate>) -> Result<Vec<CalendarCell>> {
        let month = self.calendar_month()?;
        Ok(month.grid(&self.tasks, self.clock.today(), selected))
    }

    /// Tasks on `day`, today when `None`.
    pub fn tasks_on(&self, day: Option<NaiveDate>) -> Vec<Task> {
        calendar::tasks_on(&self.tasks, day.unwrap_or_else(|| self.clock.today()))
    }

    // ── Insights ─────────────────────────────────────────────────────

    pub fn insight_summary(&self) -> InsightSummary {
        insights::summary(
            &self.tasks,
            &self.counters,
            self.streak.current,
            self.streak.longest,
        )
    }

    pub fn weekly_chart(&self) -> Vec<DayBar> {
        insights::weekly_chart(&self.tasks, self.clock.today())
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        insights::dashboard(
            &self.tasks,
            &self.counters,
            self.streak.current,
            self.achievements.badges.len(),
            self.clock.today(),
        )
    }

    // ── Profile & session ────────────────────────────────────────────

    pub fn profile(&self) -> Result<Option<UserProfile>> {
        self.store.get(StoreKey::User)
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.store.get(StoreKey::LoggedIn)?.unwrap_or(false))
    }

    pub fn login(&mut self, name: &str) -> Result<UserProfile> {
        let profile = UserProfile::new(name).map_err(|e| self.reject(e))?;
        self.store.set(StoreKey::User, &profile)?;
        self.store.set(StoreKey::LoggedIn, &true)?;
        info!(name = %profile.name, "logged in");
        self.notify(format!("Welcome, {}!", profile.name), Severity::Success);
        Ok(profile)
    }

    /// Clears the login flag only; the profile is kept.
    pub fn logout(&mut self, confirm: &mut impl Confirm) -> Result<bool> {
        if !confirm.confirm("Are you sure you want to logout?") {
            return Ok(false);
        }
        self.store.remove(StoreKey::LoggedIn)?;
        info!("logged out");
        Ok(true)
    }

    /// Remove every activity document and start over from defaults. Profile,
    /// login flag, settings and calendar month survive.
    pub fn wipe_all(&mut self, confirm: &mut impl Confirm) -> Result<bool> {
        if !confirm.confirm("Are you sure you want to clear all data? This cannot be undone!") {
            return Ok(false);
        }
        for key in WIPED_KEYS {
            self.store.remove(key)?;
        }
        self.reload()?;
        info!("all data cleared");
        self.notify("All data has been cleared!", Severity::Info);
        Ok(true)
    }
}

fn initialize_documents<S: KeyValueStore>(store: &JsonStore<S>) -> Result<()> {
    store.initialize::<Vec<Task>>()?;
    store.initialize::<PomodoroCounters>()?;
    store.initialize::<StreakState>()?;
    store.initialize::<Goals>()?;
    store.initialize::<Vec<Habit>>()?;
    store.initialize::<Vec<Note>>()?;
    store.initialize::<Achievements>()?;
    store.initialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn dashboard() -> Dashboard<MemoryStore, FixedClock> {
        Dashboard::load(MemoryStore::new(), FixedClock::new(day(13))).unwrap()
    }

    #[test]
    fn load_writes_defaults() {
        let d = dashboard();
        for key in [StoreKey::Tasks, StoreKey::Settings, StoreKey::Achievements] {
            assert!(d.store().inner().get(key.as_str()).unwrap().is_some());
        }
        assert!(d.store().inner().get(StoreKey::User.as_str()).unwrap().is_none());
        assert_eq!(d.timer_snapshot().time_left, 25 * 60);
    }

    #[test]
    fn add_task_defaults_and_front_insertion() {
        let mut d = dashboard();
        d.add_task(TaskDraft::new("first")).unwrap();
        let second = d.add_task(TaskDraft::new("  second ")).unwrap();
        assert_eq!(second.title, "second");
        assert_eq!(second.category, "personal");
        assert_eq!(second.date, day(13));
        assert_eq!(d.tasks()[0].id, second.id);
        assert!(d
            .drain_events()
            .contains(&Event::notify("Task added successfully!", Severity::Success)));
    }

    #[test]
    fn empty_title_warns_and_mutates_nothing() {
        let mut d = dashboard();
        let err = d.add_task(TaskDraft::new("   ")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(d.tasks().is_empty());
        assert_eq!(
            d.drain_events(),
            vec![Event::notify("Please enter a task title", Severity::Warning)]
        );
    }

    #[test]
    fn edit_validates_before_mutating() {
        let mut d = dashboard();
        let t = d.add_task(TaskDraft::new("keep")).unwrap();
        let patch = TaskPatch {
            title: Some(" ".into()),
            priority: Some(task::Priority::High),
            ..Default::default()
        };
        assert!(d.edit_task(&t.id, patch).is_err());
        assert_eq!(d.tasks()[0].title, "keep");
        assert_eq!(d.tasks()[0].priority, task::Priority::Medium);
    }

    /// Store whose task writes can be made to fail.
    #[derive(Default)]
    struct FlakyTasks {
        inner: MemoryStore,
        fail_tasks: std::cell::Cell<bool>,
    }

    impl KeyValueStore for FlakyTasks {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_tasks.get() && key == StoreKey::Tasks.as_str() {
                return Err(CoreError::Custom("disk full".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_task_write_leaves_streak_and_badges_untouched() {
        let mut d = Dashboard::load(FlakyTasks::default(), FixedClock::new(day(13))).unwrap();
        let t = d.add_task(TaskDraft::new("unsaved")).unwrap();
        d.store().inner().fail_tasks.set(true);

        assert!(d.toggle_task(&t.id).is_err());
        let kv = d.store().inner();
        let streak = kv.get(StoreKey::Streak.as_str()).unwrap().unwrap_or_default();
        assert!(!streak.contains("\"current\":1"));
        let badges = kv.get(StoreKey::Achievements.as_str()).unwrap().unwrap_or_default();
        assert!(!badges.contains("\"firstTask\":true"));
    }

    #[test]
    fn huge_phase_length_is_rejected_with_a_warning() {
        let mut d = dashboard();
        let err = d.set_setting("pomodoroWork", "4294967295").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(d.settings().pomodoro_work, 25);
        let events = d.drain_events();
        assert!(matches!(
            events.as_slice(),
            [Event::Notification { severity: Severity::Warning, .. }]
        ));

        for _ in 0..3 {
            d.complete_phase().unwrap();
        }
        assert_eq!(d.counters().total_minutes, 50);
    }

    #[test]
    fn unparsable_setting_value_warns() {
        let mut d = dashboard();
        for (key, value) in [("pomodoroWork", "abc"), ("theme", "purple"), ("volume", "3")] {
            assert!(matches!(d.set_setting(key, value), Err(CoreError::Config(_))));
            let events = d.drain_events();
            assert!(
                matches!(
                    events.as_slice(),
                    [Event::Notification { severity: Severity::Warning, .. }]
                ),
                "{key}={value}: {events:?}"
            );
        }
        assert_eq!(d.settings(), &Settings::default());
    }

    #[test]
    fn unknown_ids_are_silent() {
        let mut d = dashboard();
        assert_eq!(d.toggle_task("nope").unwrap(), None);
        assert!(!d.delete_task("nope", &mut AlwaysConfirm).unwrap());
        assert!(!d.remove_goal(GoalPeriod::Daily, "nope").unwrap());
        assert_eq!(d.toggle_habit("nope").unwrap(), None);
        assert_eq!(d.save_note(Some("nope"), "t", "c").unwrap(), None);
        assert!(d.drain_events().is_empty());
    }

    #[test]
    fn declined_confirmation_keeps_data() {
        let mut d = dashboard();
        let t = d.add_task(TaskDraft::new("x")).unwrap();
        assert!(!d.delete_task(&t.id, &mut NeverConfirm).unwrap());
        assert_eq!(d.tasks().len(), 1);

        let mut prompts = Vec::new();
        let mut record = |p: &str| {
            prompts.push(p.to_string());
            true
        };
        assert!(d.delete_task(&t.id, &mut record).unwrap());
        assert_eq!(prompts.len(), 1);
        assert!(d.tasks().is_empty());
    }

    #[test]
    fn completing_a_task_unlocks_first_task() {
        let mut d = dashboard();
        let t = d.add_task(TaskDraft::new("x")).unwrap();
        d.drain_events();
        assert_eq!(d.toggle_task(&t.id).unwrap(), Some(true));
        assert_eq!(d.streak().current, 1);
        assert!(d.achievements().first_task);
        let events = d.drain_events();
        assert!(events.contains(&Event::AchievementUnlocked {
            achievement: Achievement::FirstTask
        }));
        assert!(events.contains(&Event::notify(
            "🏆 Achievement Unlocked: First Task!",
            Severity::Success
        )));
    }

    #[test]
    fn note_defaults_to_untitled_and_tracks_updates() {
        let mut d = dashboard();
        let n = d.save_note(None, "", "body").unwrap().unwrap();
        assert_eq!(n.title, "Untitled");
        assert!(n.updated_at.is_none());
        let n = d.save_note(Some(&n.id), "Title", "body").unwrap().unwrap();
        assert_eq!(n.title, "Title");
        assert!(n.updated_at.is_some());
        assert_eq!(d.notes().len(), 1);
    }

    #[test]
    fn settings_update_reinitializes_timer() {
        let mut d = dashboard();
        d.set_setting("pomodoroWork", "50").unwrap();
        assert_eq!(d.timer_snapshot().time_left, 50 * 60);
        assert!(d.set_setting("pomodoroWork", "0").is_err());
        assert_eq!(d.settings().pomodoro_work, 50);
    }

    #[test]
    fn calendar_navigation_persists() {
        let mut d = dashboard();
        assert_eq!(d.calendar_month().unwrap(), CalendarMonth { year: 2024, month: 3 });
        d.next_month().unwrap();
        d.next_month().unwrap();
        d.prev_month().unwrap();
        assert_eq!(d.calendar_month().unwrap(), CalendarMonth { year: 2024, month: 4 });
    }

    #[test]
    fn login_and_logout() {
        let mut d = dashboard();
        assert!(!d.is_logged_in().unwrap());
        let p = d.login("Ada Lovelace").unwrap();
        assert_eq!(p.plan, "Pro");
        assert!(d.is_logged_in().unwrap());
        assert!(d.logout(&mut AlwaysConfirm).unwrap());
        assert!(!d.is_logged_in().unwrap());
        assert_eq!(d.profile().unwrap().map(|p| p.name), Some("Ada Lovelace".to_string()));
    }
}
