//! # FocusFlow Core Library
//!
//! Business logic for the FocusFlow productivity dashboard: tasks, a pomodoro
//! timer, habits, goals, notes, a calendar view, streaks and achievements.
//! Everything is persisted to a local key-value document store; the CLI binary
//! is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Store**: one JSON document per entity family, kept in a SQLite `kv`
//!   table (or an in-memory map for tests)
//! - **Timer**: a pure pomodoro state machine advanced one second per `tick()`,
//!   plus an async runner driven by an injected [`Ticker`]
//! - **Streak / Achievements / Goals**: pure bookkeeping over the loaded state
//! - **Dashboard**: the explicit state container that owns the store and the
//!   clock, applies side effects and emits [`Event`]s
//!
//! ## Key Components
//!
//! - [`Dashboard`]: application state and every user-facing operation
//! - [`PomodoroTimer`]: countdown state machine
//! - [`Database`]: SQLite-backed document store
//! - [`Config`]: application configuration file

pub mod achievements;
pub mod calendar;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod goals;
pub mod habit;
pub mod id;
pub mod insights;
pub mod note;
pub mod profile;
pub mod settings;
pub mod storage;
pub mod streak;
pub mod task;
pub mod timer;

pub use achievements::{Achievement, AchievementStats, AchievementStatus, Achievements};
pub use calendar::{CalendarCell, CalendarMonth};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::{AlwaysConfirm, Confirm, Dashboard, NeverConfirm};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{Event, Severity};
pub use goals::{Goal, GoalKind, GoalPeriod, GoalProgress, Goals};
pub use habit::Habit;
pub use insights::{DashboardSummary, DayBar, InsightSummary};
pub use note::Note;
pub use profile::UserProfile;
pub use settings::{Settings, Theme};
pub use storage::{Config, Database, Document, JsonStore, KeyValueStore, MemoryStore, StoreKey};
pub use streak::StreakState;
pub use task::{Priority, Task, TaskDraft, TaskFilter, TaskPatch};
pub use timer::{
    run_timer, Completion, IntervalTicker, Phase, PomodoroCounters, PomodoroTimer, RunOptions,
    RunSummary, Ticker, TimerDurations, TimerSnapshot, VirtualTicker,
};
