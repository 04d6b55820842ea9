mod counters;
mod engine;
mod runner;
mod ticker;

pub use counters::PomodoroCounters;
pub use engine::{Completion, Phase, PomodoroTimer, TimerDurations, TimerSnapshot, SESSIONS_PER_CYCLE};
pub use runner::{run_timer, RunOptions, RunSummary, AUTO_START_DELAY};
pub use ticker::{IntervalTicker, Ticker, VirtualTicker};
