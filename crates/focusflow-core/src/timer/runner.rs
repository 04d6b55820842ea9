//! Drives a dashboard's pomodoro timer from a [`Ticker`].
//!
//! The runner is the only tick source. Dropping its future (for example when
//! it loses a `tokio::select!` against Ctrl-C) stops ticking; the caller then
//! pauses the timer.

use std::time::Duration;

use tracing::debug;

use super::engine::Completion;
use super::ticker::Ticker;
use crate::clock::Clock;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Pause between a finished phase and an automatic start of the next one.
pub const AUTO_START_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Return after this many completed phases.
    pub max_phases: Option<u32>,
    /// Start every following phase, regardless of `autoStartBreak`.
    pub continue_phases: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub completions: Vec<Completion>,
}

/// Start the timer and tick it until it stops running.
///
/// A completed phase ends the run unless it auto-starts (from settings or
/// `options.continue_phases`), in which case the next phase begins after
/// [`AUTO_START_DELAY`]. `on_tick` sees the dashboard after every tick, so it
/// can render the countdown and drain queued events.
pub async fn run_timer<S, C, T, F>(
    dashboard: &mut Dashboard<S, C>,
    ticker: &mut T,
    options: RunOptions,
    mut on_tick: F,
) -> Result<RunSummary>
where
    S: KeyValueStore,
    C: Clock,
    T: Ticker,
    F: FnMut(&mut Dashboard<S, C>),
{
    let mut summary = RunSummary::default();
    dashboard.timer_start();

    while dashboard.timer().is_running() {
        ticker.tick().await;
        summary.ticks += 1;
        let completion = dashboard.timer_tick()?;
        on_tick(dashboard);

        let Some(completion) = completion else {
            continue;
        };
        summary.completions.push(completion);

        let done = options
            .max_phases
            .is_some_and(|max| summary.completions.len() as u32 >= max);
        if done {
            break;
        }

        if completion.auto_start || options.continue_phases {
            debug!(next = completion.to.label(), "auto-starting next phase");
            ticker.sleep(AUTO_START_DELAY).await;
            dashboard.timer_start();
        }
    }

    Ok(summary)
}
