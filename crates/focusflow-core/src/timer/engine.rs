//! Pomodoro countdown state machine.
//!
//! The engine has no internal clock: the caller advances it one second per
//! `tick()`. Side effects of a finished phase (counters, streak, achievements,
//! auto-start) are applied by the caller from the returned [`Completion`].
//!
//! ## State Transitions
//!
//! ```text
//! Work --(session < 4)--> ShortBreak --> Work (session + 1, capped at 4)
//! Work --(session = 4)--> LongBreak  --> Work (session reset to 1 first)
//! ```
//!
//! Each phase is independently `Running` or `Paused`.

use serde::{Deserialize, Serialize};

/// Focus sessions per cycle; the last one is followed by a long break.
pub const SESSIONS_PER_CYCLE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Phase lengths in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDurations {
    pub work_secs: u32,
    pub break_secs: u32,
    pub long_break_secs: u32,
}

impl TimerDurations {
    pub fn from_minutes(work: u32, short_break: u32, long_break: u32) -> Self {
        Self {
            work_secs: work.saturating_mul(60),
            break_secs: short_break.saturating_mul(60),
            long_break_secs: long_break.saturating_mul(60),
        }
    }

    pub fn for_phase(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15)
    }
}

/// A finished phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub from: Phase,
    pub to: Phase,
    /// Session counter after the transition.
    pub session: u8,
    /// Start the next phase after the auto-start delay.
    #[serde(default)]
    pub auto_start: bool,
}

/// Point-in-time view of the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub time_left: u32,
    pub total: u32,
    pub is_running: bool,
    pub is_break: bool,
    pub session: u8,
}

impl TimerSnapshot {
    /// `MM:SS` rendering of the remaining time.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.time_left / 60, self.time_left % 60)
    }
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    durations: TimerDurations,
    phase: Phase,
    time_left: u32,
    running: bool,
    session: u8,
}

impl PomodoroTimer {
    /// Paused at the start of the first focus session.
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            phase: Phase::Work,
            time_left: durations.work_secs,
            running: false,
            session: 1,
        }
    }

    /// Paused timer at an arbitrary point of the cycle. `session` is clamped
    /// into `1..=4`.
    pub fn with_state(durations: TimerDurations, phase: Phase, time_left: u32, session: u8) -> Self {
        Self {
            durations,
            phase,
            time_left,
            running: false,
            session: session.clamp(1, SESSIONS_PER_CYCLE),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> u8 {
        self.session
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            time_left: self.time_left,
            total: self.durations.for_phase(self.phase),
            is_running: self.running,
            is_break: self.phase.is_break(),
            session: self.session,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Returns `false` if the timer was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Returns `false` if the timer was not running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Pause and refill the current phase.
    pub fn reset(&mut self) {
        self.pause();
        self.time_left = self.durations.for_phase(self.phase);
    }

    /// Advance one second. Returns the completion when the phase runs out.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return Some(self.complete());
        }
        None
    }

    /// Finish the current phase and move to the next one, paused.
    pub fn complete(&mut self) -> Completion {
        self.pause();
        let from = self.phase;
        let to = match from {
            Phase::Work => {
                if self.session >= SESSIONS_PER_CYCLE {
                    self.session = 1;
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => {
                if self.session < SESSIONS_PER_CYCLE {
                    self.session += 1;
                }
                Phase::Work
            }
        };
        self.phase = to;
        self.time_left = self.durations.for_phase(to);
        Completion {
            from,
            to,
            session: self.session,
            auto_start: false,
        }
    }

    /// Replace the phase lengths. A paused timer is re-initialized to the
    /// start of the cycle; a running one keeps its countdown.
    pub fn set_durations(&mut self, durations: TimerDurations) {
        self.durations = durations;
        if !self.running {
            *self = Self::new(durations);
        }
    }
}
