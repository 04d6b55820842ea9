//! Foreground pomodoro timer.
//!
//! Timer state is not persisted between invocations: `status` always shows a
//! fresh cycle built from the current settings, and `run` drives one until
//! the phase ends or Ctrl-C.

use std::io::Write;

use clap::Subcommand;
use focusflow_core::{run_timer, Config, IntervalTicker, RunOptions};

use super::{open_dashboard, print_json, report, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print the timer state as JSON
    Status,
    /// Run the timer in the foreground
    Run {
        /// Stop after this many completed phases
        #[arg(long)]
        phases: Option<u32>,
        /// Start each following phase automatically
        #[arg(long)]
        continuous: bool,
    },
}

pub fn run(action: TimerAction, config: &Config) -> CliResult {
    let mut app = open_dashboard(config)?;

    match action {
        TimerAction::Status => print_json(&app.timer_snapshot())?,
        TimerAction::Run { phases, continuous } => {
            let options = RunOptions {
                max_phases: phases,
                continue_phases: continuous,
            };
            let show_countdown = config.timer.show_countdown;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;

            let outcome = runtime.block_on(async {
                let mut ticker = IntervalTicker::every_second();
                tokio::select! {
                    summary = run_timer(&mut app, &mut ticker, options, |app| {
                        if show_countdown {
                            let snap = app.timer_snapshot();
                            eprint!("\r{:<12} {}  ", snap.phase.label(), snap.clock());
                            let _ = std::io::stderr().flush();
                        }
                        report(app, config);
                    }) => Some(summary),
                    _ = tokio::signal::ctrl_c() => None,
                }
            });

            if show_countdown {
                eprintln!();
            }
            match outcome {
                Some(summary) => {
                    let summary = summary?;
                    tracing::info!(
                        ticks = summary.ticks,
                        phases = summary.completions.len(),
                        "timer run finished"
                    );
                }
                None => {
                    app.timer_pause();
                    eprintln!("Timer stopped at {}", app.timer_snapshot().clock());
                }
            }
            print_json(&app.timer_snapshot())?;
        }
    }

    report(&mut app, config);
    Ok(())
}
