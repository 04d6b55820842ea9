//! Tick sources for the timer runner.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// A one-second cadence plus an out-of-band delay.
pub trait Ticker {
    /// Resolve at the next tick.
    fn tick(&mut self) -> impl Future<Output = ()>;

    /// Resolve after `delay`; the following tick is measured from then.
    fn sleep(&mut self, delay: Duration) -> impl Future<Output = ()>;
}

/// Wall-clock ticker backed by a tokio interval.
pub struct IntervalTicker {
    period: Duration,
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { period, interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Ticker for IntervalTicker {
    fn tick(&mut self) -> impl Future<Output = ()> {
        async move {
            self.interval.tick().await;
        }
    }

    fn sleep(&mut self, delay: Duration) -> impl Future<Output = ()> {
        async move {
            tokio::time::sleep(delay).await;
            self.interval.reset();
        }
    }
}

/// Resolves immediately and records what it was asked to wait for.
#[derive(Debug, Default)]
pub struct VirtualTicker {
    pub ticks: u64,
    pub sleeps: Vec<Duration>,
}

impl VirtualTicker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ticker for VirtualTicker {
    fn tick(&mut self) -> impl Future<Output = ()> {
        self.ticks += 1;
        std::future::ready(())
    }

    fn sleep(&mut self, delay: Duration) -> impl Future<Output = ()> {
        self.sleeps.push(delay);
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn virtual_ticker_counts_without_waiting() {
        let mut t = VirtualTicker::new();
        for _ in 0..1000 {
            t.tick().await;
        }
        t.sleep(Duration::from_secs(1)).await;
        assert_eq!(t.ticks, 1000);
        assert_eq!(t.sleeps, vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn interval_ticker_waits_one_period() {
        let mut t = IntervalTicker::new(Duration::from_millis(20));
        let started = std::time::Instant::now();
        t.tick().await;
        assert!(started.elapsed() >= Duration::from_millis(15));
    }
}
