//! Repeating game-loop timer
//!
//! `Ticker` is the scheduling half of the game loop: the owner starts it, stops it, or
//! changes its period, and awaits [`Ticker::tick`] from a `tokio::select!` loop. The
//! tick work itself stays with the caller, so ticks never overlap.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    running: bool,
    /// Built lazily on the first poll so that start/stop work outside a runtime
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            running: false,
            interval: None,
        }
    }

    /// Begin ticking every `period`; the first tick is one full period away
    ///
    /// Restarts the schedule if already running.
    pub fn start(&mut self, period: Duration) {
        self.period = period;
        self.running = true;
        self.interval = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.interval = None;
    }

    /// Change the period; a running ticker is restarted at the new rate
    pub fn reconfigure(&mut self, period: Duration) {
        if self.running {
            self.start(period);
        } else {
            self.period = period;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Resolves on the next tick; never resolves while stopped
    pub async fn tick(&mut self) {
        if !self.running {
            return std::future::pending().await;
        }

        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}
