use std::future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::debug;

use crate::game::Phase;

/// Periodic tick source whose period follows the game speed.
///
/// The interval only exists while the game is running; any other phase
/// cancels it, and a speed change replaces it with one at the new period.
#[derive(Debug, Default)]
pub struct TickDriver {
    interval: Option<Interval>,
    period: Option<Duration>,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the timer in line with the engine's phase and speed
    pub fn sync(&mut self, phase: Phase, speed_ms: u64) {
        if phase != Phase::Running {
            if self.interval.take().is_some() {
                debug!(?phase, "tick driver stopped");
            }
            self.period = None;
            return;
        }

        let period = Duration::from_millis(speed_ms.max(1));
        if self.interval.is_some() && self.period == Some(period) {
            return;
        }

        // First tick one full period from now, like a browser setInterval
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.period = Some(period);
        debug!(period_ms = speed_ms, "tick driver started");
    }

    /// Drop the current interval so the next `sync` arms a fresh one,
    /// even when the period is unchanged
    pub fn reset(&mut self) {
        self.interval = None;
        self.period = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Wait for the next tick; never resolves while stopped
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}
