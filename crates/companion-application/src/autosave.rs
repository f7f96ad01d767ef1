//! Time-based autosave trigger driven by the host's periodic tick.

use std::time::Duration;

/// Something that can be saved on demand.
pub trait SaveTarget {
    type Error;

    fn save(&mut self) -> Result<(), Self::Error>;
}

/// Accumulates elapsed tick time and fires once the interval is reached.
///
/// The accumulator resets to zero on every trigger, so a long stall yields
/// one save, not a burst of catch-up saves.
#[derive(Debug, Clone)]
pub struct AutosavePolicy {
    interval: Duration,
    accumulated: Duration,
}

impl AutosavePolicy {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Changes the interval without touching accumulated time.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Restarts the countdown, e.g. after a manual save.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Advances the timer. Returns `true` when a save is due.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
            return true;
        }
        false
    }

    /// Advances the timer and saves `target` when due.
    ///
    /// Returns `None` when no save was due, otherwise the save outcome. A
    /// failed save still restarts the countdown.
    pub fn tick_and_save<T: SaveTarget>(
        &mut self,
        elapsed: Duration,
        target: &mut T,
    ) -> Option<Result<(), T::Error>> {
        if !self.tick(elapsed) {
            return None;
        }
        tracing::debug!("[AutosavePolicy] Interval reached, saving");
        Some(target.save())
    }
}
