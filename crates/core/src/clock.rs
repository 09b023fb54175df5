//! Wall-clock access and the refresh cadence of the current-time line.

use std::time::{Duration, Instant};

use chrono::{Local, Timelike};

/// How often the current-time indicator is recomputed.
pub const NOW_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Source of "now" as minutes since local midnight.
pub trait Clock {
    fn now_minutes(&self) -> u32;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_minutes(&self) -> u32 {
        let now = Local::now();
        now.hour() * 60 + now.minute()
    }
}

/// A clock pinned to one minute of the day, for tests and static exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn now_minutes(&self) -> u32 {
        self.0
    }
}

/// Poll-driven periodic timer.
///
/// The owner calls [`NowTicker::poll`] from its event loop; there is no
/// background thread, so dropping the owner stops the timer.
#[derive(Debug, Clone)]
pub struct NowTicker {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl NowTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// True on the first poll and whenever `interval` has elapsed since the
    /// last time this returned true.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_fired = Some(now);
        }
        due
    }

    /// Time until the next tick is due, for sizing an event-loop wait.
    pub fn until_due(&self, now: Instant) -> Duration {
        match self.last_fired {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Force the next poll to fire, e.g. after the schedule changed.
    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

impl Default for NowTicker {
    fn default() -> Self {
        Self::new(NOW_REFRESH_INTERVAL)
    }
}
