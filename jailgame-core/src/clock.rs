//! Simulation time.
//!
//! Wall time comes in from the loop as a [`Duration`] since session start.
//! Simulation time only moves while unpaused, so every accrual timer is
//! measured against it and a pause neither pays out nor skips days.

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now: Duration,
    last_wall: Option<Duration>,
    paused: bool,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest wall time; returns the current simulation time.
    ///
    /// Wall time that goes backwards is treated as no progress.
    pub fn advance(&mut self, wall: Duration) -> Duration {
        if let Some(last) = self.last_wall {
            if !self.paused {
                self.now += wall.saturating_sub(last);
            }
        }
        self.last_wall = Some(wall);
        self.now
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause state, returning the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

/// A "has at least `interval` passed since the last reset" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    last: Duration,
    interval: Duration,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            last: Duration::ZERO,
            interval,
        }
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now.saturating_sub(self.last) >= self.interval
    }

    /// Whole intervals elapsed since the last reset.
    pub fn elapsed_intervals(&self, now: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        (now.saturating_sub(self.last).as_nanos() / self.interval.as_nanos()) as u32
    }

    /// Restart from `now`, discarding any partial interval.
    pub fn reset(&mut self, now: Duration) {
        self.last = now;
    }
}
