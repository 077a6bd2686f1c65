use embassy_time::Duration;

use crate::math::seconds;

/// Countdown between brightness samples
///
/// The timer starts due, so the first poll produces a sample immediately.
/// A zero interval keeps it due on every tick.
#[derive(Debug, Clone, Copy)]
pub struct PollTimer {
    interval: Duration,
    countdown: f32,
}

impl PollTimer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            countdown: 0.0,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval, shortening a pending countdown if needed
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.countdown = self.countdown.min(seconds(interval));
    }

    /// Consume `dt` seconds of the countdown
    pub fn advance(&mut self, dt: f32) {
        self.countdown -= dt;
    }

    pub fn is_due(&self) -> bool {
        self.countdown <= 0.0
    }

    /// Schedule the next sample one interval later
    ///
    /// Overshoot from the previous period is carried over so the average
    /// sampling rate matches the interval.
    pub fn rearm(&mut self) {
        self.countdown = (self.countdown + seconds(self.interval)).max(0.0);
    }

    /// Make the timer due on the next poll
    pub fn reset(&mut self) {
        self.countdown = 0.0;
    }
}
