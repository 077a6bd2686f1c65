//! Runtime-adjustable controller settings
//!
//! Every value has a documented range. Setters clamp to that range and
//! nothing else, so a value read back before the next tick is exactly the
//! value written when it was in range.

use core::fmt;

use embassy_time::Duration;

use crate::estimator::DEFAULT_POLL_INTERVAL;

/// Inclusive range of a setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> SettingRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range
    pub fn clamp(self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

pub const POLL_INTERVAL_RANGE: SettingRange<Duration> =
    SettingRange::new(Duration::from_millis(0), Duration::from_secs(5));
pub const ADJUST_DURATION_RANGE: SettingRange<Duration> =
    SettingRange::new(Duration::from_millis(0), Duration::from_secs(10));
pub const IDLE_DELAY_RANGE: SettingRange<Duration> =
    SettingRange::new(Duration::from_millis(0), Duration::from_secs(10));
pub const THROTTLE_RANGE: SettingRange<Duration> =
    SettingRange::new(Duration::from_millis(0), Duration::from_secs(1));
pub const IDLE_STRENGTH_RANGE: SettingRange<f32> = SettingRange::new(0.0, 1.0);
pub const NEUTRAL_RANGE: SettingRange<f32> = SettingRange::new(-1.5, 2.0);
pub const CHANGE_THRESHOLD_RANGE: SettingRange<f32> = SettingRange::new(0.0, 1.0);

/// Default bounds written to the target parameter
pub const DEFAULT_OUTPUT_RANGE: SettingRange<f32> = SettingRange::new(-1.5, 2.0);

/// Rejected setting value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// NaN or infinite value
    NonFinite,
    /// Output range with `min > max`
    InvertedRange,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => f.write_str("setting value is not finite"),
            Self::InvertedRange => f.write_str("output range minimum exceeds maximum"),
        }
    }
}

/// A single setting change, as queued by a host UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    PollInterval(Duration),
    LightAdjust(Duration),
    DarkAdjust(Duration),
    IdleAdjust(Duration),
    IdleStrength(f32),
    IdleMaxDelay(Duration),
    ReactiveThrottle(Duration),
    Neutral(f32),
    OutputRange { min: f32, max: f32 },
    ChangeThreshold(f32),
}

/// Controller settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    poll_interval: Duration,
    light_adjust: Duration,
    dark_adjust: Duration,
    idle_adjust: Duration,
    idle_strength: f32,
    idle_max_delay: Duration,
    reactive_throttle: Duration,
    neutral: f32,
    output_range: SettingRange<f32>,
    change_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            light_adjust: Duration::from_millis(3_500),
            dark_adjust: Duration::from_millis(5_000),
            idle_adjust: Duration::from_millis(1_000),
            idle_strength: 0.05,
            idle_max_delay: Duration::from_millis(2_500),
            reactive_throttle: Duration::from_millis(50),
            neutral: 0.0,
            output_range: DEFAULT_OUTPUT_RANGE,
            change_threshold: 0.0,
        }
    }
}

fn finite(value: f32) -> Result<f32, SettingsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SettingsError::NonFinite)
    }
}

impl Settings {
    /// Interval between brightness samples
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = POLL_INTERVAL_RANGE.clamp(interval);
    }

    /// Duration of a reaction towards a lower target (the eye adjusting from light)
    pub const fn light_adjust(&self) -> Duration {
        self.light_adjust
    }

    pub fn set_light_adjust(&mut self, duration: Duration) {
        self.light_adjust = ADJUST_DURATION_RANGE.clamp(duration);
    }

    /// Duration of a reaction towards a higher target (the eye adjusting from dark)
    pub const fn dark_adjust(&self) -> Duration {
        self.dark_adjust
    }

    pub fn set_dark_adjust(&mut self, duration: Duration) {
        self.dark_adjust = ADJUST_DURATION_RANGE.clamp(duration);
    }

    /// Duration of one idle perturbation
    pub const fn idle_adjust(&self) -> Duration {
        self.idle_adjust
    }

    pub fn set_idle_adjust(&mut self, duration: Duration) {
        self.idle_adjust = ADJUST_DURATION_RANGE.clamp(duration);
    }

    /// Upper bound of the random idle offset
    pub const fn idle_strength(&self) -> f32 {
        self.idle_strength
    }

    pub fn set_idle_strength(&mut self, strength: f32) -> Result<(), SettingsError> {
        self.idle_strength = IDLE_STRENGTH_RANGE.clamp(finite(strength)?);
        Ok(())
    }

    /// Upper bound of the random delay before an idle perturbation
    pub const fn idle_max_delay(&self) -> Duration {
        self.idle_max_delay
    }

    pub fn set_idle_max_delay(&mut self, delay: Duration) {
        self.idle_max_delay = IDLE_DELAY_RANGE.clamp(delay);
    }

    /// Minimum interval between reactive restarts
    pub const fn reactive_throttle(&self) -> Duration {
        self.reactive_throttle
    }

    pub fn set_reactive_throttle(&mut self, throttle: Duration) {
        self.reactive_throttle = THROTTLE_RANGE.clamp(throttle);
    }

    /// Resting value of the target parameter
    pub const fn neutral(&self) -> f32 {
        self.neutral
    }

    pub fn set_neutral(&mut self, neutral: f32) -> Result<(), SettingsError> {
        self.neutral = NEUTRAL_RANGE.clamp(finite(neutral)?);
        Ok(())
    }

    /// Bounds applied to every value written to the target parameter
    pub const fn output_range(&self) -> SettingRange<f32> {
        self.output_range
    }

    pub fn set_output_range(&mut self, min: f32, max: f32) -> Result<(), SettingsError> {
        let (min, max) = (finite(min)?, finite(max)?);
        if min > max {
            return Err(SettingsError::InvertedRange);
        }
        self.output_range = SettingRange::new(min, max);
        Ok(())
    }

    /// Largest brightness difference still treated as "unchanged"
    ///
    /// Zero compares samples for exact equality.
    pub const fn change_threshold(&self) -> f32 {
        self.change_threshold
    }

    pub fn set_change_threshold(&mut self, threshold: f32) -> Result<(), SettingsError> {
        self.change_threshold = CHANGE_THRESHOLD_RANGE.clamp(finite(threshold)?);
        Ok(())
    }

    /// Apply a queued change
    pub fn apply(&mut self, change: SettingChange) -> Result<(), SettingsError> {
        match change {
            SettingChange::PollInterval(interval) => self.set_poll_interval(interval),
            SettingChange::LightAdjust(duration) => self.set_light_adjust(duration),
            SettingChange::DarkAdjust(duration) => self.set_dark_adjust(duration),
            SettingChange::IdleAdjust(duration) => self.set_idle_adjust(duration),
            SettingChange::IdleStrength(strength) => return self.set_idle_strength(strength),
            SettingChange::IdleMaxDelay(delay) => self.set_idle_max_delay(delay),
            SettingChange::ReactiveThrottle(throttle) => self.set_reactive_throttle(throttle),
            SettingChange::Neutral(neutral) => return self.set_neutral(neutral),
            SettingChange::OutputRange { min, max } => return self.set_output_range(min, max),
            SettingChange::ChangeThreshold(threshold) => {
                return self.set_change_threshold(threshold);
            }
        }
        Ok(())
    }
}
