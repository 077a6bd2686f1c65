//! Brightness estimation
//!
//! A [`BrightnessProvider`] produces a [`BrightnessSample`] once per poll
//! interval and nothing in between; the caller keeps the previous sample.
//! Two interchangeable providers ship with the crate:
//! - [`ImageSampler`]: periodic low-resolution capture + pixel averaging
//! - [`LightEstimator`]: geometric evaluation of a light inventory

mod image_sampler;
mod light_estimator;
mod poll_timer;

use core::fmt;

use embassy_time::Duration;
pub use image_sampler::{
    CAPTURE_HEIGHT, CAPTURE_WIDTH, CaptureBackend, CaptureSize, CaptureStatus, ImageSampler,
    SamplerPhase,
};
pub use light_estimator::{
    LIGHT_GAIN, Light, LightEstimator, LightEstimatorConfig, LightInventory, LightKind,
    LightScene, MAX_LIGHT_INTENSITY, SPOT_CONE_FUDGE, estimate_brightness, perceived_intensity,
};
pub use poll_timer::PollTimer;

use crate::color::LinearColor;
use crate::math::clamp01;

/// Default interval between brightness samples (250 ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Ambient brightness reaching the eyes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrightnessSample {
    /// Normalized brightness in `[0, 1]`
    pub brightness: f32,
    /// Averaged color, when the provider measures one
    pub color: Option<LinearColor>,
}

impl BrightnessSample {
    /// Create a sample, clamping brightness to `[0, 1]`
    pub fn new(brightness: f32) -> Self {
        Self {
            brightness: clamp01(brightness),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: LinearColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Whether the sample can be fed to the scheduler
    pub fn is_valid(&self) -> bool {
        self.brightness.is_finite()
            && (0.0..=1.0).contains(&self.brightness)
            && self.color.is_none_or(LinearColor::is_finite)
    }
}

/// Failure reported by a capture backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// The capture surface or view does not exist (yet)
    Unavailable,
    /// The backend could not start a capture
    RequestRejected,
    /// Pixel readback failed
    ReadbackFailed,
    /// Readback returned no pixels
    EmptyFrame,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("capture surface unavailable"),
            Self::RequestRejected => f.write_str("capture request rejected"),
            Self::ReadbackFailed => f.write_str("pixel readback failed"),
            Self::EmptyFrame => f.write_str("captured frame is empty"),
        }
    }
}

/// Source of brightness samples
///
/// Implementations must not block: anything that takes longer than a frame
/// has to be spread across several `poll` calls.
pub trait BrightnessProvider {
    /// Advance internal timers by `dt` seconds
    ///
    /// Returns a new sample only when the poll interval has elapsed.
    fn poll(&mut self, dt: f32) -> Option<BrightnessSample>;

    /// Current interval between samples
    fn poll_interval(&self) -> Duration;

    /// Change the interval between samples. Zero polls on every tick.
    fn set_poll_interval(&mut self, interval: Duration);

    /// Whether external resources the provider needs exist yet
    fn is_ready(&self) -> bool {
        true
    }

    /// Take the last failure observed since the previous call
    fn take_fault(&mut self) -> Option<CaptureError> {
        None
    }

    /// Release any outstanding capture or render resources
    fn release(&mut self) {}
}
