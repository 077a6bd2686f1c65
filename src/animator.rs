use crate::easing::{EasingFn, linear};
use crate::math::frame_delta;

/// Durations at or below this are treated as an instant jump to the target.
pub const MIN_ANIMATION_DURATION: f32 = 1.0e-4;

/// Eased interpolation between two scalars driven by frame deltas
#[derive(Debug, Clone, Copy)]
pub struct Animator {
    /// Value at the start of the animation
    start: f32,
    /// Value reached when the animation completes
    target: f32,
    /// Total duration in seconds (0 for an instant jump)
    duration: f32,
    /// Time consumed so far, always within `[0, duration]`
    elapsed: f32,
    /// Progress shaping curve
    easing: EasingFn,
}

impl Animator {
    /// Create a new animation from `start` to `target` over `duration` seconds
    pub fn new(start: f32, target: f32, duration: f32, easing: EasingFn) -> Self {
        let duration = if duration.is_finite() && duration > MIN_ANIMATION_DURATION {
            duration
        } else {
            0.0
        };
        Self {
            start,
            target,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Create a linear animation
    pub fn linear(start: f32, target: f32, duration: f32) -> Self {
        Self::new(start, target, duration, linear)
    }

    /// Consume `dt` seconds and return the interpolated value
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + frame_delta(dt)).min(self.duration);
        self.value()
    }

    /// Interpolated value at the current elapsed time
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.target;
        }
        let progress = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.start + (self.target - self.start) * (self.easing)(progress)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub const fn start(&self) -> f32 {
        self.start
    }

    pub const fn target(&self) -> f32 {
        self.target
    }

    pub const fn duration(&self) -> f32 {
        self.duration
    }

    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Normalized progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }
}
