//! Scalar helpers shared by the estimators and the scheduler.
//!
//! `lerp`, `inverse_lerp` and `smooth_step` clamp their interpolant to
//! `[0, 1]`, matching the game-engine conventions the tuning constants were
//! picked against.

use embassy_time::Duration;

const MICROS_PER_SECOND: f32 = 1_000_000.0;

/// Clamp a value to `[0, 1]`. NaN collapses to 0.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Linear interpolation with `t` clamped to `[0, 1]`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`
///
/// Returns 0 when `a == b`.
#[inline]
#[allow(clippy::float_cmp)]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    clamp01((value - a) / (b - a))
}

/// Hermite interpolation from `from` to `to`
#[inline]
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = clamp01(t);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}

/// Duration as fractional seconds
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn seconds(duration: Duration) -> f32 {
    duration.as_micros() as f32 / MICROS_PER_SECOND
}

/// Fractional seconds as a duration
///
/// Negative and non-finite inputs map to zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn duration_from_secs(secs: f32) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::from_micros(0);
    }
    Duration::from_micros(libm::roundf(secs * MICROS_PER_SECOND) as u64)
}

/// Sanitize a frame delta: NaN, infinities and negative deltas become zero.
#[inline]
pub(crate) fn frame_delta(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}
