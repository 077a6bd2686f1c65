//! Blink dimming
//!
//! Closing eyelids shade the eyes. Above [`BLINK_THRESHOLD`] the brightness
//! multiplier eases from 1.0 down to [`CLOSED_EYE_DIMMING`] as the lid
//! closes.

use crate::math::{inverse_lerp, smooth_step};

/// Closure below which the lids do not shade the eyes
pub const BLINK_THRESHOLD: f32 = 0.35;

/// Brightness multiplier with fully closed lids
pub const CLOSED_EYE_DIMMING: f32 = 0.25;

/// Eyelid state read from the host
///
/// Both signals are in `[0, 1]` where 1 is fully closed. Absent signals mean
/// the eyes are open.
pub trait BlinkSignal {
    /// Weight of the automatic blink animation
    fn blink_weight(&self) -> Option<f32>;

    /// Eyelid closure from a manual pose, used when the blink is below threshold
    fn eyelid_closure(&self) -> Option<f32> {
        None
    }
}

/// Blink source for characters without eyelid control
#[derive(Debug, Clone, Copy, Default)]
pub struct EyesOpen;

impl BlinkSignal for EyesOpen {
    fn blink_weight(&self) -> Option<f32> {
        None
    }
}

/// Fixed blink weight, mostly useful for hosts that sample the lids themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct BlinkWeight(pub f32);

impl BlinkSignal for BlinkWeight {
    fn blink_weight(&self) -> Option<f32> {
        Some(self.0)
    }
}

/// Multiplier for a single closure value
pub fn dimming_for(closure: f32) -> f32 {
    if closure > BLINK_THRESHOLD {
        smooth_step(1.0, CLOSED_EYE_DIMMING, inverse_lerp(BLINK_THRESHOLD, 1.0, closure))
    } else {
        1.0
    }
}

/// Brightness multiplier in `[CLOSED_EYE_DIMMING, 1]`
pub fn blink_dimming<B: BlinkSignal + ?Sized>(signal: &B) -> f32 {
    let shaded = |value: Option<f32>| value.filter(|closure| *closure > BLINK_THRESHOLD);

    shaded(signal.blink_weight())
        .or_else(|| shaded(signal.eyelid_closure()))
        .map_or(1.0, dimming_for)
}
