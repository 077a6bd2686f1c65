//! Dilation scheduler
//!
//! Decides, once per tick, which animation drives the pupil:
//! - a brightness change starts a reactive animation, replacing whatever is
//!   running (light always wins), at most once per throttle interval
//! - stable brightness with nothing running starts an idle perturbation
//!   after a random delay, alternating its direction every time
//!
//! At most one animation is live; starting a new one discards the old one.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::animator::Animator;
use crate::easing::Easing;
use crate::macros::diag;
use crate::math::{lerp, seconds};
use crate::settings::Settings;

/// Lower bound of the random idle delay and the idle offset
pub const MIN_IDLE_STEP: f32 = 0.01;

/// Shortest idle animation in seconds
pub const MIN_IDLE_DURATION: f32 = 0.01;

/// Output bounds of the brightness transfer function
pub const TRANSFER_MIN: f32 = -1.0;
pub const TRANSFER_MAX: f32 = 1.5;

/// Map brightness to a dilation target
///
/// Brighter light maps to lower values. The result stays within
/// `[-1.5, 1.0]` for `neutral = 0`.
pub fn transfer(brightness: f32, neutral: f32) -> f32 {
    -(neutral + lerp(TRANSFER_MIN, TRANSFER_MAX, brightness)).clamp(TRANSFER_MIN, TRANSFER_MAX)
}

/// Why an animation was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Brightness-driven response
    Reactive,
    /// Small random perturbation while brightness is stable
    Idle,
}

/// Observable scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    /// No animation is live
    Settled,
    IdleAnimating,
    ReactiveAnimating,
}

/// Easing curves for both animation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCurves {
    pub reactive: Easing,
    pub idle: Easing,
}

impl Default for AnimationCurves {
    fn default() -> Self {
        Self {
            reactive: Easing::ElasticOut,
            idle: Easing::BackOut,
        }
    }
}

/// The live animation
#[derive(Debug, Clone, Copy)]
pub struct ActiveAnimation {
    pub kind: AnimationKind,
    pub animator: Animator,
}

/// Uniform draw between two bounds given in any order
fn uniform(rng: &mut SmallRng, a: f32, b: f32) -> f32 {
    let t: f32 = rng.random();
    a + (b - a) * t
}

pub struct DilationScheduler {
    idle_countdown: f32,
    idle_sign: f32,
    last_brightness: f32,
    /// Brightness behind the most recent reaction
    reference_brightness: f32,
    reactive_throttle: f32,
    animation: Option<ActiveAnimation>,
    curves: AnimationCurves,
    rng: SmallRng,
}

impl DilationScheduler {
    pub fn new(curves: AnimationCurves, seed: u64) -> Self {
        Self {
            idle_countdown: 0.0,
            idle_sign: 1.0,
            last_brightness: 0.0,
            reference_brightness: 0.0,
            reactive_throttle: 0.0,
            animation: None,
            curves,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> SchedulerPhase {
        match self.animation {
            None => SchedulerPhase::Settled,
            Some(ActiveAnimation {
                kind: AnimationKind::Idle,
                ..
            }) => SchedulerPhase::IdleAnimating,
            Some(ActiveAnimation {
                kind: AnimationKind::Reactive,
                ..
            }) => SchedulerPhase::ReactiveAnimating,
        }
    }

    pub const fn animation(&self) -> Option<&ActiveAnimation> {
        self.animation.as_ref()
    }

    pub const fn idle_countdown(&self) -> f32 {
        self.idle_countdown
    }

    /// Direction of the most recent idle perturbation
    pub const fn idle_sign(&self) -> f32 {
        self.idle_sign
    }

    pub const fn last_brightness(&self) -> f32 {
        self.last_brightness
    }

    pub const fn reference_brightness(&self) -> f32 {
        self.reference_brightness
    }

    pub const fn reactive_throttle(&self) -> f32 {
        self.reactive_throttle
    }

    pub const fn curves(&self) -> AnimationCurves {
        self.curves
    }

    /// Forget all timers and the live animation. The random stream continues.
    pub fn reset(&mut self) {
        self.idle_countdown = 0.0;
        self.idle_sign = 1.0;
        self.last_brightness = 0.0;
        self.reference_brightness = 0.0;
        self.reactive_throttle = 0.0;
        self.animation = None;
    }

    /// Advance the live animation by `dt` seconds
    ///
    /// Returns the value to write to the target, clamped to the output range.
    /// A finished animation stays live until [`DilationScheduler::commit`],
    /// so a value the target refused is offered again on the next tick.
    pub fn advance(&mut self, dt: f32, settings: &Settings) -> Option<f32> {
        self.reactive_throttle -= dt;

        let active = self.animation.as_mut()?;
        let range = settings.output_range();
        Some(active.animator.advance(dt).clamp(range.min, range.max))
    }

    /// Acknowledge that the last advanced value reached the target
    ///
    /// Drops a finished animation and re-arms the idle delay.
    pub fn commit(&mut self, settings: &Settings) {
        let finished = self
            .animation
            .is_some_and(|active| active.animator.is_finished());
        if finished {
            self.animation = None;
            let max_delay = seconds(settings.idle_max_delay()).max(MIN_IDLE_STEP);
            self.idle_countdown = uniform(&mut self.rng, MIN_IDLE_STEP, max_delay);
        }
    }

    /// Exact comparison with the previous tick, or a tolerance around the
    /// brightness of the last reaction so slow drifts still add up
    #[allow(clippy::float_cmp)]
    fn is_unchanged(&self, brightness: f32, threshold: f32) -> bool {
        if threshold > 0.0 {
            (brightness - self.reference_brightness).abs() <= threshold
        } else {
            brightness == self.last_brightness
        }
    }

    /// Decide whether to start a new animation
    ///
    /// `current` is the value the target holds right now; new animations
    /// start from it. Returns the kind of animation started, if any.
    pub fn schedule(
        &mut self,
        dt: f32,
        brightness: f32,
        current: f32,
        settings: &Settings,
    ) -> Option<AnimationKind> {
        let target = transfer(brightness, settings.neutral());

        let started = if self.is_unchanged(brightness, settings.change_threshold()) {
            if self.animation.is_none() && self.idle_countdown < 0.0 {
                self.idle_sign = -self.idle_sign;
                let offset = self.idle_sign
                    * uniform(&mut self.rng, MIN_IDLE_STEP, settings.idle_strength());
                let duration = seconds(settings.idle_adjust()).max(MIN_IDLE_DURATION);
                self.start(AnimationKind::Idle, current, target + offset, duration);
                Some(AnimationKind::Idle)
            } else {
                self.idle_countdown -= dt;
                None
            }
        } else if self.reactive_throttle <= 0.0 {
            // Named after the light level the eye adjusts from
            let duration = if target > current {
                settings.dark_adjust()
            } else {
                settings.light_adjust()
            };
            self.start(AnimationKind::Reactive, current, target, seconds(duration));
            self.reactive_throttle = seconds(settings.reactive_throttle());
            self.reference_brightness = brightness;
            Some(AnimationKind::Reactive)
        } else {
            None
        };

        self.last_brightness = brightness;
        started
    }

    fn start(&mut self, kind: AnimationKind, from: f32, to: f32, duration: f32) {
        let easing = match kind {
            AnimationKind::Reactive => self.curves.reactive,
            AnimationKind::Idle => self.curves.idle,
        };
        diag!(
            debug,
            "[DilationScheduler] {:?} {} -> {} over {}s ({})",
            kind,
            from,
            to,
            duration,
            easing.as_str()
        );
        self.animation = Some(ActiveAnimation {
            kind,
            animator: Animator::new(from, to, duration, easing.as_fn()),
        });
    }
}
