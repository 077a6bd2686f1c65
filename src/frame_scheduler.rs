//! Frame scheduling and timing utilities.
//!
//! Turns wall-clock instants into frame deltas for the controller, applies
//! queued setting changes, and paces frames without async or platform
//! timers. The caller is responsible for sleeping between frames.

use embassy_time::{Duration, Instant};

use crate::blink::BlinkSignal;
use crate::controller::{Controller, TickOutcome};
use crate::estimator::BrightnessProvider;
use crate::settings_processor::{SettingsEffects, SettingsProcessor};
use crate::TargetParameter;

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / DEFAULT_FPS as u64);

/// Longest delta fed to the controller in a single frame.
///
/// A stall longer than this is absorbed instead of firing every timer at once.
pub const MAX_FRAME_STEP: Duration = Duration::from_millis(250);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// Outcome of the controller tick
    pub outcome: TickOutcome,
    /// Setting changes applied before the tick
    pub settings: SettingsEffects,
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame loop around a [`Controller`]
///
/// # Usage
///
/// ```ignore
/// let mut frames = FrameScheduler::new(controller)
///     .with_settings(SettingsProcessor::new(SETTINGS.receiver()));
///
/// loop {
///     let result = frames.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, P, T, B, const SETTINGS_QUEUE: usize>
where
    P: BrightnessProvider,
    T: TargetParameter,
    B: BlinkSignal,
{
    controller: Controller<P, T, B>,
    settings: Option<SettingsProcessor<'a, SETTINGS_QUEUE>>,
    last_frame: Option<Instant>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, P, T, B, const SETTINGS_QUEUE: usize> FrameScheduler<'a, P, T, B, SETTINGS_QUEUE>
where
    P: BrightnessProvider,
    T: TargetParameter,
    B: BlinkSignal,
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(controller: Controller<P, T, B>) -> Self {
        Self::with_frame_duration(controller, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(controller: Controller<P, T, B>, frame_duration: Duration) -> Self {
        Self {
            controller,
            settings: None,
            last_frame: None,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Drain setting changes from a queue before every frame
    #[must_use]
    pub fn with_settings(mut self, processor: SettingsProcessor<'a, SETTINGS_QUEUE>) -> Self {
        self.settings = Some(processor);
        self
    }

    /// Process one frame and return timing information.
    ///
    /// The first frame runs with a zero delta.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        let max_drift = self.frame_duration.as_ticks() * 2;
        if now.as_ticks() > self.next_frame.as_ticks() + max_drift {
            self.next_frame = now;
        }

        let dt = self
            .last_frame
            .map_or(Duration::from_ticks(0), |last| {
                now.checked_duration_since(last)
                    .unwrap_or(Duration::from_ticks(0))
            })
            .min(MAX_FRAME_STEP);
        self.last_frame = Some(now);

        let settings = match self.settings.as_mut() {
            Some(processor) => processor.process_pending(self.controller.settings_mut()),
            None => SettingsEffects::default(),
        };
        let outcome = self.controller.tick(dt);

        self.next_frame += self.frame_duration;

        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        FrameResult {
            outcome,
            settings,
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub const fn controller(&self) -> &Controller<P, T, B> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<P, T, B> {
        &mut self.controller
    }

    /// Give the controller back to the host
    pub fn into_controller(self) -> Controller<P, T, B> {
        self.controller
    }
}
