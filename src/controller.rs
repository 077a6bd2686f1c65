//! Pupil controller - the main orchestrator
//!
//! Owns the brightness provider, the target parameter and the blink signal,
//! and runs the brightness-to-dilation loop once per [`Controller::tick`].
//!
//! The controller does not touch the target until every external handle
//! reports ready; until then ticks return [`TickOutcome::Waiting`]. Faults
//! inside a tick are reported as [`TickOutcome::Degraded`] and never stop the
//! loop: the output freezes at its last committed value instead.

use core::fmt;

use embassy_time::Duration;

use crate::blink::{BlinkSignal, blink_dimming};
use crate::estimator::{BrightnessProvider, BrightnessSample, CaptureError};
use crate::macros::diag;
use crate::math::{frame_delta, seconds};
use crate::scheduler::{AnimationCurves, AnimationKind, DilationScheduler, SchedulerPhase};
use crate::settings::{SettingChange, Settings, SettingsError};
use crate::{ParameterError, TargetParameter};

/// Seed used when the host does not provide one
pub const DEFAULT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Construction-time configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerConfig {
    pub settings: Settings,
    pub curves: AnimationCurves,
    /// Seed for idle timing and strength draws; `None` uses [`DEFAULT_SEED`]
    pub seed: Option<u64>,
}

/// External handles the controller drives
pub struct ControllerContext<P, T, B> {
    pub provider: P,
    pub target: T,
    pub blink: B,
}

/// Lifecycle of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Waiting for the external handles
    Pending,
    Running,
    /// Torn down; ticks are no-ops until [`Controller::resume`]
    Shutdown,
}

/// Fault observed during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickFault {
    /// Writing the target parameter failed
    TargetWrite(ParameterError),
    /// The provider produced a sample outside `[0, 1]` or not finite
    InvalidSample,
    /// The target parameter holds a value that is not finite
    NonFiniteOutput,
    /// The brightness provider reported a capture failure
    Capture(CaptureError),
}

impl fmt::Display for TickFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetWrite(error) => write!(f, "target write failed: {error}"),
            Self::InvalidSample => f.write_str("brightness sample rejected"),
            Self::NonFiniteOutput => f.write_str("target parameter is not finite"),
            Self::Capture(error) => write!(f, "brightness capture failed: {error}"),
        }
    }
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// External handles are not ready; nothing ran
    Waiting,
    /// The host froze animation; nothing ran
    Frozen,
    /// The controller is shut down
    Inactive,
    /// The tick completed
    Ok,
    /// The tick completed partially; state committed before the fault is kept
    Degraded(TickFault),
}

impl TickOutcome {
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

pub struct Controller<P, T, B>
where
    P: BrightnessProvider,
    T: TargetParameter,
    B: BlinkSignal,
{
    // External dependencies and configuration
    provider: P,
    target: T,
    blink: B,
    settings: Settings,

    // Internal state
    lifecycle: Lifecycle,
    frozen: bool,
    sample: BrightnessSample,
    scheduler: DilationScheduler,
    last_started: Option<AnimationKind>,
}

impl<P, T, B> Controller<P, T, B>
where
    P: BrightnessProvider,
    T: TargetParameter,
    B: BlinkSignal,
{
    /// Create a controller from its external handles
    pub fn init(context: ControllerContext<P, T, B>, config: &ControllerConfig) -> Self {
        let ControllerContext {
            mut provider,
            target,
            blink,
        } = context;
        provider.set_poll_interval(config.settings.poll_interval());

        Self {
            provider,
            target,
            blink,
            settings: config.settings,
            lifecycle: Lifecycle::Pending,
            frozen: false,
            sample: BrightnessSample::default(),
            scheduler: DilationScheduler::new(
                config.curves,
                config.seed.unwrap_or(DEFAULT_SEED),
            ),
            last_started: None,
        }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings; changes take effect on the next tick
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn apply_setting(&mut self, change: SettingChange) -> Result<(), SettingsError> {
        self.settings.apply(change)
    }

    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub const fn scheduler(&self) -> &DilationScheduler {
        &self.scheduler
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.scheduler.phase()
    }

    /// Animation started by the most recent tick
    pub const fn last_started(&self) -> Option<AnimationKind> {
        self.last_started
    }

    /// Latest brightness sample (stale between polls)
    pub const fn sample(&self) -> BrightnessSample {
        self.sample
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub const fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn blink_mut(&mut self) -> &mut B {
        &mut self.blink
    }

    /// Pause or resume ticking without losing state
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn handles_ready(&self) -> bool {
        self.target.is_ready() && self.provider.is_ready()
    }

    /// Keep the provider's poll interval in step with the settings
    fn sync_poll_interval(&mut self) {
        let interval = self.settings.poll_interval();
        if self.provider.poll_interval() != interval {
            self.provider.set_poll_interval(interval);
        }
    }

    /// Run one frame of the control loop
    pub fn tick(&mut self, dt: Duration) -> TickOutcome {
        self.last_started = None;

        match self.lifecycle {
            Lifecycle::Shutdown => return TickOutcome::Inactive,
            Lifecycle::Pending => {
                if !self.handles_ready() {
                    return TickOutcome::Waiting;
                }
                if let Err(error) = self.target.write(self.settings.neutral()) {
                    return self.degrade(TickFault::TargetWrite(error));
                }
                diag!(info, "[Controller] handles ready, running");
                self.lifecycle = Lifecycle::Running;
            }
            Lifecycle::Running => {
                if !self.handles_ready() {
                    return TickOutcome::Waiting;
                }
            }
        }

        if self.frozen {
            return TickOutcome::Frozen;
        }

        match self.step(frame_delta(seconds(dt))) {
            Ok(()) => TickOutcome::Ok,
            Err(fault) => self.degrade(fault),
        }
    }

    fn degrade(&self, fault: TickFault) -> TickOutcome {
        diag!(warn, "[Controller] degraded tick: {}", fault);
        TickOutcome::Degraded(fault)
    }

    fn step(&mut self, dt: f32) -> Result<(), TickFault> {
        self.sync_poll_interval();

        if let Some(value) = self.scheduler.advance(dt, &self.settings) {
            self.target.write(value).map_err(TickFault::TargetWrite)?;
            self.scheduler.commit(&self.settings);
        }

        let mut fault = None;
        match self.provider.poll(dt) {
            Some(sample) if sample.is_valid() => self.sample = sample,
            Some(_) => fault = Some(TickFault::InvalidSample),
            None => {}
        }
        if let Some(error) = self.provider.take_fault() {
            fault = Some(TickFault::Capture(error));
        }

        let current = self.target.read();
        if !current.is_finite() {
            return Err(TickFault::NonFiniteOutput);
        }

        let brightness = self.sample.brightness * blink_dimming(&self.blink);
        self.last_started = self
            .scheduler
            .schedule(dt, brightness, current, &self.settings);

        fault.map_or(Ok(()), Err)
    }

    /// Return the target to neutral and forget all scheduling state
    pub fn reset(&mut self) -> Result<(), ParameterError> {
        self.scheduler.reset();
        self.sample = BrightnessSample::default();
        self.last_started = None;
        self.target.write(self.settings.neutral())
    }

    /// Tear down: release capture resources, restore the target to neutral,
    /// then discard scheduling state
    pub fn shutdown(&mut self) -> Result<(), ParameterError> {
        self.provider.release();
        let restored = if self.target.is_ready() {
            self.target.write(self.settings.neutral())
        } else {
            Err(ParameterError::Unavailable)
        };
        self.scheduler.reset();
        self.sample = BrightnessSample::default();
        self.last_started = None;
        self.lifecycle = Lifecycle::Shutdown;
        diag!(info, "[Controller] shut down");
        restored
    }

    /// Restart after [`Controller::shutdown`]; the next ready tick re-initializes
    pub fn resume(&mut self) {
        if self.lifecycle == Lifecycle::Shutdown {
            self.lifecycle = Lifecycle::Pending;
        }
    }
}
