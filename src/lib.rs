#![no_std]

pub mod animator;
pub mod blink;
pub mod channel;
pub mod color;
pub mod controller;
pub mod easing;
pub mod estimator;
pub mod frame_scheduler;
pub mod geometry;
mod macros;
pub mod math;
pub mod scheduler;
pub mod settings;
pub mod settings_processor;

use core::fmt;

pub use animator::Animator;
pub use blink::{BlinkSignal, BlinkWeight, EyesOpen, blink_dimming};
pub use channel::{QueueFull, SettingsChannel, SettingsReceiver, SettingsSender};
pub use controller::{
    Controller, ControllerConfig, ControllerContext, Lifecycle, TickFault, TickOutcome,
};
pub use easing::{Easing, EasingFn};
pub use estimator::{
    BrightnessProvider, BrightnessSample, CaptureBackend, CaptureError, ImageSampler, Light,
    LightEstimator, LightInventory, LightKind, LightScene,
};
pub use frame_scheduler::FrameScheduler;
pub use geometry::Vec3;
pub use scheduler::{AnimationCurves, AnimationKind, DilationScheduler, SchedulerPhase, transfer};
pub use settings::{SettingChange, Settings, SettingsError};
pub use settings_processor::{SettingsEffects, SettingsProcessor};

pub use color::{LinearColor, Rgb};
pub use embassy_time::{Duration, Instant};

/// Failure writing the target parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// The parameter handle has not been resolved (yet)
    Unavailable,
    /// The host refused the value
    Rejected,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("target parameter unavailable"),
            Self::Rejected => f.write_str("target parameter rejected the value"),
        }
    }
}

/// Numeric sink driven by the controller (e.g. a pupil dilation morph)
///
/// Implement this trait to connect the controller to a host. The handle is
/// resolved once by the host; the controller never looks parameters up.
pub trait TargetParameter {
    /// Whether the host handle exists yet
    fn is_ready(&self) -> bool {
        true
    }

    /// Current value of the parameter
    fn read(&self) -> f32;

    /// Write a new value
    fn write(&mut self, value: f32) -> Result<(), ParameterError>;
}
