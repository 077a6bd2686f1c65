//! Image sampler
//!
//! Estimates brightness from a small offscreen snapshot of the view in front
//! of the eyes. The capture spans several ticks:
//!
//! `Idle` (waiting for the poll timer) -> `Capturing` (snapshot requested,
//! pixels not yet available) -> `Ready` (pixels available for readback) ->
//! `Idle`.
//!
//! There is no capture timeout: a backend that never completes stalls
//! brightness updates but never the tick loop.

use embassy_time::Duration;

use super::{BrightnessProvider, BrightnessSample, CaptureError, PollTimer};
use crate::color::{Rgb, average_pixels};
use crate::macros::diag;

/// Snapshot width in pixels
pub const CAPTURE_WIDTH: u16 = 128;
/// Snapshot height in pixels
pub const CAPTURE_HEIGHT: u16 = 128;

/// Resolution of the offscreen capture surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSize {
    pub width: u16,
    pub height: u16,
}

impl CaptureSize {
    pub const DEFAULT: Self = Self {
        width: CAPTURE_WIDTH,
        height: CAPTURE_HEIGHT,
    };

    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Progress of a requested capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    /// Snapshot requested, not rendered yet
    Pending,
    /// Pixels can be read back
    Ready,
    /// The capture was abandoned by the backend
    Failed(CaptureError),
}

/// Host rendering capability used by [`ImageSampler`]
pub trait CaptureBackend {
    /// Whether the capture surface has been created
    fn is_ready(&self) -> bool {
        true
    }

    /// Ask the host to render the next frame into the capture surface
    fn request_capture(&mut self, size: CaptureSize) -> Result<(), CaptureError>;

    /// Check on the last requested capture
    fn poll_capture(&mut self) -> CaptureStatus;

    /// Read back the captured pixels
    fn read_pixels(&mut self) -> Result<&[Rgb], CaptureError>;

    /// Stop capturing and free the surface
    fn release(&mut self);
}

/// Phase of the capture pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerPhase {
    Idle,
    Capturing,
    Ready,
}

/// Brightness provider averaging captured pixels
pub struct ImageSampler<B: CaptureBackend> {
    backend: B,
    phase: SamplerPhase,
    timer: PollTimer,
    size: CaptureSize,
    fault: Option<CaptureError>,
}

impl<B: CaptureBackend> ImageSampler<B> {
    pub const fn new(backend: B, poll_interval: Duration) -> Self {
        Self {
            backend,
            phase: SamplerPhase::Idle,
            timer: PollTimer::new(poll_interval),
            size: CaptureSize::DEFAULT,
            fault: None,
        }
    }

    pub const fn phase(&self) -> SamplerPhase {
        self.phase
    }

    pub const fn capture_size(&self) -> CaptureSize {
        self.size
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Average the captured frame into a sample
    fn read_back(&mut self) -> Result<BrightnessSample, CaptureError> {
        let pixels = self.backend.read_pixels()?;
        let color = average_pixels(pixels).ok_or(CaptureError::EmptyFrame)?;
        Ok(BrightnessSample::new(color.luminance()).with_color(color))
    }

    fn fail(&mut self, error: CaptureError) {
        diag!(warn, "[ImageSampler] capture failed: {}", error);
        self.fault = Some(error);
    }

    fn request(&mut self) {
        match self.backend.request_capture(self.size) {
            Ok(()) => self.phase = SamplerPhase::Capturing,
            Err(error) => {
                self.fail(error);
                self.timer.rearm();
            }
        }
    }
}

impl<B: CaptureBackend> BrightnessProvider for ImageSampler<B> {
    fn poll(&mut self, dt: f32) -> Option<BrightnessSample> {
        if self.phase == SamplerPhase::Capturing {
            match self.backend.poll_capture() {
                CaptureStatus::Pending => return None,
                CaptureStatus::Ready => self.phase = SamplerPhase::Ready,
                CaptureStatus::Failed(error) => {
                    self.fail(error);
                    self.phase = SamplerPhase::Idle;
                    self.timer.rearm();
                    return None;
                }
            }
        }

        let mut sample = None;
        if self.phase == SamplerPhase::Ready {
            match self.read_back() {
                Ok(value) => sample = Some(value),
                Err(error) => self.fail(error),
            }
            self.phase = SamplerPhase::Idle;
            self.timer.rearm();
        } else {
            self.timer.advance(dt);
        }

        if self.timer.is_due() {
            self.request();
        }

        sample
    }

    fn poll_interval(&self) -> Duration {
        self.timer.interval()
    }

    fn set_poll_interval(&mut self, interval: Duration) {
        self.timer.set_interval(interval);
    }

    fn is_ready(&self) -> bool {
        self.backend.is_ready()
    }

    fn take_fault(&mut self) -> Option<CaptureError> {
        self.fault.take()
    }

    fn release(&mut self) {
        self.backend.release();
        self.phase = SamplerPhase::Idle;
        self.timer.reset();
    }
}
