#![allow(dead_code)]

use std::collections::VecDeque;

use pupil_reflex::{
    BlinkSignal, BrightnessProvider, BrightnessSample, CaptureError, Duration, ParameterError,
    TargetParameter,
};

pub const FRAME: f32 = 1.0 / 60.0;

pub fn frame() -> Duration {
    Duration::from_micros(16_667)
}

/// In-memory target parameter recording every write
#[derive(Debug, Default)]
pub struct FakeTarget {
    pub value: f32,
    pub unresolved: bool,
    pub reject: bool,
    pub writes: Vec<f32>,
}

impl TargetParameter for FakeTarget {
    fn is_ready(&self) -> bool {
        !self.unresolved
    }

    fn read(&self) -> f32 {
        self.value
    }

    fn write(&mut self, value: f32) -> Result<(), ParameterError> {
        if self.reject {
            return Err(ParameterError::Rejected);
        }
        self.value = value;
        self.writes.push(value);
        Ok(())
    }
}

/// Provider replaying one scripted poll result per tick
#[derive(Debug)]
pub struct ScriptedProvider {
    pub script: VecDeque<Option<BrightnessSample>>,
    pub interval: Duration,
    pub unresolved: bool,
    pub fault: Option<CaptureError>,
    pub released: bool,
    pub deltas: Vec<f32>,
}

impl ScriptedProvider {
    pub fn new(brightness: &[f32]) -> Self {
        Self::from_samples(
            brightness
                .iter()
                .map(|value| Some(BrightnessSample::new(*value))),
        )
    }

    pub fn from_samples(samples: impl IntoIterator<Item = Option<BrightnessSample>>) -> Self {
        Self {
            script: samples.into_iter().collect(),
            interval: Duration::from_millis(250),
            unresolved: false,
            fault: None,
            released: false,
            deltas: Vec::new(),
        }
    }
}

impl BrightnessProvider for ScriptedProvider {
    fn poll(&mut self, dt: f32) -> Option<BrightnessSample> {
        self.deltas.push(dt);
        self.script.pop_front().flatten()
    }

    fn poll_interval(&self) -> Duration {
        self.interval
    }

    fn set_poll_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn is_ready(&self) -> bool {
        !self.unresolved
    }

    fn take_fault(&mut self) -> Option<CaptureError> {
        self.fault.take()
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Blink signal with both channels settable
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeLids {
    pub blink: Option<f32>,
    pub closure: Option<f32>,
}

impl BlinkSignal for FakeLids {
    fn blink_weight(&self) -> Option<f32> {
        self.blink
    }

    fn eyelid_closure(&self) -> Option<f32> {
        self.closure
    }
}
