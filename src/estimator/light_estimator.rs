//! Light estimator
//!
//! Estimates brightness without rendering by evaluating every light in the
//! scene against the eye position and the direction the head is facing.
//! The brightest single light wins: nearby lights dominate instead of
//! adding up to an overexposed sum.

use embassy_time::Duration;
use heapless::Vec;

use super::{BrightnessProvider, BrightnessSample, PollTimer};
use crate::color::LinearColor;
use crate::easing::quadratic_out;
use crate::geometry::Vec3;
use crate::math::{inverse_lerp, lerp};

/// Intensity that maps a white light to full perceived brightness
pub const MAX_LIGHT_INTENSITY: f32 = 8.0;

/// Linear gain applied to the brightest perceived intensity
pub const LIGHT_GAIN: f32 = 4.0;

/// Tolerance applied to the spot cone before a light is considered to miss
pub const SPOT_CONE_FUDGE: f32 = 1.1;

/// Kind of light source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Infinitely distant light shining along its direction
    Directional,
    /// Omnidirectional light with a limited range
    Point,
    /// Cone light with a limited range; `cone_angle` is the full cone angle in radians
    Spot { cone_angle: f32 },
    /// Baked area light, never contributes
    Area,
}

/// Light source as seen by the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub enabled: bool,
    /// World position (ignored for directional lights)
    pub position: Vec3,
    /// Direction the light travels (ignored for point lights)
    pub direction: Vec3,
    pub color: LinearColor,
    pub intensity: f32,
    /// Maximum reach for point and spot lights
    pub range: f32,
}

impl Light {
    pub const fn directional(direction: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            enabled: true,
            position: Vec3::ZERO,
            direction,
            color: LinearColor::WHITE,
            intensity,
            range: 0.0,
        }
    }

    pub const fn point(position: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            enabled: true,
            position,
            direction: Vec3::ZERO,
            color: LinearColor::WHITE,
            intensity,
            range,
        }
    }

    pub const fn spot(
        position: Vec3,
        direction: Vec3,
        cone_angle: f32,
        intensity: f32,
        range: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot { cone_angle },
            enabled: true,
            position,
            direction,
            color: LinearColor::WHITE,
            intensity,
            range,
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: LinearColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Tuning for the geometric estimate
#[derive(Debug, Clone, Copy)]
pub struct LightEstimatorConfig {
    pub max_intensity: f32,
    pub gain: f32,
    pub spot_fudge: f32,
}

impl Default for LightEstimatorConfig {
    fn default() -> Self {
        Self {
            max_intensity: MAX_LIGHT_INTENSITY,
            gain: LIGHT_GAIN,
            spot_fudge: SPOT_CONE_FUDGE,
        }
    }
}

/// Scene capability used by [`LightEstimator`]
pub trait LightScene {
    fn lights(&self) -> &[Light];

    /// Midpoint between the eyes
    fn eye_position(&self) -> Vec3;

    /// Forward vector of the head
    fn head_forward(&self) -> Vec3;

    /// Whether the head has been located
    fn is_ready(&self) -> bool {
        true
    }
}

/// Fixed-capacity scene the host refreshes every frame
#[derive(Debug, Clone)]
pub struct LightInventory<const N: usize> {
    lights: Vec<Light, N>,
    eye_position: Vec3,
    head_forward: Vec3,
}

impl<const N: usize> Default for LightInventory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LightInventory<N> {
    pub const fn new() -> Self {
        Self {
            lights: Vec::new(),
            eye_position: Vec3::ZERO,
            head_forward: Vec3::FORWARD,
        }
    }

    /// Add a light
    ///
    /// Returns the light if the inventory is full
    pub fn push(&mut self, light: Light) -> Result<(), Light> {
        self.lights.push(light)
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn lights_mut(&mut self) -> &mut [Light] {
        &mut self.lights
    }

    /// Place the head: eye midpoint and facing direction
    pub fn set_head(&mut self, eye_position: Vec3, head_forward: Vec3) {
        self.eye_position = eye_position;
        self.head_forward = head_forward;
    }
}

impl<const N: usize> LightScene for LightInventory<N> {
    fn lights(&self) -> &[Light] {
        &self.lights
    }

    fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    fn head_forward(&self) -> Vec3 {
        self.head_forward
    }
}

/// Perceived intensity of one light at the eyes
///
/// Returns `None` when the light is filtered out: disabled, an area light,
/// out of range, behind the head, or outside its spot cone.
pub fn perceived_intensity(
    light: &Light,
    eye_position: Vec3,
    head_forward: Vec3,
    config: &LightEstimatorConfig,
) -> Option<f32> {
    if !light.enabled {
        return None;
    }

    let (to_head, falloff) = match light.kind {
        LightKind::Area => return None,
        LightKind::Directional => (light.direction, 1.0),
        LightKind::Point | LightKind::Spot { .. } => {
            let to_head = eye_position - light.position;
            let distance = to_head.length();
            if distance > light.range {
                return None;
            }
            (
                to_head,
                quadratic_out(inverse_lerp(light.range, 0.0, distance)),
            )
        }
    };

    // Light travelling along the facing direction hits the back of the head
    if to_head.dot(head_forward) > 0.0 {
        return None;
    }

    if let LightKind::Spot { cone_angle } = light.kind {
        if let Some(angle) = light.direction.angle_to(to_head) {
            if angle > cone_angle * 0.5 * config.spot_fudge * 2.0 {
                return None;
            }
        }
    }

    // negative intensities would square into bright light
    let intensity = (light.intensity * falloff).max(0.0);
    Some(light.color.scaled(intensity).luminance() / config.max_intensity)
}

/// Brightness at the eyes from the strongest contributing light
pub fn estimate_brightness(
    lights: &[Light],
    eye_position: Vec3,
    head_forward: Vec3,
    config: &LightEstimatorConfig,
) -> f32 {
    let strongest = lights
        .iter()
        .filter_map(|light| perceived_intensity(light, eye_position, head_forward, config))
        .fold(0.0_f32, f32::max);

    lerp(0.0, 1.0, strongest * config.gain)
}

/// Brightness provider evaluating a [`LightScene`]
pub struct LightEstimator<S: LightScene> {
    scene: S,
    timer: PollTimer,
    config: LightEstimatorConfig,
}

impl<S: LightScene> LightEstimator<S> {
    pub fn new(scene: S, poll_interval: Duration) -> Self {
        Self::with_config(scene, poll_interval, LightEstimatorConfig::default())
    }

    pub const fn with_config(
        scene: S,
        poll_interval: Duration,
        config: LightEstimatorConfig,
    ) -> Self {
        Self {
            scene,
            timer: PollTimer::new(poll_interval),
            config,
        }
    }

    pub const fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub const fn config(&self) -> &LightEstimatorConfig {
        &self.config
    }

    /// Evaluate the scene right now, ignoring the poll timer
    pub fn estimate(&self) -> f32 {
        estimate_brightness(
            self.scene.lights(),
            self.scene.eye_position(),
            self.scene.head_forward(),
            &self.config,
        )
    }
}

impl<S: LightScene> BrightnessProvider for LightEstimator<S> {
    fn poll(&mut self, dt: f32) -> Option<BrightnessSample> {
        self.timer.advance(dt);
        if !self.timer.is_due() {
            return None;
        }
        self.timer.rearm();
        Some(BrightnessSample::new(self.estimate()))
    }

    fn poll_interval(&self) -> Duration {
        self.timer.interval()
    }

    fn set_poll_interval(&mut self, interval: Duration) {
        self.timer.set_interval(interval);
    }

    fn is_ready(&self) -> bool {
        self.scene.is_ready()
    }
}
