mod luminance;

pub use luminance::{average_pixels, perceived_luminance};
use smart_leds::RGB8;

/// 8-bit pixel as read back from a capture surface
pub type Rgb = RGB8;

/// Floating point color with nominal channel range `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearColor {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert an 8-bit pixel into `[0, 1]` channels
    pub fn from_rgb8(pixel: Rgb) -> Self {
        Self::new(
            f32::from(pixel.r) / 255.0,
            f32::from(pixel.g) / 255.0,
            f32::from(pixel.b) / 255.0,
        )
    }

    /// Multiply every channel by `factor`
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Perceptual luminance of this color
    pub fn luminance(self) -> f32 {
        perceived_luminance(self.r, self.g, self.b)
    }

    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}
