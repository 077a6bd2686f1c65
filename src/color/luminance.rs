use libm::sqrtf;

use super::{LinearColor, Rgb};

const RED_WEIGHT: f32 = 0.299;
const GREEN_WEIGHT: f32 = 0.587;
const BLUE_WEIGHT: f32 = 0.114;

/// Perceived brightness `sqrt(0.299 r² + 0.587 g² + 0.114 b²)`
///
/// Scale-preserving: channels in `[0, 255]` give a result in `[0, 255]`,
/// channels in `[0, 1]` a result in `[0, 1]`.
#[inline]
pub fn perceived_luminance(r: f32, g: f32, b: f32) -> f32 {
    sqrtf(r * r * RED_WEIGHT + g * g * GREEN_WEIGHT + b * b * BLUE_WEIGHT)
}

/// Average the red, green and blue channels independently
///
/// Returns `None` for an empty frame.
#[allow(clippy::cast_precision_loss)]
pub fn average_pixels(pixels: &[Rgb]) -> Option<LinearColor> {
    if pixels.is_empty() {
        return None;
    }

    let (r, g, b) = pixels.iter().fold((0u64, 0u64, 0u64), |(r, g, b), pixel| {
        (
            r + u64::from(pixel.r),
            g + u64::from(pixel.g),
            b + u64::from(pixel.b),
        )
    });

    let total = pixels.len() as f32 * 255.0;
    Some(LinearColor::new(
        r as f32 / total,
        g as f32 / total,
        b as f32 / total,
    ))
}
