//! Easing curves
//!
//! Every curve maps normalized progress `p` (already clamped to `[0, 1]` by
//! the caller) to an eased output with `f(0) = 0` and `f(1) = 1`. The elastic
//! and back families leave `[0, 1]` on the way; the animations rely on that
//! overshoot for their settle motion.

use core::f32::consts::{FRAC_PI_2, PI};

use libm::{cosf, exp2f, sinf, sqrtf};

/// Easing function over normalized progress
pub type EasingFn = fn(f32) -> f32;

const ELASTIC_FREQUENCY: f32 = 13.0 * FRAC_PI_2;

/// y = x
pub fn linear(p: f32) -> f32 {
    p
}

pub fn quadratic_in(p: f32) -> f32 {
    p * p
}

pub fn quadratic_out(p: f32) -> f32 {
    -(p * (p - 2.0))
}

pub fn quadratic_in_out(p: f32) -> f32 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        (-2.0 * p * p) + (4.0 * p) - 1.0
    }
}

pub fn cubic_in(p: f32) -> f32 {
    p * p * p
}

pub fn cubic_out(p: f32) -> f32 {
    let f = p - 1.0;
    f * f * f + 1.0
}

pub fn cubic_in_out(p: f32) -> f32 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let f = 2.0 * p - 2.0;
        0.5 * f * f * f + 1.0
    }
}

pub fn quartic_in(p: f32) -> f32 {
    p * p * p * p
}

pub fn quartic_out(p: f32) -> f32 {
    let f = p - 1.0;
    f * f * f * (1.0 - p) + 1.0
}

pub fn quartic_in_out(p: f32) -> f32 {
    if p < 0.5 {
        8.0 * p * p * p * p
    } else {
        let f = p - 1.0;
        -8.0 * f * f * f * f + 1.0
    }
}

pub fn quintic_in(p: f32) -> f32 {
    p * p * p * p * p
}

pub fn quintic_out(p: f32) -> f32 {
    let f = p - 1.0;
    f * f * f * f * f + 1.0
}

pub fn quintic_in_out(p: f32) -> f32 {
    if p < 0.5 {
        16.0 * p * p * p * p * p
    } else {
        let f = 2.0 * p - 2.0;
        0.5 * f * f * f * f * f + 1.0
    }
}

/// Quarter-cycle of sine wave
pub fn sine_in(p: f32) -> f32 {
    sinf((p - 1.0) * FRAC_PI_2) + 1.0
}

pub fn sine_out(p: f32) -> f32 {
    sinf(p * FRAC_PI_2)
}

/// Half sine wave
pub fn sine_in_out(p: f32) -> f32 {
    0.5 * (1.0 - cosf(p * PI))
}

/// Shifted quadrant IV of unit circle
pub fn circular_in(p: f32) -> f32 {
    1.0 - sqrtf(1.0 - (p * p))
}

/// Shifted quadrant II of unit circle
pub fn circular_out(p: f32) -> f32 {
    sqrtf((2.0 - p) * p)
}

pub fn circular_in_out(p: f32) -> f32 {
    if p < 0.5 {
        0.5 * (1.0 - sqrtf(1.0 - 4.0 * (p * p)))
    } else {
        0.5 * (sqrtf(-((2.0 * p) - 3.0) * ((2.0 * p) - 1.0)) + 1.0)
    }
}

pub fn exponential_in(p: f32) -> f32 {
    if p <= 0.0 { 0.0 } else { exp2f(10.0 * (p - 1.0)) }
}

pub fn exponential_out(p: f32) -> f32 {
    if p >= 1.0 { 1.0 } else { 1.0 - exp2f(-10.0 * p) }
}

pub fn exponential_in_out(p: f32) -> f32 {
    if p <= 0.0 || p >= 1.0 {
        return p;
    }
    if p < 0.5 {
        0.5 * exp2f((20.0 * p) - 10.0)
    } else {
        -0.5 * exp2f((-20.0 * p) + 10.0) + 1.0
    }
}

/// Damped sine wave y = sin(13pi/2*x)*2^(10(x - 1))
pub fn elastic_in(p: f32) -> f32 {
    sinf(ELASTIC_FREQUENCY * p) * exp2f(10.0 * (p - 1.0))
}

/// Damped sine wave y = sin(-13pi/2*(x + 1))*2^(-10x) + 1
pub fn elastic_out(p: f32) -> f32 {
    sinf(-ELASTIC_FREQUENCY * (p + 1.0)) * exp2f(-10.0 * p) + 1.0
}

pub fn elastic_in_out(p: f32) -> f32 {
    if p < 0.5 {
        0.5 * sinf(ELASTIC_FREQUENCY * (2.0 * p)) * exp2f(10.0 * ((2.0 * p) - 1.0))
    } else {
        0.5 * (sinf(-ELASTIC_FREQUENCY * ((2.0 * p - 1.0) + 1.0))
            * exp2f(-10.0 * (2.0 * p - 1.0))
            + 2.0)
    }
}

/// Overshooting cubic y = x^3-x*sin(x*pi)
pub fn back_in(p: f32) -> f32 {
    p * p * p - p * sinf(p * PI)
}

/// Overshooting cubic y = 1-((1-x)^3-(1-x)*sin((1-x)*pi))
pub fn back_out(p: f32) -> f32 {
    let f = 1.0 - p;
    1.0 - (f * f * f - f * sinf(f * PI))
}

pub fn back_in_out(p: f32) -> f32 {
    if p < 0.5 {
        let f = 2.0 * p;
        0.5 * (f * f * f - f * sinf(f * PI))
    } else {
        let f = 1.0 - (2.0 * p - 1.0);
        0.5 * (1.0 - (f * f * f - f * sinf(f * PI))) + 0.5
    }
}

pub fn bounce_in(p: f32) -> f32 {
    1.0 - bounce_out(1.0 - p)
}

pub fn bounce_out(p: f32) -> f32 {
    if p < 4.0 / 11.0 {
        (121.0 * p * p) / 16.0
    } else if p < 8.0 / 11.0 {
        (363.0 / 40.0 * p * p) - (99.0 / 10.0 * p) + 17.0 / 5.0
    } else if p < 9.0 / 10.0 {
        (4356.0 / 361.0 * p * p) - (35442.0 / 1805.0 * p) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * p * p) - (513.0 / 25.0 * p) + 268.0 / 25.0
    }
}

pub fn bounce_in_out(p: f32) -> f32 {
    if p < 0.5 {
        0.5 * bounce_in(p * 2.0)
    } else {
        0.5 * bounce_out(p * 2.0 - 1.0) + 0.5
    }
}

/// Named easing curve
///
/// Hosts store curve choices by name; [`Easing::as_fn`] resolves the curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    SineIn,
    SineOut,
    SineInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Easing {
    /// Every curve, in declaration order
    pub const ALL: [Self; 31] = [
        Self::Linear,
        Self::QuadraticIn,
        Self::QuadraticOut,
        Self::QuadraticInOut,
        Self::CubicIn,
        Self::CubicOut,
        Self::CubicInOut,
        Self::QuarticIn,
        Self::QuarticOut,
        Self::QuarticInOut,
        Self::QuinticIn,
        Self::QuinticOut,
        Self::QuinticInOut,
        Self::SineIn,
        Self::SineOut,
        Self::SineInOut,
        Self::CircularIn,
        Self::CircularOut,
        Self::CircularInOut,
        Self::ExponentialIn,
        Self::ExponentialOut,
        Self::ExponentialInOut,
        Self::ElasticIn,
        Self::ElasticOut,
        Self::ElasticInOut,
        Self::BackIn,
        Self::BackOut,
        Self::BackInOut,
        Self::BounceIn,
        Self::BounceOut,
        Self::BounceInOut,
    ];

    pub const fn as_fn(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::QuadraticIn => quadratic_in,
            Self::QuadraticOut => quadratic_out,
            Self::QuadraticInOut => quadratic_in_out,
            Self::CubicIn => cubic_in,
            Self::CubicOut => cubic_out,
            Self::CubicInOut => cubic_in_out,
            Self::QuarticIn => quartic_in,
            Self::QuarticOut => quartic_out,
            Self::QuarticInOut => quartic_in_out,
            Self::QuinticIn => quintic_in,
            Self::QuinticOut => quintic_out,
            Self::QuinticInOut => quintic_in_out,
            Self::SineIn => sine_in,
            Self::SineOut => sine_out,
            Self::SineInOut => sine_in_out,
            Self::CircularIn => circular_in,
            Self::CircularOut => circular_out,
            Self::CircularInOut => circular_in_out,
            Self::ExponentialIn => exponential_in,
            Self::ExponentialOut => exponential_out,
            Self::ExponentialInOut => exponential_in_out,
            Self::ElasticIn => elastic_in,
            Self::ElasticOut => elastic_out,
            Self::ElasticInOut => elastic_in_out,
            Self::BackIn => back_in,
            Self::BackOut => back_out,
            Self::BackInOut => back_in_out,
            Self::BounceIn => bounce_in,
            Self::BounceOut => bounce_out,
            Self::BounceInOut => bounce_in_out,
        }
    }

    /// Evaluate the curve at `p`
    #[inline]
    pub fn apply(self, p: f32) -> f32 {
        (self.as_fn())(p)
    }

    /// Whether the curve is allowed to leave `[0, 1]` before settling
    pub const fn overshoots(self) -> bool {
        matches!(
            self,
            Self::ElasticIn
                | Self::ElasticOut
                | Self::ElasticInOut
                | Self::BackIn
                | Self::BackOut
                | Self::BackInOut
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::QuadraticIn => "quadratic_in",
            Self::QuadraticOut => "quadratic_out",
            Self::QuadraticInOut => "quadratic_in_out",
            Self::CubicIn => "cubic_in",
            Self::CubicOut => "cubic_out",
            Self::CubicInOut => "cubic_in_out",
            Self::QuarticIn => "quartic_in",
            Self::QuarticOut => "quartic_out",
            Self::QuarticInOut => "quartic_in_out",
            Self::QuinticIn => "quintic_in",
            Self::QuinticOut => "quintic_out",
            Self::QuinticInOut => "quintic_in_out",
            Self::SineIn => "sine_in",
            Self::SineOut => "sine_out",
            Self::SineInOut => "sine_in_out",
            Self::CircularIn => "circular_in",
            Self::CircularOut => "circular_out",
            Self::CircularInOut => "circular_in_out",
            Self::ExponentialIn => "exponential_in",
            Self::ExponentialOut => "exponential_out",
            Self::ExponentialInOut => "exponential_in_out",
            Self::ElasticIn => "elastic_in",
            Self::ElasticOut => "elastic_out",
            Self::ElasticInOut => "elastic_in_out",
            Self::BackIn => "back_in",
            Self::BackOut => "back_out",
            Self::BackInOut => "back_in_out",
            Self::BounceIn => "bounce_in",
            Self::BounceOut => "bounce_out",
            Self::BounceInOut => "bounce_in_out",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|easing| easing.as_str() == s)
    }
}
