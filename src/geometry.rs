//! Minimal 3D vector math for the light estimator.

use core::ops::{Add, Mul, Neg, Sub};

use libm::{acosf, sqrtf};

/// Vectors shorter than this have no usable direction.
const DIRECTION_EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        sqrtf(self.dot(self))
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, `None` for a (near) zero vector
    pub fn normalized(self) -> Option<Self> {
        let length = self.length();
        if length <= DIRECTION_EPSILON || !length.is_finite() {
            return None;
        }
        Some(self * (1.0 / length))
    }

    /// Unsigned angle between two directions in radians
    ///
    /// Returns `None` when either vector has no direction.
    pub fn angle_to(self, other: Self) -> Option<f32> {
        let a = self.normalized()?;
        let b = other.normalized()?;
        Some(acosf(a.dot(b).clamp(-1.0, 1.0)))
    }

    /// Midpoint between two positions (e.g. the left and right eye)
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) * 0.5
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
