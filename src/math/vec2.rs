//! Plain 2D vector over f64 for boundary and transform math

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Threshold below which a vector is treated as degenerate when normalizing
const SAFE_NORMALIZE_EPSILON: f64 = 1e-12;

/// A 2D vector or point in the tiling plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Vec2 {
    /// The zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct a vector from components
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared length, cheaper than [`Self::length`] for comparisons
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Distance to another point
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Squared distance to another point
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        (self + other) / 2.0
    }

    /// Componentwise absolute value
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Unit vector in the same direction, or zero for degenerate input
    pub fn normalized(self) -> Self {
        let length_squared = self.length_squared();
        if length_squared < SAFE_NORMALIZE_EPSILON {
            Self::ZERO
        } else {
            self / length_squared.sqrt()
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
