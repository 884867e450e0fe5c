//! Rigid 2D transforms for tile placement
//!
//! Merging never scales or mirrors, so a placement is fully described by a
//! rotation and a translation. The rotation is stored as its cosine/sine
//! pair to keep composition and application free of trigonometric calls.

use crate::math::vec2::Vec2;

/// A 2D rotation stored as a unit complex number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Cosine of the rotation angle
    pub cos: f64,
    /// Sine of the rotation angle
    pub sin: f64,
}

impl Rotation {
    /// The identity rotation
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    /// Rotation whose angle matches the heading of `direction`
    ///
    /// A degenerate direction yields the identity rotation.
    pub fn from_direction(direction: Vec2) -> Self {
        let unit = direction.normalized();
        if unit == Vec2::ZERO {
            Self::IDENTITY
        } else {
            Self {
                cos: unit.x,
                sin: unit.y,
            }
        }
    }

    /// Rotation carrying the heading of `from` onto the heading of `to`
    pub fn between(from: Vec2, to: Vec2) -> Self {
        Self::from_direction(to).compose(Self::from_direction(from).inverse())
    }

    /// The inverse rotation
    pub const fn inverse(self) -> Self {
        Self {
            cos: self.cos,
            sin: -self.sin,
        }
    }

    /// Rotation equivalent to applying `inner` first, then `self`
    pub fn compose(self, inner: Self) -> Self {
        Self {
            cos: self.cos.mul_add(inner.cos, -(self.sin * inner.sin)),
            sin: self.sin.mul_add(inner.cos, self.cos * inner.sin),
        }
    }

    /// Rotate a vector
    pub fn apply(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.cos.mul_add(v.x, -(self.sin * v.y)),
            self.sin.mul_add(v.x, self.cos * v.y),
        )
    }

    /// Signed rotation angle in radians, in `(-pi, pi]`
    pub fn angle(self) -> f64 {
        self.sin.atan2(self.cos)
    }
}

/// A rotation followed by a translation
///
/// This is the transform reported for each committed placement: it maps a
/// tile's local vertices into the assembled boundary's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Isometry {
    /// Rotational part
    pub rotation: Rotation,
    /// Translational part, applied after the rotation
    pub translation: Vec2,
}

impl Isometry {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        rotation: Rotation::IDENTITY,
        translation: Vec2::ZERO,
    };

    /// Construct from parts
    pub const fn new(rotation: Rotation, translation: Vec2) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Transform a point
    pub fn apply(self, point: Vec2) -> Vec2 {
        self.rotation.apply(point) + self.translation
    }

    /// Rotation angle of the placement in radians
    pub fn angle(self) -> f64 {
        self.rotation.angle()
    }
}
