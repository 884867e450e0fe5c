//! Per-edge sockets and the four-way compatibility test
//!
//! A socket describes one boundary edge: which connection class it belongs
//! to, how long it is, and how much angular space it already claims around
//! each of its endpoints. Two sockets can join only when their classes and
//! lengths agree and the combined angles at the shared vertices fit inside
//! a full turn.

use crate::io::configuration::{ANGLE_SUM_TOLERANCE, LENGTH_TOLERANCE};
use crate::math::angle::nearly_equal;
use crate::math::vec2::Vec2;
use std::f64::consts::TAU;

/// Outcome of testing two sockets for compatibility
///
/// The non-terminal variants report that the match extends past one of the
/// shared vertices, so the caller must keep walking the boundary in that
/// direction to find the full matched run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionResult {
    /// The sockets cannot join
    No,
    /// The sockets join and the match terminates at both endpoints
    Yes,
    /// The match continues into the following boundary edge
    CheckNext,
    /// The match continues into the preceding boundary edge
    CheckPrevious,
    /// The match continues in both directions
    CheckBoth,
}

/// Connection metadata for one boundary edge
#[derive(Debug, Clone, PartialEq)]
pub struct Socket {
    /// Connection class; sockets join only within a class, negative never joins
    pub connection_index: i32,
    /// Edge length; sockets join only at matching lengths
    pub length: f64,
    /// Radians claimed around the edge's first vertex
    pub first_angle: f64,
    /// Radians claimed around the edge's second vertex
    pub second_angle: f64,
}

impl Default for Socket {
    /// A blocked socket that never connects
    fn default() -> Self {
        Self {
            connection_index: -1,
            length: 0.0,
            first_angle: TAU,
            second_angle: TAU,
        }
    }
}

impl Socket {
    /// Build a socket for the edge `first -> second` from surrounding geometry
    ///
    /// The endpoint angles are the interior corner angles between this edge
    /// and its neighbors, measured from the adjacent vertices `previous`
    /// (before `first`) and `next` (after `second`).
    pub fn from_geometry(
        connection_index: i32,
        previous: Vec2,
        first: Vec2,
        second: Vec2,
        next: Vec2,
    ) -> Self {
        let to_previous = (previous - first).normalized();
        let to_second = (second - first).normalized();
        let to_first = (first - second).normalized();
        let to_next = (next - second).normalized();

        Self {
            connection_index,
            length: first.distance(second),
            first_angle: to_previous.dot(to_second).clamp(-1.0, 1.0).acos(),
            second_angle: to_first.dot(to_next).clamp(-1.0, 1.0).acos(),
        }
    }

    /// Widen the angle claimed around the first vertex
    pub const fn increase_first_angle(&mut self, amount: f64) {
        self.first_angle += amount;
    }

    /// Widen the angle claimed around the second vertex
    pub const fn increase_second_angle(&mut self, amount: f64) {
        self.second_angle += amount;
    }

    /// Test whether this socket can join `other`, and whether the match
    /// would extend past either shared vertex
    ///
    /// `other` is an edge of the incoming shape, traversed in the opposite
    /// winding, so this socket's second vertex coincides with `other`'s
    /// first vertex and vice versa. An angle sum close to a full turn at a
    /// shared vertex means the surrounding geometry folds flush there and
    /// the match must continue into the adjacent edge on that side; a sum
    /// beyond a full turn means the shapes would overlap.
    pub fn can_connect(&self, other: &Self) -> ConnectionResult {
        let next_sum = self.second_angle + other.first_angle;
        let previous_sum = self.first_angle + other.second_angle;

        if self.connection_index < 0
            || self.connection_index != other.connection_index
            || !nearly_equal(self.length, other.length, LENGTH_TOLERANCE)
            || next_sum > TAU + ANGLE_SUM_TOLERANCE
            || previous_sum > TAU + ANGLE_SUM_TOLERANCE
        {
            return ConnectionResult::No;
        }

        let continues_next = nearly_equal(next_sum, TAU, ANGLE_SUM_TOLERANCE);
        let continues_previous = nearly_equal(previous_sum, TAU, ANGLE_SUM_TOLERANCE);

        match (continues_next, continues_previous) {
            (false, false) => ConnectionResult::Yes,
            (true, false) => ConnectionResult::CheckNext,
            (false, true) => ConnectionResult::CheckPrevious,
            (true, true) => ConnectionResult::CheckBoth,
        }
    }
}
