//! Cyclic boundary shapes and the merge/splice algorithm
//!
//! A shape is the outer polygon of the assembled tiling: a cyclic vertex
//! ring with one socket per edge. Merging splices an incoming tile ring
//! into the boundary at a matching socket, consuming the matched edges and
//! folding their endpoint angles into the sockets left adjacent to the
//! splice. The matched run is discovered by two directional scans driven by
//! the four-way socket compatibility result.

use crate::geometry::socket::{ConnectionResult, Socket};
use crate::geometry::transform::{Isometry, Rotation};
use crate::math::vec2::Vec2;

/// Why a merge attempt was not performed
///
/// These are ordinary control-flow outcomes: the collapse engine treats
/// every rejection as "this placement is infeasible here" and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRejection {
    /// The sockets fail the compatibility test somewhere along the run
    GeometryMismatch,
    /// A socket index is outside the current ring
    InvalidIndex,
    /// The incoming shape has no edges (or both shapes are empty)
    EmptyShape,
}

/// How a committed merge changed the boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeResult {
    /// Maps the incoming shape's local frame into the boundary frame
    pub transform: Isometry,
    /// Signed cyclic shift applied to the surviving boundary indices
    pub index_offset: i32,
    /// Signed change in boundary vertex count
    pub growth: i32,
    /// Number of boundary sockets consumed by the matched run
    pub consumed: usize,
}

/// Endpoints of the matched socket run on both rings
///
/// `first..=last` is the consumed run on the boundary; `other_first..=
/// other_last` is the corresponding run on the incoming ring, matched in
/// reverse winding (the boundary's first socket pairs with the incoming
/// ring's last).
#[derive(Debug, Clone, Copy)]
struct MatchRun {
    first: usize,
    last: usize,
    other_first: usize,
    other_last: usize,
}

#[derive(Debug, Clone, Copy)]
enum ScanDirection {
    /// Walk the boundary backward, the incoming ring forward
    Backward,
    /// Walk the boundary forward, the incoming ring backward
    Forward,
}

/// A cyclic polygon boundary with one socket per edge
///
/// Socket `i` spans vertices `i -> i + 1 (mod len)`. The empty shape is
/// the canonical unstarted boundary; merging anything into it yields a
/// copy of the incoming shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    vertices: Vec<Vec2>,
    sockets: Vec<Socket>,
}

impl Shape {
    /// The empty boundary
    pub const fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            sockets: Vec::new(),
        }
    }

    /// Build a shape from a polygon ring and per-edge connection classes
    ///
    /// Edge `i` runs from vertex `i` to vertex `i + 1` and takes connection
    /// class `connection_indices[i]`; missing classes default to 0. Socket
    /// angles are derived from the interior corner angles of the ring.
    pub fn from_polygon(vertices: &[Vec2], connection_indices: &[i32]) -> Self {
        let len = vertices.len();
        if len == 0 {
            return Self::empty();
        }

        let at = |index: usize| vertices.get(index % len).copied().unwrap_or(Vec2::ZERO);
        let mut sockets = Vec::with_capacity(len);
        for i in 0..len {
            sockets.push(Socket::from_geometry(
                connection_indices.get(i).copied().unwrap_or(0),
                at(i + len - 1),
                at(i),
                at(i + 1),
                at(i + 2),
            ));
        }

        Self {
            vertices: vertices.to_vec(),
            sockets,
        }
    }

    /// Number of edges (and vertices) in the ring
    pub const fn len(&self) -> usize {
        self.sockets.len()
    }

    /// Whether this is the empty boundary
    pub const fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }

    /// The vertex ring
    pub const fn vertices(&self) -> &[Vec2] {
        self.vertices.as_slice()
    }

    /// The socket ring, parallel to the vertices
    pub const fn sockets(&self) -> &[Socket] {
        self.sockets.as_slice()
    }

    /// Vertex at a cyclic index; zero for the empty shape
    pub fn vertex(&self, index: usize) -> Vec2 {
        let len = self.vertices.len();
        if len == 0 {
            return Vec2::ZERO;
        }
        self.vertices.get(index % len).copied().unwrap_or(Vec2::ZERO)
    }

    /// Midpoint of the edge spanned by socket `index`
    pub fn socket_midpoint(&self, index: usize) -> Vec2 {
        self.vertex(index).midpoint(self.vertex(index + 1))
    }

    /// Splice `other` into this boundary at a matching socket pair
    ///
    /// `socket_index` selects the boundary edge to attach at and
    /// `other_socket_index` the edge of `other` to seat against it. On
    /// success the returned shape replaces the boundary wholesale and the
    /// [`MergeResult`] reports the placement transform plus the index
    /// bookkeeping needed to remap superposition state.
    ///
    /// Merging into an empty boundary copies `other` verbatim with an
    /// identity transform.
    ///
    /// # Errors
    ///
    /// Returns [`MergeRejection::EmptyShape`] when `other` has no edges,
    /// [`MergeRejection::InvalidIndex`] for out-of-range sockets, and
    /// [`MergeRejection::GeometryMismatch`] when the compatibility walk
    /// fails anywhere along the candidate run.
    pub fn merge(
        &self,
        socket_index: usize,
        other: &Self,
        other_socket_index: usize,
    ) -> Result<(Self, MergeResult), MergeRejection> {
        if other.is_empty() {
            return Err(MergeRejection::EmptyShape);
        }

        if self.is_empty() {
            let result = MergeResult {
                transform: Isometry::IDENTITY,
                index_offset: 0,
                growth: other.len() as i32,
                consumed: 0,
            };
            return Ok((other.clone(), result));
        }

        if socket_index >= self.len() || other_socket_index >= other.len() {
            return Err(MergeRejection::InvalidIndex);
        }

        let run = self.match_run(socket_index, other, other_socket_index)?;
        Ok(self.splice(other, run))
    }

    /// Classify the anchor pair and extend the run in whichever directions
    /// the compatibility test signals continuation
    fn match_run(
        &self,
        start: usize,
        other: &Self,
        other_start: usize,
    ) -> Result<MatchRun, MergeRejection> {
        let anchor = match (self.sockets.get(start), other.sockets.get(other_start)) {
            (Some(a), Some(b)) => a.can_connect(b),
            _ => return Err(MergeRejection::InvalidIndex),
        };

        let mut run = MatchRun {
            first: start,
            last: start,
            other_first: other_start,
            other_last: other_start,
        };

        let (scan_backward, scan_forward) = match anchor {
            ConnectionResult::No => return Err(MergeRejection::GeometryMismatch),
            ConnectionResult::Yes => (false, false),
            ConnectionResult::CheckNext => (false, true),
            ConnectionResult::CheckPrevious => (true, false),
            ConnectionResult::CheckBoth => (true, true),
        };

        if scan_backward {
            let (first, other_last) = self.scan(start, other, other_start, ScanDirection::Backward)?;
            run.first = first;
            run.other_last = other_last;
        }
        if scan_forward {
            let (last, other_first) = self.scan(start, other, other_start, ScanDirection::Forward)?;
            run.last = last;
            run.other_first = other_first;
        }

        Ok(run)
    }

    /// Walk both rings in lock-step away from the anchor until the match
    /// run terminates in the scanned direction
    ///
    /// Returns the boundary and incoming-ring indices of the terminating
    /// socket pair. A `No` anywhere, or walking a full circle without
    /// terminating, rejects the merge.
    fn scan(
        &self,
        start: usize,
        other: &Self,
        other_start: usize,
        direction: ScanDirection,
    ) -> Result<(usize, usize), MergeRejection> {
        let len = self.len();
        let other_len = other.len();

        for steps in 1..len.min(other_len) {
            let (i, j) = match direction {
                ScanDirection::Backward => (
                    (start + len - steps) % len,
                    (other_start + steps) % other_len,
                ),
                ScanDirection::Forward => (
                    (start + steps) % len,
                    (other_start + other_len - (steps % other_len)) % other_len,
                ),
            };

            let result = match (self.sockets.get(i), other.sockets.get(j)) {
                (Some(a), Some(b)) => a.can_connect(b),
                _ => return Err(MergeRejection::GeometryMismatch),
            };

            let terminates = match (direction, result) {
                (_, ConnectionResult::No) => return Err(MergeRejection::GeometryMismatch),
                (_, ConnectionResult::Yes) => true,
                (ScanDirection::Backward, ConnectionResult::CheckNext)
                | (ScanDirection::Forward, ConnectionResult::CheckPrevious) => true,
                _ => false,
            };

            if terminates {
                return Ok((i, j));
            }
        }

        Err(MergeRejection::GeometryMismatch)
    }

    /// Build the merged ring: the boundary's surviving sockets starting
    /// just past the run, then the incoming ring's surviving sockets in
    /// reverse winding, transformed into the boundary frame
    fn splice(&self, other: &Self, run: MatchRun) -> (Self, MergeResult) {
        let len = self.len();
        let other_len = other.len();

        let consumed = (run.last + len - run.first) % len + 1;
        let other_consumed = (run.other_last + other_len - run.other_first) % other_len + 1;
        let kept = len - consumed;
        let appended = other_len - other_consumed;

        let mut vertices = Vec::with_capacity(kept + appended);
        let mut sockets = Vec::with_capacity(kept + appended);
        for step in 0..kept {
            let index = (run.last + 1 + step) % len;
            vertices.push(self.vertex(index));
            sockets.push(self.sockets.get(index).cloned().unwrap_or_default());
        }

        // The run's endpoint angles fold into the four sockets adjacent to
        // the splice, preserving the claimed solid angle at each shared
        // vertex.
        let first_fold = self.sockets.get(run.first).map_or(0.0, |s| s.first_angle);
        let last_fold = self.sockets.get(run.last).map_or(0.0, |s| s.second_angle);
        let other_first_fold = other
            .sockets
            .get(run.other_first)
            .map_or(0.0, |s| s.first_angle);
        let other_last_fold = other
            .sockets
            .get(run.other_last)
            .map_or(0.0, |s| s.second_angle);

        let mut incoming: Vec<Socket> = other.sockets.clone();
        if let Some(socket) = incoming.get_mut((run.other_last + 1) % other_len) {
            socket.increase_first_angle(first_fold);
        }
        if let Some(socket) = incoming.get_mut((run.other_first + other_len - 1) % other_len) {
            socket.increase_second_angle(last_fold);
        }
        if let Some(socket) = sockets.first_mut() {
            socket.increase_first_angle(other_first_fold);
        }
        if let Some(socket) = sockets.last_mut() {
            socket.increase_second_angle(other_last_fold);
        }

        // Align the incoming ring: its matched-run direction (reversed, to
        // account for opposite winding) rotates onto the boundary edge just
        // past the run, and the run endpoints are pinned together exactly.
        let target = self.vertex(run.last + 1) - self.vertex(run.last);
        let initial = other.vertex(run.other_first) - other.vertex(run.other_first + 1);
        let rotation = Rotation::between(initial, target);
        let translation =
            self.vertex(run.first) - rotation.apply(other.vertex(run.other_last + 1));
        let transform = Isometry::new(rotation, translation);

        for step in 0..appended {
            let index = (run.other_last + 1 + step) % other_len;
            vertices.push(transform.apply(other.vertex(index)));
            sockets.push(incoming.get(index).cloned().unwrap_or_default());
        }

        let result = MergeResult {
            transform,
            index_offset: -(((run.last + 1) % len) as i32),
            growth: appended as i32 - consumed as i32,
            consumed,
        };

        (Self { vertices, sockets }, result)
    }
}
