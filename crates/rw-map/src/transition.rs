//! Directed traversable edges between adjacent points on a line feature.

use rw_core::{LineId, Mover, PointId, SurfaceId};

use crate::map::Map;

/// One directed edge of the navigation graph.
///
/// Transitions are derived data: the map regenerates them wholesale whenever
/// the owning line's point sequence changes, so `length` is always the
/// current Euclidean distance between the endpoints.  Costs are *not* stored
/// — they depend on who is moving and are computed on demand.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    pub from:   PointId,
    pub to:     PointId,
    /// The line feature this edge belongs to (supplies the surface).
    pub line:   LineId,
    /// Euclidean distance from `from` to `to` at creation time, in map units.
    pub length: f32,
}

impl Transition {
    pub(crate) fn new(from: PointId, to: PointId, line: LineId, length: f32) -> Self {
        Self { from, to, line, length }
    }

    /// Identity triple, ignoring the derived `length` — usable as a hash-map
    /// key where `Transition` itself cannot be (f32 is not `Eq`).
    #[inline]
    pub fn key(&self) -> (PointId, PointId, LineId) {
        (self.from, self.to, self.line)
    }

    /// The surface this edge runs on.
    ///
    /// # Panics
    /// Panics if the owning line has been deleted since this transition was
    /// created (stale path held across a structural edit).
    #[inline]
    pub fn surface_id(&self, map: &Map) -> SurfaceId {
        map.line(self.line).surface
    }

    /// Traversal time for `mover` in seconds: length ÷ mover speed on this
    /// edge's surface.  Infinite if the mover cannot traverse the surface.
    #[inline]
    pub fn cost(&self, map: &Map, mover: &impl Mover) -> f32 {
        let surface = map.catalog().get(self.surface_id(map));
        self.length / mover.surface_speed(surface)
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} via {} ({:.2}u)", self.from, self.to, self.line, self.length)
    }
}
