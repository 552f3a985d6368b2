//! Feature types: the things points belong to.
//!
//! Features store `PointId`s, never point data — the `Map` owns all points
//! and features in id-keyed registries, and back-references on each point
//! mirror membership in the other direction.  A feature whose point sequence
//! would violate its minimum size is deleted outright by the owning map;
//! features are never left in an invalid state.

use rw_core::{AreaId, LineId, MarkerId, PointId, SurfaceId};

/// Back-reference from a point to one feature containing it.
///
/// Closed set: every consumer matches exhaustively, so adding a feature kind
/// is a compile-time-visible change.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FeatureRef {
    Line(LineId),
    Area(AreaId),
    Marker(MarkerId),
}

// ── LineFeature ───────────────────────────────────────────────────────────────

/// An open polyline: the traversable part of the map.
///
/// Every adjacent pair in `points` is a segment movers can walk, in both
/// directions, at the speed the feature's surface allows.
#[derive(Clone, Debug)]
pub struct LineFeature {
    /// Surface the whole feature is made of.
    pub surface: SurfaceId,
    pub(crate) points: Vec<PointId>,
}

impl LineFeature {
    /// A line below this many *distinct* points is degenerate and gets deleted.
    pub const MIN_POINTS: usize = 2;

    #[inline]
    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    #[inline]
    pub fn start_point(&self) -> PointId {
        self.points[0]
    }

    #[inline]
    pub fn end_point(&self) -> PointId {
        self.points[self.points.len() - 1]
    }

    #[inline]
    pub fn is_endpoint(&self, point: PointId) -> bool {
        point == self.start_point() || point == self.end_point()
    }

    #[inline]
    pub fn contains(&self, point: PointId) -> bool {
        self.points.contains(&point)
    }
}

// ── AreaFeature ───────────────────────────────────────────────────────────────

/// A closed polygon (the segment from the last point back to the first is
/// implicit).  Areas carry no surface — they are not traversable — only an
/// opaque `kind` name for the application's own catalogs.
#[derive(Clone, Debug)]
pub struct AreaFeature {
    pub kind: String,
    pub(crate) points: Vec<PointId>,
}

impl AreaFeature {
    /// An area below this many *distinct* points is degenerate and gets deleted.
    pub const MIN_POINTS: usize = 3;

    #[inline]
    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    #[inline]
    pub fn contains(&self, point: PointId) -> bool {
        self.points.contains(&point)
    }
}

// ── MarkerFeature ─────────────────────────────────────────────────────────────

/// A labeled pin on exactly one point (start line, finish line, water stop…).
/// A point carries at most one marker.
#[derive(Clone, Debug)]
pub struct MarkerFeature {
    pub(crate) point: PointId,
    pub kind:  String,
    pub label: String,
}

impl MarkerFeature {
    /// The point this marker is pinned to.
    #[inline]
    pub fn point(&self) -> PointId {
        self.point
    }
}
