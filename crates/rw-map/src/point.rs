//! Points and the `PointSpec` callers use to reference or create them.

use rw_core::{LineId, MarkerId, PointId, Vec2};

use crate::feature::FeatureRef;
use crate::transition::Transition;

/// How a caller names a point when building or editing a feature: either an
/// already-registered point, or a bare position to register on the spot.
///
/// This is the registration lifecycle in type form — a new point comes into
/// existence exactly once, at the moment it is first attached to a feature.
#[derive(Copy, Clone, Debug)]
pub enum PointSpec {
    Existing(PointId),
    New(Vec2),
}

/// A registered node of the spatial network.
///
/// `features` mirrors membership: it lists every feature whose point sequence
/// contains this point (each feature at most once, regardless of how often
/// the point occurs in it).  `transitions` is the cached outgoing adjacency,
/// regenerated in full by the map whenever any containing line changes.
/// A point with no features left is an orphan and is deleted eagerly.
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) pos:         Vec2,
    pub(crate) features:    Vec<FeatureRef>,
    pub(crate) transitions: Vec<Transition>,
}

impl Point {
    pub(crate) fn new(pos: Vec2) -> Self {
        Self {
            pos,
            features: Vec::new(),
            transitions: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Every feature containing this point.
    #[inline]
    pub fn features(&self) -> &[FeatureRef] {
        &self.features
    }

    /// Outgoing edges, one per adjacent occurrence on every containing line.
    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// `true` if the point lies on at least one line feature — i.e. it is
    /// part of the navigation network.
    #[inline]
    pub fn has_line_feature(&self) -> bool {
        self.features
            .iter()
            .any(|f| matches!(f, FeatureRef::Line(_)))
    }

    /// The lines this point belongs to.
    pub fn line_features(&self) -> impl Iterator<Item = LineId> + '_ {
        self.features.iter().filter_map(|f| match f {
            FeatureRef::Line(l) => Some(*l),
            _ => None,
        })
    }

    /// The marker pinned to this point, if any.
    pub fn marker(&self) -> Option<MarkerId> {
        self.features.iter().find_map(|f| match f {
            FeatureRef::Marker(m) => Some(*m),
            _ => None,
        })
    }

    #[inline]
    pub fn is_orphaned(&self) -> bool {
        self.features.is_empty()
    }
}
