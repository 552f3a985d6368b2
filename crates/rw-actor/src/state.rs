//! Per-actor movement state.
//!
//! An actor is either **stationary** (standing at a point, no path) or
//! **following a path**.  While following, `transition` holds the leg
//! currently being walked and `rel_pos` the fraction of it covered, so the
//! actor's world position is always a straight interpolation between the
//! leg's endpoints.  The path is consumed from the front: whenever the
//! actor steps onto the next point, everything behind it is cut away and
//! the path's head is the actor's position again.

use rw_core::{PointId, SurfaceId, Vec2};
use rw_map::{Map, Transition};
use rw_nav::NavigationPath;

/// The movement state for a single actor.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub(crate) at:         PointId,
    pub(crate) path:       Option<NavigationPath>,
    pub(crate) transition: Option<Transition>,
    pub(crate) rel_pos:    f32,
}

impl MotionState {
    /// A stationary actor standing at `at`.
    pub fn new(at: PointId) -> Self {
        Self { at, path: None, transition: None, rel_pos: 0.0 }
    }

    /// The point the actor is at, or the origin of the leg it is walking.
    #[inline]
    pub fn at(&self) -> PointId {
        self.at
    }

    #[inline]
    pub fn path(&self) -> Option<&NavigationPath> {
        self.path.as_ref()
    }

    /// The leg currently being walked, if any.
    #[inline]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Fraction of the current leg already covered, in `[0, 1)`.
    #[inline]
    pub fn rel_pos(&self) -> f32 {
        self.rel_pos
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.path.is_some()
    }

    /// Teleport to `at`, dropping any path in progress.
    pub fn place(&mut self, at: PointId) {
        self.at = at;
        self.path = None;
        self.transition = None;
        self.rel_pos = 0.0;
    }

    /// Start following `path` from its head.
    ///
    /// # Panics
    /// Panics if the path does not start where the actor stands, or if the
    /// actor is midway through a leg ([`place`](Self::place) it first).
    pub fn set_path(&mut self, path: NavigationPath) {
        assert!(
            self.transition.is_none(),
            "cannot take a new path midway through a leg",
        );
        let head = path.head();
        assert!(
            head == self.at,
            "path starts at {head} but the actor stands at {}",
            self.at,
        );
        self.path = Some(path);
        self.rel_pos = 0.0;
    }

    /// Surface under the actor's feet, if it is walking a leg.
    pub fn surface_id(&self, map: &Map) -> Option<SurfaceId> {
        self.transition.map(|t| t.surface_id(map))
    }

    /// Interpolated position for rendering and distance displays.
    ///
    /// # Panics
    /// Panics if the map no longer contains the referenced points (the path
    /// outlived a map edit).
    pub fn world_position(&self, map: &Map) -> Vec2 {
        match self.transition {
            Some(t) => map.point(t.from).pos().lerp(map.point(t.to).pos(), self.rel_pos),
            None => map.point(self.at).pos(),
        }
    }
}
