//! `NavigationPath` — an ordered chain of transitions through the map.
//!
//! A path always holds `n` points and `n - 1` transitions, transition `i`
//! leading from point `i` to point `i + 1`.  A freshly created path is a
//! single point with no transitions.  The two mutators
//! ([`add_transition`](NavigationPath::add_transition) and
//! [`cut_everything_before`](NavigationPath::cut_everything_before)) keep
//! that shape at every observable moment.
//!
//! Paths hold ids, not references, so they stay cheap to clone and to store;
//! the flip side is that a map edit can strand them.  [`is_valid`](NavigationPath::is_valid)
//! detects stranded paths, and the id-registry accessors panic loudly if a
//! stale path is driven anyway.

use rw_core::{Mover, PointId};
use rw_map::{Map, Transition};

/// A walkable route: points joined by the transitions between them.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationPath {
    points:      Vec<PointId>,
    transitions: Vec<Transition>,
    length:      f32,
}

impl NavigationPath {
    /// A path that starts and ends at `source` without moving.
    pub fn new(source: PointId) -> Self {
        Self { points: vec![source], transitions: Vec::new(), length: 0.0 }
    }

    /// A single-leg path covering one transition.
    pub fn from_transition(t: Transition) -> Self {
        Self {
            points:      vec![t.from, t.to],
            transitions: vec![t],
            length:      t.length,
        }
    }

    /// Assemble a path from prebuilt parts.
    ///
    /// # Panics
    /// Panics unless `points.len() == transitions.len() + 1` and every
    /// transition links its surrounding points.
    pub(crate) fn from_parts(points: Vec<PointId>, transitions: Vec<Transition>) -> Self {
        assert_eq!(
            points.len(),
            transitions.len() + 1,
            "path shape broken: {} points for {} transitions",
            points.len(),
            transitions.len(),
        );
        for (i, t) in transitions.iter().enumerate() {
            assert!(
                t.from == points[i] && t.to == points[i + 1],
                "transition {i} ({t}) does not link its surrounding points",
            );
        }
        let length = transitions.iter().map(|t| t.length).sum();
        Self { points, transitions, length }
    }

    // ── Shape queries ─────────────────────────────────────────────────────

    /// First point of the path (where a follower currently is, after cuts).
    #[inline]
    pub fn head(&self) -> PointId {
        self.points[0]
    }

    /// Final point of the path.
    #[inline]
    pub fn target(&self) -> PointId {
        self.points[self.points.len() - 1]
    }

    #[inline]
    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Total geometric length in map units.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// `true` for a path that goes nowhere (single point, no transitions).
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.transitions.is_empty()
    }

    /// `true` when exactly one leg remains.
    #[inline]
    pub fn is_single_transition(&self) -> bool {
        self.transitions.len() == 1
    }

    /// Traversal cost for `mover`: the sum of per-transition costs.  Infinite
    /// if a leg crosses a surface the mover cannot traverse.
    pub fn cost(&self, map: &Map, mover: &impl Mover) -> f32 {
        self.transitions.iter().map(|t| t.cost(map, mover)).sum()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append a transition to the end of the path.
    ///
    /// # Panics
    /// Panics if `t` does not start at the path's current target.
    pub fn add_transition(&mut self, t: Transition) {
        let target = self.target();
        assert!(
            t.from == target,
            "cannot append {t}: path currently ends at {target}",
        );
        self.points.push(t.to);
        self.transitions.push(t);
        self.length += t.length;
    }

    /// Drop everything before the first occurrence of `point`, making it the
    /// new head.  The remaining length is re-summed from the survivors.
    ///
    /// # Panics
    /// Panics if `point` is not on the path.
    pub fn cut_everything_before(&mut self, point: PointId) {
        let idx = self
            .points
            .iter()
            .position(|&p| p == point)
            .unwrap_or_else(|| panic!("{point} is not on this path"));
        self.points.drain(..idx);
        self.transitions.drain(..idx);
        self.length = self.transitions.iter().map(|t| t.length).sum();
    }

    // ── Validity against a live map ───────────────────────────────────────

    /// `true` while every point and line the path references still exists.
    /// Map edits do not chase down outstanding paths; holders re-check (or
    /// re-plan) instead.
    pub fn is_valid(&self, map: &Map) -> bool {
        self.points.iter().all(|&p| map.contains_point(p))
            && self.transitions.iter().all(|t| map.get_line(t.line).is_some())
    }

    /// `true` if `mover` can traverse every leg of the path.
    pub fn can_pass(&self, map: &Map, mover: &impl Mover) -> bool {
        self.transitions
            .iter()
            .all(|t| mover.can_traverse(map.surface(t.surface_id(map))))
    }
}

impl std::fmt::Display for NavigationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NavigationPath({} -> {}, {} leg(s), {:.2}u)",
            self.head(),
            self.target(),
            self.transitions.len(),
            self.length,
        )
    }
}
