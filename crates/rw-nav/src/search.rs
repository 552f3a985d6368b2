//! A* search over the map's cached transitions.
//!
//! Costs are traversal *times* (`length / surface speed for the mover`),
//! so the heuristic divides straight-line distance by [`OPTIMISTIC_SPEED`],
//! an upper bound no mover reaches in practice.  Keeping the heuristic
//! admissible keeps results optimal for the querying mover.
//!
//! Unreachable targets yield `None`, never an error: asking for a route
//! that does not exist is a legitimate question.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use rw_core::{LineId, Mover, PointId};
use rw_map::{Map, Transition};

use crate::path::NavigationPath;

/// Straight-line speed assumed by the A* heuristic, in map units per second.
/// Must stay at or above the fastest effective mover speed.
pub const OPTIMISTIC_SPEED: f32 = 10.0;

/// Min-heap entry: lowest estimated total cost pops first, id breaks ties
/// so exploration order is deterministic.
struct OpenEntry {
    f:     f32,
    point: PointId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.point == other.point
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.point.cmp(&self.point))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `from` to `to` for `mover`, or `None` if unreachable.
///
/// # Panics
/// Panics if either point is not registered in `map`.
pub fn find_path(map: &Map, mover: &impl Mover, from: PointId, to: PointId) -> Option<NavigationPath> {
    find_path_avoiding(map, mover, from, to, &[])
}

/// Like [`find_path`], but transitions along any of `excluded` lines are
/// never taken.
///
/// # Panics
/// Panics if either point is not registered in `map`.
pub fn find_path_avoiding(
    map: &Map,
    mover: &impl Mover,
    from: PointId,
    to: PointId,
    excluded: &[LineId],
) -> Option<NavigationPath> {
    let _ = map.point(from);
    let goal = map.point(to).pos();
    if from == to {
        return Some(NavigationPath::new(from));
    }

    let h = |p: PointId| map.point(p).pos().distance(goal) / OPTIMISTIC_SPEED;

    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut g: FxHashMap<PointId, f32> = FxHashMap::default();
    let mut closed: FxHashSet<PointId> = FxHashSet::default();
    // Best transition into each settled point, plus the transition that
    // preceded each *relaxed* transition: together they let the walk back
    // from the goal recover a consistent chain even after re-relaxations.
    let mut prev_of_point: FxHashMap<PointId, Transition> = FxHashMap::default();
    let mut prev_of_transition: FxHashMap<(PointId, PointId, LineId), Transition> =
        FxHashMap::default();

    g.insert(from, 0.0);
    open.push(OpenEntry { f: h(from), point: from });

    while let Some(OpenEntry { point: current, .. }) = open.pop() {
        if current == to {
            return Some(reconstruct(from, to, &prev_of_point, &prev_of_transition));
        }
        if !closed.insert(current) {
            continue;
        }

        for &t in map.point(current).transitions() {
            if excluded.contains(&t.line) || closed.contains(&t.to) {
                continue;
            }
            if !mover.can_traverse(map.surface(t.surface_id(map))) {
                continue;
            }
            let tentative = g[&current] + t.cost(map, mover);
            if tentative < g.get(&t.to).copied().unwrap_or(f32::INFINITY) {
                g.insert(t.to, tentative);
                prev_of_point.insert(t.to, t);
                if current != from {
                    prev_of_transition.insert(t.key(), prev_of_point[&current]);
                }
                open.push(OpenEntry { f: tentative + h(t.to), point: t.to });
            }
        }
    }

    log::trace!("no path from {from} to {to}");
    None
}

/// Traversal cost of the cheapest path, or `None` if unreachable.
pub fn path_cost(map: &Map, mover: &impl Mover, from: PointId, to: PointId) -> Option<f32> {
    find_path(map, mover, from, to).map(|p| p.cost(map, mover))
}

fn reconstruct(
    from: PointId,
    to: PointId,
    prev_of_point: &FxHashMap<PointId, Transition>,
    prev_of_transition: &FxHashMap<(PointId, PointId, LineId), Transition>,
) -> NavigationPath {
    let mut rev: Vec<Transition> = Vec::new();
    let mut t = prev_of_point[&to];
    loop {
        rev.push(t);
        if t.from == from {
            break;
        }
        t = prev_of_transition[&t.key()];
    }

    let mut points = Vec::with_capacity(rev.len() + 1);
    points.push(from);
    let transitions: Vec<Transition> = rev.into_iter().rev().collect();
    for t in &transitions {
        points.push(t.to);
    }
    NavigationPath::from_parts(points, transitions)
}
