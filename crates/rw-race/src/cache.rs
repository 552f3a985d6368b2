//! Memoized "best path to the finish" lookups.
//!
//! Ranking a field of racers needs a distance-to-finish estimate for every
//! one of them, every time standings are read.  Computing A* per racer per
//! query would dwarf the rest of the tick, so the cache memoizes one
//! mover-agnostic best path per origin point.  Unreachable origins memoize
//! as `None`, so repeated queries for a dead-end cost one hash lookup.
//!
//! Estimates are priced for a [`Baseline`] mover: standings compare racers
//! on the same yardstick regardless of their individual surface strengths.
//!
//! The cache holds ids only and is tied to the map it was filled from; map
//! edits invalidate it wholesale ([`clear`](BestPathCache::clear)).

use rustc_hash::FxHashMap;

use rw_core::{Baseline, PointId};
use rw_map::Map;
use rw_nav::{NavigationPath, find_path};

/// Shared, lazily-filled table of best paths to one fixed finish point.
#[derive(Debug)]
pub struct BestPathCache {
    finish: PointId,
    paths:  FxHashMap<PointId, Option<NavigationPath>>,
}

impl BestPathCache {
    pub fn new(finish: PointId) -> Self {
        Self { finish, paths: FxHashMap::default() }
    }

    /// The finish point every cached path leads to.
    #[inline]
    pub fn finish(&self) -> PointId {
        self.finish
    }

    /// Best path from `from` to the finish, computing and memoizing it on
    /// first use.  `None` (also memoized) if the finish is unreachable.
    ///
    /// # Panics
    /// Panics if `from` is not registered in `map`.
    pub fn best_from(&mut self, map: &Map, from: PointId) -> Option<&NavigationPath> {
        let finish = self.finish;
        self.paths
            .entry(from)
            .or_insert_with(|| find_path(map, &Baseline, from, finish))
            .as_ref()
    }

    /// Length of the best path from `from`, or `None` if unreachable.
    pub fn best_length_from(&mut self, map: &Map, from: PointId) -> Option<f32> {
        self.best_from(map, from).map(|p| p.length())
    }

    /// Number of memoized origins (including unreachable ones).
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Forget everything.  Required after any map edit.
    pub fn clear(&mut self) {
        self.paths.clear();
    }
}
