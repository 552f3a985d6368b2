//! The mutable spatial map: registries, edit operations, and transition
//! regeneration.
//!
//! # Data layout
//!
//! Points, lines, areas, and markers live in id-keyed `FxHashMap` registries
//! with monotonically increasing id counters (ids are never reused within a
//! map's lifetime).  Features reference points by `PointId` only; each point
//! mirrors its memberships in a back-reference list.  An `rstar` R-tree over
//! point positions serves nearest-point queries for click snapping.
//!
//! # Invariants maintained by every operation
//!
//! - A line feature keeps ≥ 2 distinct points, an area ≥ 3; an edit that
//!   would violate this deletes the feature instead of leaving it invalid.
//! - A point belongs to the registry iff at least one feature references it;
//!   orphans are deleted eagerly.
//! - Back-references list each containing feature exactly once.
//! - A point's cached transitions always reflect the current point sequences
//!   of its lines: any structural change to a line regenerates the complete
//!   transition list of every member point.  Nothing is patched incrementally.
//!
//! # Preconditions
//!
//! Operations on unregistered ids, splits at endpoints, merges at non-shared
//! points, and the like are caller bugs and panic.  Recoverable conflicts
//! (marker collisions) return `MapError`.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::{FxHashMap, FxHashSet};

use rw_core::{AreaId, LineId, MarkerId, PointId, Surface, SurfaceCatalog, SurfaceId, Vec2};

use crate::error::{MapError, MapResult};
use crate::feature::{AreaFeature, FeatureRef, LineFeature, MarkerFeature};
use crate::point::{Point, PointSpec};
use crate::transition::Transition;

// ── R-tree point entry ────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a position with its `PointId`.
#[derive(Clone, Debug, PartialEq)]
struct PointEntry {
    point: [f32; 2],
    id: PointId,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PointEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Map ───────────────────────────────────────────────────────────────────────

/// The spatial network and everything attached to it.
#[derive(Debug)]
pub struct Map {
    catalog: SurfaceCatalog,

    points:  FxHashMap<PointId, Point>,
    lines:   FxHashMap<LineId, LineFeature>,
    areas:   FxHashMap<AreaId, AreaFeature>,
    markers: FxHashMap<MarkerId, MarkerFeature>,

    next_point:  u32,
    next_line:   u32,
    next_area:   u32,
    next_marker: u32,

    spatial_idx: RTree<PointEntry>,
}

impl Map {
    /// An empty map over the given surface catalog.  Ids start at 1.
    pub fn new(catalog: SurfaceCatalog) -> Self {
        Self {
            catalog,
            points:  FxHashMap::default(),
            lines:   FxHashMap::default(),
            areas:   FxHashMap::default(),
            markers: FxHashMap::default(),
            next_point:  1,
            next_line:   1,
            next_area:   1,
            next_marker: 1,
            spatial_idx: RTree::new(),
        }
    }

    // ── Catalog access ────────────────────────────────────────────────────

    #[inline]
    pub fn catalog(&self) -> &SurfaceCatalog {
        &self.catalog
    }

    /// # Panics
    /// Panics if `id` was not issued by this map's catalog.
    #[inline]
    pub fn surface(&self, id: SurfaceId) -> &Surface {
        self.catalog.get(id)
    }

    // ── Registry accessors ────────────────────────────────────────────────

    /// # Panics
    /// Panics if `id` is not registered.
    pub fn point(&self, id: PointId) -> &Point {
        self.points
            .get(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    pub fn get_point(&self, id: PointId) -> Option<&Point> {
        self.points.get(&id)
    }

    /// # Panics
    /// Panics if `id` is not registered.
    pub fn line(&self, id: LineId) -> &LineFeature {
        self.lines
            .get(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    pub fn get_line(&self, id: LineId) -> Option<&LineFeature> {
        self.lines.get(&id)
    }

    /// # Panics
    /// Panics if `id` is not registered.
    pub fn area(&self, id: AreaId) -> &AreaFeature {
        self.areas
            .get(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    pub fn get_area(&self, id: AreaId) -> Option<&AreaFeature> {
        self.areas.get(&id)
    }

    /// # Panics
    /// Panics if `id` is not registered.
    pub fn marker(&self, id: MarkerId) -> &MarkerFeature {
        self.markers
            .get(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    pub fn get_marker(&self, id: MarkerId) -> Option<&MarkerFeature> {
        self.markers.get(&id)
    }

    #[inline]
    pub fn contains_point(&self, id: PointId) -> bool {
        self.points.contains_key(&id)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.points.iter().map(|(&id, p)| (id, p))
    }

    pub fn lines(&self) -> impl Iterator<Item = (LineId, &LineFeature)> {
        self.lines.iter().map(|(&id, l)| (id, l))
    }

    pub fn areas(&self) -> impl Iterator<Item = (AreaId, &AreaFeature)> {
        self.areas.iter().map(|(&id, a)| (id, a))
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &MarkerFeature)> {
        self.markers.iter().map(|(&id, m)| (id, m))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The registered point nearest to `pos`.  `None` only on an empty map.
    pub fn nearest_point(&self, pos: Vec2) -> Option<PointId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .map(|e| e.id)
    }

    /// Like [`nearest_point`](Self::nearest_point) but only within
    /// `max_dist` map units — the snapping query editors want.
    pub fn nearest_point_within(&self, pos: Vec2, max_dist: f32) -> Option<PointId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x, pos.y])
            .filter(|e| e.distance_2(&[pos.x, pos.y]) <= max_dist * max_dist)
            .map(|e| e.id)
    }

    /// Every point lying on at least one line feature, sorted by id.
    pub fn navigation_points(&self) -> Vec<PointId> {
        let mut out: Vec<PointId> = self
            .points
            .iter()
            .filter(|(_, p)| p.has_line_feature())
            .map(|(&id, _)| id)
            .collect();
        out.sort_unstable();
        out
    }

    // ── Feature creation ──────────────────────────────────────────────────

    /// Create a line feature over the given points, registering any
    /// `PointSpec::New` positions on the way.
    ///
    /// # Panics
    /// Panics if fewer than 2 distinct points are supplied, or if an
    /// `Existing` spec names an unregistered point.
    pub fn add_line_feature(&mut self, specs: Vec<PointSpec>, surface: SurfaceId) -> LineId {
        let points: Vec<PointId> = specs.into_iter().map(|s| self.resolve_spec(s)).collect();
        let distinct = distinct_count(&points);
        assert!(
            distinct >= LineFeature::MIN_POINTS,
            "a line feature needs at least {} distinct points, got {distinct}",
            LineFeature::MIN_POINTS,
        );
        let id = LineId(self.next_line);
        self.install_line(id, surface, points);
        id
    }

    /// Create an area feature (closed polygon) over the given points.
    ///
    /// # Panics
    /// Panics if fewer than 3 distinct points are supplied, or if an
    /// `Existing` spec names an unregistered point.
    pub fn add_area_feature(&mut self, specs: Vec<PointSpec>, kind: &str) -> AreaId {
        let points: Vec<PointId> = specs.into_iter().map(|s| self.resolve_spec(s)).collect();
        let distinct = distinct_count(&points);
        assert!(
            distinct >= AreaFeature::MIN_POINTS,
            "an area feature needs at least {} distinct points, got {distinct}",
            AreaFeature::MIN_POINTS,
        );
        let id = AreaId(self.next_area);
        self.install_area(id, kind, points);
        id
    }

    /// Pin a marker to a point.  At most one marker per point.
    pub fn add_marker(&mut self, spec: PointSpec, kind: &str, label: &str) -> MapResult<MarkerId> {
        if let PointSpec::Existing(p) = spec {
            if self.point(p).marker().is_some() {
                return Err(MapError::MarkerExists(p));
            }
        }
        let point = self.resolve_spec(spec);
        let id = MarkerId(self.next_marker);
        self.install_marker(id, point, kind, label);
        Ok(id)
    }

    // ── Feature deletion ──────────────────────────────────────────────────

    /// Delete a line feature; member points lose their back-reference, get
    /// their transitions regenerated, and are deleted if left orphaned.
    ///
    /// # Panics
    /// Panics if `line` is not registered.
    pub fn delete_line_feature(&mut self, line: LineId) {
        let feature = self
            .lines
            .remove(&line)
            .unwrap_or_else(|| panic!("{line} is not registered in this map"));
        let mut seen = FxHashSet::default();
        for &p in &feature.points {
            if !seen.insert(p) {
                continue;
            }
            self.point_mut(p).features.retain(|f| *f != FeatureRef::Line(line));
            self.rebuild_point_transitions(p);
            self.delete_point_if_orphaned(p);
        }
    }

    /// Delete an area feature; see [`delete_line_feature`](Self::delete_line_feature).
    ///
    /// # Panics
    /// Panics if `area` is not registered.
    pub fn delete_area_feature(&mut self, area: AreaId) {
        let feature = self
            .areas
            .remove(&area)
            .unwrap_or_else(|| panic!("{area} is not registered in this map"));
        let mut seen = FxHashSet::default();
        for &p in &feature.points {
            if !seen.insert(p) {
                continue;
            }
            self.point_mut(p).features.retain(|f| *f != FeatureRef::Area(area));
            self.delete_point_if_orphaned(p);
        }
    }

    /// Delete a marker; its point is deleted if left orphaned.
    ///
    /// # Panics
    /// Panics if `marker` is not registered.
    pub fn delete_marker(&mut self, marker: MarkerId) {
        let m = self
            .markers
            .remove(&marker)
            .unwrap_or_else(|| panic!("{marker} is not registered in this map"));
        let p = m.point;
        self.point_mut(p).features.retain(|f| *f != FeatureRef::Marker(marker));
        self.delete_point_if_orphaned(p);
    }

    // ── Point merging ─────────────────────────────────────────────────────

    /// Merge `merged` into `target`: every feature referencing `merged` is
    /// rerouted onto `target`, then `merged` is deleted.
    ///
    /// Where the two points are already adjacent within a feature (for areas,
    /// adjacency wraps around the polygon), the shared segment collapses by
    /// dropping `merged`'s slot.  A feature that would fall below its minimum
    /// size is deleted whole instead of being partially edited.  Afterwards
    /// every affected feature is compacted (first occurrence of a duplicated
    /// point wins) and line transitions are regenerated.
    ///
    /// `merged`'s marker, if any, moves to `target`; if both points carry
    /// markers the merge is refused with [`MapError::MarkerCollision`] before
    /// anything is mutated.
    ///
    /// # Panics
    /// Panics if either point is unregistered, or if `merged == target`.
    pub fn merge_point_into_point(&mut self, merged: PointId, target: PointId) -> MapResult<()> {
        assert!(merged != target, "cannot merge {merged} into itself");
        if self.point(merged).marker().is_some() && self.point(target).marker().is_some() {
            return Err(MapError::MarkerCollision { merged, kept: target });
        }

        let feats: Vec<FeatureRef> = self.point(merged).features.clone();
        let mut staged_lines: Vec<LineId> = Vec::new();
        let mut staged_areas: Vec<AreaId> = Vec::new();

        for feat in feats {
            let staged = match feat {
                FeatureRef::Marker(m) => {
                    self.marker_mut(m).point = target;
                    false
                }
                FeatureRef::Line(l) => {
                    if self.reroute_line(l, merged, target) {
                        staged_lines.push(l);
                        true
                    } else {
                        false
                    }
                }
                FeatureRef::Area(a) => {
                    if self.reroute_area(a, merged, target) {
                        staged_areas.push(a);
                        true
                    } else {
                        false
                    }
                }
            };
            // A staged feature keeps its reference to `merged` so the delete
            // path below can clean up normally.
            if !staged {
                self.point_mut(merged).features.retain(|f| *f != feat);
                self.attach(target, feat);
            }
        }

        for l in staged_lines {
            log::debug!("merge of {merged} into {target} collapses {l}; deleting it");
            self.delete_line_feature(l);
        }
        for a in staged_areas {
            log::debug!("merge of {merged} into {target} collapses {a}; deleting it");
            self.delete_area_feature(a);
        }

        // The staged deletions may already have removed `merged` as an orphan.
        if self.points.contains_key(&merged) {
            self.delete_point(merged);
        }

        // Rerouting can leave `target` duplicated inside a feature; compact,
        // which may itself delete features that collapse below minimum size.
        if self.points.contains_key(&target) {
            for feat in self.point(target).features.clone() {
                match feat {
                    FeatureRef::Line(l) if self.lines.contains_key(&l) => {
                        self.remove_duplicate_line_points(l);
                    }
                    FeatureRef::Area(a) if self.areas.contains_key(&a) => {
                        self.remove_duplicate_area_points(a);
                    }
                    _ => {}
                }
            }
        }
        if let Some(pt) = self.points.get(&target) {
            let lines: Vec<LineId> = pt.line_features().collect();
            for l in lines {
                self.rebuild_line_transitions(l);
            }
        }
        Ok(())
    }

    /// Rewrite every occurrence of `merged` in `line` to `target`, collapsing
    /// segments where the two are adjacent.  Returns `true` if the line must
    /// be deleted instead (collapse would drop it below minimum size).
    fn reroute_line(&mut self, line: LineId, merged: PointId, target: PointId) -> bool {
        let feature = self
            .lines
            .get_mut(&line)
            .unwrap_or_else(|| panic!("{line} is not registered in this map"));
        loop {
            let Some(idx) = feature.points.iter().position(|&p| p == merged) else {
                return false;
            };
            let n = feature.points.len();
            let adjacent = (idx > 0 && feature.points[idx - 1] == target)
                || (idx + 1 < n && feature.points[idx + 1] == target);
            if adjacent {
                if n <= LineFeature::MIN_POINTS {
                    return true;
                }
                feature.points.remove(idx);
            } else {
                feature.points[idx] = target;
            }
        }
    }

    /// Area version of [`reroute_line`](Self::reroute_line); adjacency wraps
    /// around the polygon (last and first points share the closing segment).
    fn reroute_area(&mut self, area: AreaId, merged: PointId, target: PointId) -> bool {
        let feature = self
            .areas
            .get_mut(&area)
            .unwrap_or_else(|| panic!("{area} is not registered in this map"));
        loop {
            let Some(idx) = feature.points.iter().position(|&p| p == merged) else {
                return false;
            };
            let n = feature.points.len();
            let adjacent = feature.points[(idx + 1) % n] == target
                || feature.points[(idx + n - 1) % n] == target;
            if adjacent {
                if n <= AreaFeature::MIN_POINTS {
                    return true;
                }
                feature.points.remove(idx);
            } else {
                feature.points[idx] = target;
            }
        }
    }

    // ── Line splitting & joining ──────────────────────────────────────────

    /// Split one line feature into two at an interior point.  The original
    /// keeps the points up to and including `at`; the returned new line owns
    /// the rest (plus `at`, which now belongs to both).
    ///
    /// # Panics
    /// Panics if `line` is unregistered, if `at` is not on the line, or if
    /// `at` is an endpoint.
    pub fn split_line(&mut self, line: LineId, at: PointId) -> LineId {
        let feature = self.line(line);
        let idx = feature
            .points
            .iter()
            .position(|&p| p == at)
            .unwrap_or_else(|| panic!("{at} is not on {line}"));
        assert!(
            idx != 0 && idx != feature.points.len() - 1,
            "cannot split {line} at its endpoint {at}"
        );

        let surface = feature.surface;
        let tail: Vec<PointId> = feature.points[idx..].to_vec();
        let moved: Vec<PointId> = feature.points[idx + 1..].to_vec();

        self.line_mut(line).points.truncate(idx + 1);

        // Moved points leave the original line unless they still occur in the
        // kept head (possible on self-overlapping lines).
        let mut seen = FxHashSet::default();
        for &p in &moved {
            if seen.insert(p) && !self.line(line).contains(p) {
                self.point_mut(p).features.retain(|f| *f != FeatureRef::Line(line));
            }
        }

        let new = self.add_line_feature(tail.into_iter().map(PointSpec::Existing).collect(), surface);
        self.rebuild_line_transitions(line);
        new
    }

    /// Join `absorbed` into `extended` at a shared endpoint, covering all
    /// four directional pairings, then delete `absorbed` and compact any
    /// duplicates the splice produced.
    ///
    /// # Panics
    /// Panics if either line is unregistered, if the two are the same line,
    /// or if `at` is not an endpoint of both.
    pub fn merge_lines(&mut self, extended: LineId, absorbed: LineId, at: PointId) {
        assert!(extended != absorbed, "cannot merge {extended} with itself");
        let l1 = self.line(extended);
        let l2 = self.line(absorbed);
        let at_l1_start = at == l1.start_point();
        assert!(
            at_l1_start || at == l1.end_point(),
            "{at} is not an endpoint of {extended}"
        );
        let at_l2_start = at == l2.start_point();
        assert!(
            at_l2_start || at == l2.end_point(),
            "{at} is not an endpoint of {absorbed}"
        );

        // Orient the absorbed sequence so it chains through `at`, minus the
        // shared point itself (the extended line already has it).
        let mut incoming: Vec<PointId> = if at_l2_start {
            l2.points[1..].to_vec()
        } else {
            l2.points[..l2.points.len() - 1].to_vec()
        };

        let spliced: Vec<PointId> = if at_l1_start {
            if at_l2_start {
                incoming.reverse();
            }
            incoming.into_iter().chain(l1.points.iter().copied()).collect()
        } else {
            if !at_l2_start {
                incoming.reverse();
            }
            l1.points.iter().copied().chain(incoming).collect()
        };

        let absorbed_points = self.line(absorbed).points.clone();
        self.line_mut(extended).points = spliced;

        let mut seen = FxHashSet::default();
        for &p in &absorbed_points {
            if seen.insert(p) {
                self.attach(p, FeatureRef::Line(extended));
            }
        }

        self.delete_line_feature(absorbed);
        self.remove_duplicate_line_points(extended);
        if self.lines.contains_key(&extended) {
            self.rebuild_line_transitions(extended);
        }
    }

    // ── Point-level edits ─────────────────────────────────────────────────

    /// Remove one occurrence of `point` from `line`; if the line would drop
    /// below its minimum distinct-point count, the whole line is deleted.
    ///
    /// # Panics
    /// Panics if `line` is unregistered or does not contain `point`.
    pub fn remove_line_point(&mut self, line: LineId, point: PointId) {
        let feature = self.line(line);
        let idx = feature
            .points
            .iter()
            .position(|&p| p == point)
            .unwrap_or_else(|| panic!("{point} is not on {line}"));

        let mut remaining = feature.points.clone();
        remaining.remove(idx);
        if distinct_count(&remaining) < LineFeature::MIN_POINTS {
            log::debug!("removing {point} would collapse {line}; deleting it");
            self.delete_line_feature(line);
            return;
        }

        let still_member = remaining.contains(&point);
        self.line_mut(line).points = remaining;
        if !still_member {
            self.point_mut(point).features.retain(|f| *f != FeatureRef::Line(line));
            self.rebuild_point_transitions(point);
            self.delete_point_if_orphaned(point);
        }
        self.rebuild_line_transitions(line);
    }

    /// Remove one occurrence of `point` from `area`; if the area would drop
    /// below its minimum distinct-point count, the whole area is deleted.
    ///
    /// # Panics
    /// Panics if `area` is unregistered or does not contain `point`.
    pub fn remove_area_point(&mut self, area: AreaId, point: PointId) {
        let feature = self.area(area);
        let idx = feature
            .points
            .iter()
            .position(|&p| p == point)
            .unwrap_or_else(|| panic!("{point} is not on {area}"));

        let mut remaining = feature.points.clone();
        remaining.remove(idx);
        if distinct_count(&remaining) < AreaFeature::MIN_POINTS {
            log::debug!("removing {point} would collapse {area}; deleting it");
            self.delete_area_feature(area);
            return;
        }

        let still_member = remaining.contains(&point);
        self.area_mut(area).points = remaining;
        if !still_member {
            self.point_mut(point).features.retain(|f| *f != FeatureRef::Area(area));
            self.delete_point_if_orphaned(point);
        }
    }

    /// Subdivide line segment `segment` (0-based, between `points[segment]`
    /// and `points[segment + 1]`) by inserting a point after it.
    ///
    /// # Panics
    /// Panics if `line` is unregistered or `segment` is out of range.
    pub fn insert_line_point(&mut self, line: LineId, segment: usize, spec: PointSpec) -> PointId {
        let len = self.line(line).points.len();
        assert!(segment + 1 < len, "{line} has no segment {segment}");
        let p = self.resolve_spec(spec);
        self.line_mut(line).points.insert(segment + 1, p);
        self.attach(p, FeatureRef::Line(line));
        self.rebuild_line_transitions(line);
        p
    }

    /// Subdivide area segment `segment`.  Segment `len - 1` is the implicit
    /// closing segment from the last point back to the first.
    ///
    /// # Panics
    /// Panics if `area` is unregistered or `segment` is out of range.
    pub fn insert_area_point(&mut self, area: AreaId, segment: usize, spec: PointSpec) -> PointId {
        let len = self.area(area).points.len();
        assert!(segment < len, "{area} has no segment {segment}");
        let p = self.resolve_spec(spec);
        self.area_mut(area).points.insert(segment + 1, p);
        self.attach(p, FeatureRef::Area(area));
        p
    }

    /// Grow a line by one point before its current start.
    ///
    /// # Panics
    /// Panics if `line` is unregistered.
    pub fn extend_line_start(&mut self, line: LineId, spec: PointSpec) -> PointId {
        let _ = self.line(line);
        let p = self.resolve_spec(spec);
        self.line_mut(line).points.insert(0, p);
        self.attach(p, FeatureRef::Line(line));
        self.rebuild_line_transitions(line);
        p
    }

    /// Grow a line by one point after its current end.
    ///
    /// # Panics
    /// Panics if `line` is unregistered.
    pub fn extend_line_end(&mut self, line: LineId, spec: PointSpec) -> PointId {
        let _ = self.line(line);
        let p = self.resolve_spec(spec);
        self.line_mut(line).points.push(p);
        self.attach(p, FeatureRef::Line(line));
        self.rebuild_line_transitions(line);
        p
    }

    /// Relocate a registered point, keeping the spatial index and every
    /// affected line's transition lengths in sync.
    ///
    /// # Panics
    /// Panics if `point` is not registered.
    pub fn move_point(&mut self, point: PointId, pos: Vec2) {
        let old = self.point(point).pos;
        self.spatial_idx.remove(&PointEntry { point: [old.x, old.y], id: point });
        self.point_mut(point).pos = pos;
        self.spatial_idx.insert(PointEntry { point: [pos.x, pos.y], id: point });

        let lines: Vec<LineId> = self.point(point).line_features().collect();
        for l in lines {
            self.rebuild_line_transitions(l);
        }
    }

    // ── Duplicate compaction ──────────────────────────────────────────────

    /// Drop all repeated occurrences of points in `line`, keeping the first
    /// of each.  Deletes the line if compaction leaves it below minimum size.
    /// Idempotent: a second call is a no-op.
    ///
    /// # Panics
    /// Panics if `line` is not registered.
    pub fn remove_duplicate_line_points(&mut self, line: LineId) {
        let feature = self.line(line);
        let (kept, dropped) = split_first_occurrences(&feature.points);
        if dropped == 0 {
            return;
        }
        log::debug!("{line}: dropping {dropped} duplicate point occurrence(s)");
        if kept.len() < LineFeature::MIN_POINTS {
            log::debug!("{line} collapsed below {} points; deleting it", LineFeature::MIN_POINTS);
            self.delete_line_feature(line);
            return;
        }
        self.line_mut(line).points = kept;
        self.rebuild_line_transitions(line);
    }

    /// Area version of [`remove_duplicate_line_points`](Self::remove_duplicate_line_points).
    ///
    /// # Panics
    /// Panics if `area` is not registered.
    pub fn remove_duplicate_area_points(&mut self, area: AreaId) {
        let feature = self.area(area);
        let (kept, dropped) = split_first_occurrences(&feature.points);
        if dropped == 0 {
            return;
        }
        log::debug!("{area}: dropping {dropped} duplicate point occurrence(s)");
        if kept.len() < AreaFeature::MIN_POINTS {
            log::debug!("{area} collapsed below {} points; deleting it", AreaFeature::MIN_POINTS);
            self.delete_area_feature(area);
            return;
        }
        self.area_mut(area).points = kept;
    }

    // ── Internals: registration & plumbing ────────────────────────────────

    fn resolve_spec(&mut self, spec: PointSpec) -> PointId {
        match spec {
            PointSpec::Existing(id) => {
                let _ = self.point(id);
                id
            }
            PointSpec::New(pos) => self.register_point(pos),
        }
    }

    fn register_point(&mut self, pos: Vec2) -> PointId {
        let id = PointId(self.next_point);
        self.install_point(id, pos);
        id
    }

    pub(crate) fn install_point(&mut self, id: PointId, pos: Vec2) {
        self.next_point = self.next_point.max(id.0.saturating_add(1));
        self.points.insert(id, Point::new(pos));
        self.spatial_idx.insert(PointEntry { point: [pos.x, pos.y], id });
    }

    pub(crate) fn install_line(&mut self, id: LineId, surface: SurfaceId, points: Vec<PointId>) {
        self.next_line = self.next_line.max(id.0.saturating_add(1));
        let mut seen = FxHashSet::default();
        for &p in &points {
            if seen.insert(p) {
                self.attach(p, FeatureRef::Line(id));
            }
        }
        self.lines.insert(id, LineFeature { surface, points });
        self.rebuild_line_transitions(id);
    }

    pub(crate) fn install_area(&mut self, id: AreaId, kind: &str, points: Vec<PointId>) {
        self.next_area = self.next_area.max(id.0.saturating_add(1));
        let mut seen = FxHashSet::default();
        for &p in &points {
            if seen.insert(p) {
                self.attach(p, FeatureRef::Area(id));
            }
        }
        self.areas.insert(id, AreaFeature { kind: kind.to_owned(), points });
    }

    pub(crate) fn install_marker(&mut self, id: MarkerId, point: PointId, kind: &str, label: &str) {
        self.next_marker = self.next_marker.max(id.0.saturating_add(1));
        self.markers.insert(
            id,
            MarkerFeature {
                point,
                kind: kind.to_owned(),
                label: label.to_owned(),
            },
        );
        self.attach(point, FeatureRef::Marker(id));
    }

    /// Add a back-reference, once.
    fn attach(&mut self, point: PointId, feat: FeatureRef) {
        let pt = self.point_mut(point);
        if !pt.features.contains(&feat) {
            pt.features.push(feat);
        }
    }

    fn delete_point_if_orphaned(&mut self, point: PointId) {
        if self.point(point).is_orphaned() {
            self.delete_point(point);
        }
    }

    /// # Panics
    /// Panics if the point still belongs to any feature.
    pub(crate) fn delete_point(&mut self, point: PointId) {
        let pt = self
            .points
            .remove(&point)
            .unwrap_or_else(|| panic!("{point} is not registered in this map"));
        assert!(
            pt.features.is_empty(),
            "deleting {point} which still belongs to {} feature(s)",
            pt.features.len()
        );
        self.spatial_idx.remove(&PointEntry { point: [pt.pos.x, pt.pos.y], id: point });
    }

    fn point_mut(&mut self, id: PointId) -> &mut Point {
        self.points
            .get_mut(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    fn line_mut(&mut self, id: LineId) -> &mut LineFeature {
        self.lines
            .get_mut(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    fn area_mut(&mut self, id: AreaId) -> &mut AreaFeature {
        self.areas
            .get_mut(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    fn marker_mut(&mut self, id: MarkerId) -> &mut MarkerFeature {
        self.markers
            .get_mut(&id)
            .unwrap_or_else(|| panic!("{id} is not registered in this map"))
    }

    // ── Transition regeneration ───────────────────────────────────────────

    /// Regenerate the transitions of every point on `line`.  Called after
    /// any structural change to the line's point sequence.
    pub(crate) fn rebuild_line_transitions(&mut self, line: LineId) {
        let points = self.line(line).points.clone();
        let mut seen = FxHashSet::default();
        for p in points {
            if seen.insert(p) {
                self.rebuild_point_transitions(p);
            }
        }
    }

    /// Recompute one point's complete outgoing-transition list from scratch,
    /// scanning every occurrence of the point on every containing line.
    pub(crate) fn rebuild_point_transitions(&mut self, point: PointId) {
        let pos = self.point(point).pos;
        let mut out: Vec<Transition> = Vec::new();
        for l in self.point(point).line_features().collect::<Vec<_>>() {
            let feature = self.line(l);
            let n = feature.points.len();
            for (i, &pid) in feature.points.iter().enumerate() {
                if pid != point {
                    continue;
                }
                if i > 0 {
                    let prev = feature.points[i - 1];
                    if prev != point {
                        out.push(Transition::new(point, prev, l, pos.distance(self.point(prev).pos)));
                    }
                }
                if i + 1 < n {
                    let next = feature.points[i + 1];
                    if next != point {
                        out.push(Transition::new(point, next, l, pos.distance(self.point(next).pos)));
                    }
                }
            }
        }
        self.point_mut(point).transitions = out;
    }
}

impl std::fmt::Display for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Map({} points, {} lines, {} areas, {} markers)",
            self.points.len(),
            self.lines.len(),
            self.areas.len(),
            self.markers.len()
        )
    }
}

// ── Free helpers ──────────────────────────────────────────────────────────────

fn distinct_count(points: &[PointId]) -> usize {
    let mut seen = FxHashSet::default();
    points.iter().filter(|p| seen.insert(**p)).count()
}

/// Keep the first occurrence of every point, in order; count what was dropped.
fn split_first_occurrences(points: &[PointId]) -> (Vec<PointId>, usize) {
    let mut seen = FxHashSet::default();
    let mut kept = Vec::with_capacity(points.len());
    for &p in points {
        if seen.insert(p) {
            kept.push(p);
        }
    }
    let dropped = points.len() - kept.len();
    (kept, dropped)
}
