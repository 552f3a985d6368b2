//! Unit tests for rw-map.
//!
//! All tests build small hand-crafted maps over the standard surface
//! catalog; no files are read.

#[cfg(test)]
mod helpers {
    use rw_core::{LineId, PointId, SurfaceCatalog, SurfaceId, Vec2};

    use crate::{Map, PointSpec};

    pub fn map() -> Map {
        Map::new(SurfaceCatalog::standard())
    }

    pub fn asphalt(map: &Map) -> SurfaceId {
        map.catalog().by_name("asphalt").unwrap()
    }

    /// Add a line of brand-new points at the given coordinates and return
    /// the line with its point ids in sequence order.
    pub fn line_of(map: &mut Map, coords: &[(f32, f32)]) -> (LineId, Vec<PointId>) {
        let specs = coords
            .iter()
            .map(|&(x, y)| PointSpec::New(Vec2::new(x, y)))
            .collect();
        let surface = asphalt(map);
        let line = map.add_line_feature(specs, surface);
        let points = map.line(line).points().to_vec();
        (line, points)
    }
}

// ── Feature creation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod features {
    use rw_core::Vec2;

    use crate::{MapError, PointSpec};

    #[test]
    fn line_creates_points_and_transitions() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (3.0, 4.0), (3.0, 9.0)]);

        assert_eq!(map.point_count(), 3);
        assert_eq!(map.line_count(), 1);
        // Endpoints get one transition, the interior point two.
        assert_eq!(map.point(pts[0]).transitions().len(), 1);
        assert_eq!(map.point(pts[1]).transitions().len(), 2);
        assert_eq!(map.point(pts[2]).transitions().len(), 1);
        // 3-4-5 triangle for the first segment.
        let t = map.point(pts[0]).transitions()[0];
        assert_eq!(t.to, pts[1]);
        assert_eq!(t.line, line);
        assert_eq!(t.length, 5.0);
    }

    #[test]
    fn shared_point_collects_transitions_from_both_lines() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let mid = pts[1];

        let surface = super::helpers::asphalt(&map);
        map.add_line_feature(
            vec![
                PointSpec::New(Vec2::new(1.0, -1.0)),
                PointSpec::Existing(mid),
                PointSpec::New(Vec2::new(1.0, 1.0)),
            ],
            surface,
        );

        assert_eq!(map.point_count(), 5);
        assert_eq!(map.point(mid).features().len(), 2);
        assert_eq!(map.point(mid).transitions().len(), 4);
    }

    #[test]
    fn consecutive_duplicate_makes_no_self_transition() {
        let mut map = super::helpers::map();
        let surface = super::helpers::asphalt(&map);
        let a = map.add_line_feature(
            vec![
                PointSpec::New(Vec2::new(0.0, 0.0)),
                PointSpec::New(Vec2::new(1.0, 0.0)),
            ],
            surface,
        );
        let pts = map.line(a).points().to_vec();
        // Repeating the same id back to back must not produce a self-edge.
        let b = map.add_line_feature(
            vec![
                PointSpec::Existing(pts[0]),
                PointSpec::Existing(pts[0]),
                PointSpec::Existing(pts[1]),
            ],
            surface,
        );
        for t in map.point(pts[0]).transitions() {
            assert_ne!(t.from, t.to, "self-transitions must never be generated");
        }
        let _ = b;
    }

    #[test]
    #[should_panic]
    fn line_below_two_distinct_points_panics() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        let surface = super::helpers::asphalt(&map);
        map.add_line_feature(
            vec![PointSpec::Existing(pts[0]), PointSpec::Existing(pts[0])],
            surface,
        );
    }

    #[test]
    fn area_creates_no_transitions() {
        let mut map = super::helpers::map();
        let area = map.add_area_feature(
            vec![
                PointSpec::New(Vec2::new(0.0, 0.0)),
                PointSpec::New(Vec2::new(1.0, 0.0)),
                PointSpec::New(Vec2::new(0.0, 1.0)),
            ],
            "grass",
        );
        assert_eq!(map.area_count(), 1);
        for &p in map.area(area).points() {
            assert!(map.point(p).transitions().is_empty());
            assert!(!map.point(p).has_line_feature());
        }
    }

    #[test]
    fn one_marker_per_point() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);

        let m = map.add_marker(PointSpec::Existing(pts[0]), "checkpoint", "start").unwrap();
        assert_eq!(map.marker(m).point(), pts[0]);
        assert_eq!(map.point(pts[0]).marker(), Some(m));

        let second = map.add_marker(PointSpec::Existing(pts[0]), "checkpoint", "again");
        assert!(matches!(second, Err(MapError::MarkerExists(p)) if p == pts[0]));
        assert_eq!(map.marker_count(), 1);
    }
}

// ── Feature deletion ──────────────────────────────────────────────────────────

#[cfg(test)]
mod deletion {
    use rw_core::Vec2;

    use crate::PointSpec;

    #[test]
    fn delete_line_drops_orphaned_points() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        map.delete_line_feature(line);

        assert_eq!(map.line_count(), 0);
        assert_eq!(map.point_count(), 0);
        for p in pts {
            assert!(!map.contains_point(p));
        }
    }

    #[test]
    fn delete_line_keeps_shared_points_and_regenerates() {
        let mut map = super::helpers::map();
        let (l1, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let mid = pts[1];
        let surface = super::helpers::asphalt(&map);
        map.add_line_feature(
            vec![PointSpec::Existing(mid), PointSpec::New(Vec2::new(1.0, 1.0))],
            surface,
        );
        assert_eq!(map.point(mid).transitions().len(), 3);

        map.delete_line_feature(l1);

        assert!(map.contains_point(mid));
        assert!(!map.contains_point(pts[0]));
        assert!(!map.contains_point(pts[2]));
        assert_eq!(map.point(mid).transitions().len(), 1);
    }

    #[test]
    fn marker_keeps_point_alive() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        map.add_marker(PointSpec::Existing(pts[0]), "checkpoint", "here").unwrap();

        map.delete_line_feature(line);

        assert!(map.contains_point(pts[0]), "marked point must survive");
        assert!(!map.contains_point(pts[1]));
        assert!(map.point(pts[0]).transitions().is_empty());
    }

    #[test]
    fn delete_marker_drops_isolated_point() {
        let mut map = super::helpers::map();
        let m = map.add_marker(PointSpec::New(Vec2::new(5.0, 5.0)), "poi", "lone").unwrap();
        assert_eq!(map.point_count(), 1);

        map.delete_marker(m);

        assert_eq!(map.point_count(), 0);
        assert_eq!(map.marker_count(), 0);
    }
}

// ── Point merging ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod merge_points {
    use rw_core::Vec2;

    use crate::{MapError, PointSpec};

    #[test]
    fn reroute_distant_point() {
        let mut map = super::helpers::map();
        let (_, l1_pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        let (l2, l2_pts) = super::helpers::line_of(&mut map, &[(0.1, 0.1), (5.0, 0.0)]);

        map.merge_point_into_point(l2_pts[0], l1_pts[0]).unwrap();

        assert!(!map.contains_point(l2_pts[0]));
        assert_eq!(map.line(l2).points()[0], l1_pts[0]);
        assert_eq!(map.point(l1_pts[0]).features().len(), 2);
        // Target now reaches both neighbors.
        assert_eq!(map.point(l1_pts[0]).transitions().len(), 2);
        // Rerouted segment was re-measured from the target's position.
        let t = map
            .point(l1_pts[0])
            .transitions()
            .iter()
            .find(|t| t.line == l2)
            .copied()
            .unwrap();
        assert_eq!(t.length, 5.0);
    }

    #[test]
    fn adjacent_merge_collapses_segment() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        map.merge_point_into_point(pts[1], pts[2]).unwrap();

        assert_eq!(map.line(line).points(), &[pts[0], pts[2]]);
        assert!(!map.contains_point(pts[1]));
        let t = map.point(pts[0]).transitions()[0];
        assert_eq!(t.to, pts[2]);
        assert_eq!(t.length, 2.0);
    }

    #[test]
    fn merge_at_minimum_size_deletes_line() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);

        map.merge_point_into_point(pts[0], pts[1]).unwrap();

        assert!(map.get_line(line).is_none());
        assert_eq!(map.point_count(), 0);
    }

    #[test]
    fn merge_at_minimum_size_keeps_shared_survivor() {
        let mut map = super::helpers::map();
        let (l1, l1_pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        let b = l1_pts[1];
        let surface = super::helpers::asphalt(&map);
        let l2 = map.add_line_feature(
            vec![PointSpec::Existing(b), PointSpec::New(Vec2::new(2.0, 0.0))],
            surface,
        );

        map.merge_point_into_point(l1_pts[0], b).unwrap();

        assert!(map.get_line(l1).is_none());
        assert!(map.get_line(l2).is_some());
        assert!(map.contains_point(b));
        assert_eq!(map.point(b).transitions().len(), 1);
    }

    #[test]
    fn area_adjacency_wraps_around() {
        let mut map = super::helpers::map();
        let area = map.add_area_feature(
            vec![
                PointSpec::New(Vec2::new(0.0, 0.0)),
                PointSpec::New(Vec2::new(1.0, 0.0)),
                PointSpec::New(Vec2::new(1.0, 1.0)),
                PointSpec::New(Vec2::new(0.0, 1.0)),
            ],
            "grass",
        );
        let pts = map.area(area).points().to_vec();

        // Last and first point share the closing segment.
        map.merge_point_into_point(pts[3], pts[0]).unwrap();

        assert_eq!(map.area(area).points(), &[pts[0], pts[1], pts[2]]);
        assert!(!map.contains_point(pts[3]));
    }

    #[test]
    fn area_at_minimum_size_is_deleted() {
        let mut map = super::helpers::map();
        let area = map.add_area_feature(
            vec![
                PointSpec::New(Vec2::new(0.0, 0.0)),
                PointSpec::New(Vec2::new(1.0, 0.0)),
                PointSpec::New(Vec2::new(0.0, 1.0)),
            ],
            "grass",
        );
        let pts = map.area(area).points().to_vec();

        map.merge_point_into_point(pts[2], pts[1]).unwrap();

        assert_eq!(map.area_count(), 0);
        assert_eq!(map.point_count(), 0);
    }

    #[test]
    fn marker_moves_to_target() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let m = map.add_marker(PointSpec::Existing(pts[0]), "checkpoint", "x").unwrap();

        map.merge_point_into_point(pts[0], pts[1]).unwrap();

        assert_eq!(map.marker(m).point(), pts[1]);
        assert_eq!(map.point(pts[1]).marker(), Some(m));
    }

    #[test]
    fn two_markers_refuse_to_merge() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        map.add_marker(PointSpec::Existing(pts[0]), "checkpoint", "a").unwrap();
        map.add_marker(PointSpec::Existing(pts[1]), "checkpoint", "b").unwrap();

        let err = map.merge_point_into_point(pts[0], pts[1]).unwrap_err();
        assert!(matches!(err, MapError::MarkerCollision { .. }));

        // Nothing was mutated.
        assert!(map.contains_point(pts[0]));
        assert_eq!(map.marker_count(), 2);
        assert_eq!(map.line(line).points(), &[pts[0], pts[1], pts[2]]);
    }

    #[test]
    fn duplicates_from_reroute_are_compacted() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        // Merging an endpoint into the opposite endpoint rewrites the slot
        // (they are not adjacent), leaving the target twice on the line.
        map.merge_point_into_point(pts[0], pts[2]).unwrap();

        assert_eq!(map.line(line).points(), &[pts[2], pts[1]]);
        assert_eq!(map.point(pts[2]).transitions().len(), 1);
        assert_eq!(map.point(pts[1]).transitions().len(), 1);
    }
}

// ── Splitting & joining lines ─────────────────────────────────────────────────

#[cfg(test)]
mod split_join {
    use crate::{FeatureRef, PointSpec};
    use rw_core::Vec2;

    #[test]
    fn split_shares_the_cut_point() {
        let mut map = super::helpers::map();
        let (line, pts) =
            super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);

        let new = map.split_line(line, pts[2]);

        assert_eq!(map.line(line).points(), &[pts[0], pts[1], pts[2]]);
        assert_eq!(map.line(new).points(), &[pts[2], pts[3]]);
        assert_eq!(map.line(new).surface, map.line(line).surface);

        // The cut point belongs to both halves, the moved point only to the new one.
        assert_eq!(map.point(pts[2]).features().len(), 2);
        assert_eq!(map.point(pts[3]).features(), &[FeatureRef::Line(new)]);
        assert_eq!(map.point(pts[2]).transitions().len(), 2);
    }

    #[test]
    #[should_panic]
    fn split_at_endpoint_panics() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        map.split_line(line, pts[0]);
    }

    #[test]
    #[should_panic]
    fn split_at_foreign_point_panics() {
        let mut map = super::helpers::map();
        let (line, _) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let (_, other) = super::helpers::line_of(&mut map, &[(9.0, 9.0), (9.0, 8.0)]);
        map.split_line(line, other[0]);
    }

    #[test]
    fn join_end_to_start() {
        let mut map = super::helpers::map();
        let (l1, l1_pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        let b = l1_pts[1];
        let surface = super::helpers::asphalt(&map);
        let l2 = map.add_line_feature(
            vec![PointSpec::Existing(b), PointSpec::New(Vec2::new(2.0, 0.0))],
            surface,
        );
        let c = map.line(l2).points()[1];

        map.merge_lines(l1, l2, b);

        assert!(map.get_line(l2).is_none());
        assert_eq!(map.line(l1).points(), &[l1_pts[0], b, c]);
        assert_eq!(map.point(b).features(), &[FeatureRef::Line(l1)]);
        assert_eq!(map.point(b).transitions().len(), 2);
    }

    #[test]
    fn join_end_to_end_reverses_absorbed() {
        let mut map = super::helpers::map();
        let (l1, l1_pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        let b = l1_pts[1];
        let surface = super::helpers::asphalt(&map);
        let l2 = map.add_line_feature(
            vec![PointSpec::New(Vec2::new(2.0, 0.0)), PointSpec::Existing(b)],
            surface,
        );
        let c = map.line(l2).points()[0];

        map.merge_lines(l1, l2, b);

        assert_eq!(map.line(l1).points(), &[l1_pts[0], b, c]);
    }

    #[test]
    fn join_start_to_start_reverses_absorbed() {
        let mut map = super::helpers::map();
        let (l1, l1_pts) = super::helpers::line_of(&mut map, &[(1.0, 0.0), (2.0, 0.0)]);
        let b = l1_pts[0];
        let surface = super::helpers::asphalt(&map);
        let l2 = map.add_line_feature(
            vec![PointSpec::Existing(b), PointSpec::New(Vec2::new(0.0, 0.0))],
            surface,
        );
        let c = map.line(l2).points()[1];

        map.merge_lines(l1, l2, b);

        assert_eq!(map.line(l1).points(), &[c, b, l1_pts[1]]);
    }

    #[test]
    fn join_compacts_duplicates_from_splice() {
        let mut map = super::helpers::map();
        let (l1, l1_pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        let surface = super::helpers::asphalt(&map);
        // Absorbed runs back over the same two points.
        let l2 = map.add_line_feature(
            vec![PointSpec::Existing(l1_pts[1]), PointSpec::Existing(l1_pts[0])],
            surface,
        );

        map.merge_lines(l1, l2, l1_pts[1]);

        assert_eq!(map.line(l1).points(), &[l1_pts[0], l1_pts[1]]);
        assert_eq!(map.point(l1_pts[0]).transitions().len(), 1);
    }
}

// ── Point-level edits ─────────────────────────────────────────────────────────

#[cfg(test)]
mod point_edits {
    use rw_core::Vec2;

    use crate::PointSpec;

    #[test]
    fn remove_middle_point_shortens_line() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);

        map.remove_line_point(line, pts[1]);

        assert_eq!(map.line(line).points(), &[pts[0], pts[2]]);
        assert!(!map.contains_point(pts[1]));
        let t = map.point(pts[0]).transitions()[0];
        assert_eq!(t.to, pts[2]);
        assert_eq!(t.length, 2.0);
    }

    #[test]
    fn remove_point_below_minimum_deletes_line() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);

        map.remove_line_point(line, pts[0]);

        assert!(map.get_line(line).is_none());
        assert_eq!(map.point_count(), 0);
    }

    #[test]
    fn remove_area_point_below_minimum_deletes_area() {
        let mut map = super::helpers::map();
        let area = map.add_area_feature(
            vec![
                PointSpec::New(Vec2::new(0.0, 0.0)),
                PointSpec::New(Vec2::new(1.0, 0.0)),
                PointSpec::New(Vec2::new(0.0, 1.0)),
            ],
            "grass",
        );
        let pts = map.area(area).points().to_vec();

        map.remove_area_point(area, pts[0]);

        assert_eq!(map.area_count(), 0);
        assert_eq!(map.point_count(), 0);
    }

    #[test]
    fn insert_point_subdivides_segment() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (2.0, 0.0)]);

        let m = map.insert_line_point(line, 0, PointSpec::New(Vec2::new(1.0, 0.0)));

        assert_eq!(map.line(line).points(), &[pts[0], m, pts[1]]);
        assert_eq!(map.point(m).transitions().len(), 2);
        assert_eq!(map.point(pts[0]).transitions()[0].to, m);
        assert_eq!(map.point(pts[0]).transitions()[0].length, 1.0);
    }

    #[test]
    fn insert_area_point_on_closing_segment() {
        let mut map = super::helpers::map();
        let area = map.add_area_feature(
            vec![
                PointSpec::New(Vec2::new(0.0, 0.0)),
                PointSpec::New(Vec2::new(2.0, 0.0)),
                PointSpec::New(Vec2::new(1.0, 2.0)),
            ],
            "grass",
        );
        let pts = map.area(area).points().to_vec();

        // Segment 2 closes the polygon from the last point back to the first.
        let m = map.insert_area_point(area, 2, PointSpec::New(Vec2::new(0.5, 1.0)));

        assert_eq!(map.area(area).points(), &[pts[0], pts[1], pts[2], m]);
    }

    #[test]
    fn extend_both_ends() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);

        let head = map.extend_line_start(line, PointSpec::New(Vec2::new(-1.0, 0.0)));
        let tail = map.extend_line_end(line, PointSpec::New(Vec2::new(2.0, 0.0)));

        assert_eq!(map.line(line).points(), &[head, pts[0], pts[1], tail]);
        assert_eq!(map.point(head).transitions().len(), 1);
        assert_eq!(map.point(tail).transitions().len(), 1);
        assert_eq!(map.point(pts[0]).transitions().len(), 2);
    }

    #[test]
    fn move_point_remeasures_transitions() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);

        map.move_point(pts[1], Vec2::new(0.0, 5.0));

        assert_eq!(map.point(pts[0]).transitions()[0].length, 5.0);
        assert_eq!(map.point(pts[1]).transitions()[0].length, 5.0);
        assert_eq!(map.nearest_point(Vec2::new(0.0, 4.9)), Some(pts[1]));
    }

    #[test]
    fn duplicate_compaction_is_idempotent() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let surface = super::helpers::asphalt(&map);
        // A line that revisits its first point.
        let looped = map.add_line_feature(
            vec![
                PointSpec::Existing(pts[0]),
                PointSpec::Existing(pts[1]),
                PointSpec::Existing(pts[0]),
                PointSpec::Existing(pts[2]),
            ],
            surface,
        );

        map.remove_duplicate_line_points(looped);
        assert_eq!(map.line(looped).points(), &[pts[0], pts[1], pts[2]]);
        let after_first: Vec<_> = map.point(pts[0]).transitions().to_vec();

        map.remove_duplicate_line_points(looped);
        assert_eq!(map.line(looped).points(), &[pts[0], pts[1], pts[2]]);
        assert_eq!(map.point(pts[0]).transitions(), &after_first[..]);
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use rw_core::Vec2;

    use crate::PointSpec;

    #[test]
    fn nearest_point_picks_closest() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (10.0, 0.0)]);

        assert_eq!(map.nearest_point(Vec2::new(2.0, 1.0)), Some(pts[0]));
        assert_eq!(map.nearest_point(Vec2::new(8.0, -1.0)), Some(pts[1]));
    }

    #[test]
    fn nearest_point_within_respects_radius() {
        let mut map = super::helpers::map();
        let (_, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (10.0, 0.0)]);

        assert_eq!(map.nearest_point_within(Vec2::new(1.0, 0.0), 2.0), Some(pts[0]));
        assert_eq!(map.nearest_point_within(Vec2::new(4.0, 0.0), 2.0), None);
    }

    #[test]
    fn empty_map_has_no_nearest() {
        let map = super::helpers::map();
        assert_eq!(map.nearest_point(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn navigation_points_are_line_members_only() {
        let mut map = super::helpers::map();
        let (_, line_pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);
        map.add_area_feature(
            vec![
                PointSpec::New(Vec2::new(5.0, 5.0)),
                PointSpec::New(Vec2::new(6.0, 5.0)),
                PointSpec::New(Vec2::new(5.0, 6.0)),
            ],
            "grass",
        );
        map.add_marker(PointSpec::New(Vec2::new(9.0, 9.0)), "poi", "off-network").unwrap();

        let mut expected = line_pts.clone();
        expected.sort_unstable();
        assert_eq!(map.navigation_points(), expected);
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use rw_core::{LineId, MarkerId, SurfaceCatalog, Vec2};

    use crate::{LineRecord, Map, MapError, MapSnapshot, MarkerRecord, PointRecord, PointSpec};

    fn two_point_records() -> Vec<PointRecord> {
        vec![
            PointRecord { id: 1, x: 0.0, y: 0.0 },
            PointRecord { id: 2, x: 3.0, y: 4.0 },
        ]
    }

    #[test]
    fn roundtrip_preserves_structure() {
        let mut map = super::helpers::map();
        let (line, pts) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        map.add_area_feature(
            vec![
                PointSpec::Existing(pts[0]),
                PointSpec::New(Vec2::new(0.0, 1.0)),
                PointSpec::New(Vec2::new(1.0, 1.0)),
            ],
            "grass",
        );
        map.add_marker(PointSpec::Existing(pts[1]), "checkpoint", "half").unwrap();

        let snap = map.to_snapshot();
        let rebuilt = Map::from_snapshot(SurfaceCatalog::standard(), &snap).unwrap();

        assert_eq!(rebuilt.point_count(), map.point_count());
        assert_eq!(rebuilt.line_count(), 1);
        assert_eq!(rebuilt.area_count(), 1);
        assert_eq!(rebuilt.marker_count(), 1);
        assert_eq!(rebuilt.line(line).points(), map.line(line).points());
        // Transitions were regenerated, not stored.
        assert_eq!(
            rebuilt.point(pts[1]).transitions(),
            map.point(pts[1]).transitions()
        );
    }

    #[test]
    fn loaded_ids_are_never_reissued() {
        let mut map = super::helpers::map();
        let (line, _) = super::helpers::line_of(&mut map, &[(0.0, 0.0), (1.0, 0.0)]);

        let snap = map.to_snapshot();
        let mut rebuilt = Map::from_snapshot(SurfaceCatalog::standard(), &snap).unwrap();

        let surface = super::helpers::asphalt(&rebuilt);
        let next = rebuilt.add_line_feature(
            vec![
                PointSpec::New(Vec2::new(5.0, 5.0)),
                PointSpec::New(Vec2::new(6.0, 5.0)),
            ],
            surface,
        );
        assert!(next.0 > line.0);
    }

    #[test]
    fn duplicate_point_record_is_an_error() {
        let mut snap = MapSnapshot::default();
        snap.points = two_point_records();
        snap.points.push(PointRecord { id: 1, x: 9.0, y: 9.0 });

        let err = Map::from_snapshot(SurfaceCatalog::standard(), &snap).unwrap_err();
        assert!(matches!(err, MapError::DuplicateRecord(_)));
    }

    #[test]
    fn missing_point_is_an_error() {
        let mut snap = MapSnapshot::default();
        snap.points = two_point_records();
        snap.lines.push(LineRecord {
            id:        1,
            surface:   "asphalt".into(),
            point_ids: vec![1, 99],
        });

        let err = Map::from_snapshot(SurfaceCatalog::standard(), &snap).unwrap_err();
        assert!(matches!(err, MapError::MissingPoint { point: 99, .. }));
    }

    #[test]
    fn unknown_surface_falls_back_to_first() {
        let mut snap = MapSnapshot::default();
        snap.points = two_point_records();
        snap.lines.push(LineRecord {
            id:        1,
            surface:   "moon_dust".into(),
            point_ids: vec![1, 2],
        });

        let map = Map::from_snapshot(SurfaceCatalog::standard(), &snap).unwrap();
        let line = map.line(LineId(1));
        assert_eq!(map.surface(line.surface).name, "asphalt");
    }

    #[test]
    fn unknown_surface_with_empty_catalog_is_an_error() {
        let mut snap = MapSnapshot::default();
        snap.points = two_point_records();
        snap.lines.push(LineRecord {
            id:        1,
            surface:   "moon_dust".into(),
            point_ids: vec![1, 2],
        });

        let err = Map::from_snapshot(SurfaceCatalog::new(), &snap).unwrap_err();
        assert!(matches!(err, MapError::NoFallbackSurface(_)));
    }

    #[test]
    fn degenerate_records_are_skipped() {
        let mut snap = MapSnapshot::default();
        snap.points = two_point_records();
        snap.lines.push(LineRecord {
            id:        1,
            surface:   "asphalt".into(),
            point_ids: vec![1, 1],
        });

        let map = Map::from_snapshot(SurfaceCatalog::standard(), &snap).unwrap();
        assert_eq!(map.line_count(), 0);
        // Points referenced by no surviving record are dropped on load.
        assert_eq!(map.point_count(), 0);
    }

    #[test]
    fn second_marker_on_a_point_is_skipped() {
        let mut snap = MapSnapshot::default();
        snap.points = two_point_records();
        snap.lines.push(LineRecord {
            id:        1,
            surface:   "asphalt".into(),
            point_ids: vec![1, 2],
        });
        snap.markers.push(MarkerRecord {
            id:       1,
            point_id: 1,
            kind:     "checkpoint".into(),
            label:    "a".into(),
        });
        snap.markers.push(MarkerRecord {
            id:       2,
            point_id: 1,
            kind:     "checkpoint".into(),
            label:    "b".into(),
        });

        let map = Map::from_snapshot(SurfaceCatalog::standard(), &snap).unwrap();
        assert_eq!(map.marker_count(), 1);
        assert_eq!(map.marker(MarkerId(1)).label, "a");
    }
}
