//! Flat, serialization-friendly snapshot of a map.
//!
//! A [`MapSnapshot`] holds plain records with raw ids and surface *names*
//! (not `SurfaceId`s, so files survive catalog reordering).  Loading runs
//! through the same installers as live editing, so a rebuilt map carries
//! freshly computed transitions and back-references rather than trusting
//! anything stored.
//!
//! Load resolution rules:
//!
//! - a duplicated record id is a hard error ([`MapError::DuplicateRecord`]),
//! - a feature referencing a missing point is a hard error
//!   ([`MapError::MissingPoint`]),
//! - an unknown surface name falls back to the catalog's first surface with
//!   a warning (no surfaces at all: [`MapError::NoFallbackSurface`]),
//! - a degenerate feature record (too few distinct points) or a second
//!   marker on one point is skipped with a warning.

use rw_core::{AreaId, LineId, MarkerId, PointId, SurfaceCatalog, Vec2};
use rustc_hash::FxHashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};
use crate::feature::{AreaFeature, LineFeature};
use crate::map::Map;

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointRecord {
    pub id: u32,
    pub x:  f32,
    pub y:  f32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineRecord {
    pub id:        u32,
    pub surface:   String,
    pub point_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AreaRecord {
    pub id:        u32,
    pub kind:      String,
    pub point_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkerRecord {
    pub id:       u32,
    pub point_id: u32,
    pub kind:     String,
    pub label:    String,
}

/// Everything needed to rebuild a [`Map`] (minus the surface catalog, which
/// is configuration, not map data).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapSnapshot {
    pub points:  Vec<PointRecord>,
    pub lines:   Vec<LineRecord>,
    pub areas:   Vec<AreaRecord>,
    pub markers: Vec<MarkerRecord>,
}

// ── Map <-> snapshot ──────────────────────────────────────────────────────────

impl Map {
    /// Capture the current map as flat records, sorted by id.
    pub fn to_snapshot(&self) -> MapSnapshot {
        let mut points: Vec<PointRecord> = self
            .points()
            .map(|(id, p)| PointRecord { id: id.0, x: p.pos().x, y: p.pos().y })
            .collect();
        points.sort_unstable_by_key(|r| r.id);

        let mut lines: Vec<LineRecord> = self
            .lines()
            .map(|(id, l)| LineRecord {
                id:        id.0,
                surface:   self.surface(l.surface).name.clone(),
                point_ids: l.points().iter().map(|p| p.0).collect(),
            })
            .collect();
        lines.sort_unstable_by_key(|r| r.id);

        let mut areas: Vec<AreaRecord> = self
            .areas()
            .map(|(id, a)| AreaRecord {
                id:        id.0,
                kind:      a.kind.clone(),
                point_ids: a.points().iter().map(|p| p.0).collect(),
            })
            .collect();
        areas.sort_unstable_by_key(|r| r.id);

        let mut markers: Vec<MarkerRecord> = self
            .markers()
            .map(|(id, m)| MarkerRecord {
                id:       id.0,
                point_id: m.point().0,
                kind:     m.kind.clone(),
                label:    m.label.clone(),
            })
            .collect();
        markers.sort_unstable_by_key(|r| r.id);

        MapSnapshot { points, lines, areas, markers }
    }

    /// Rebuild a map from records.  Id counters resume above the highest
    /// loaded id, so later edits never collide with loaded features.
    pub fn from_snapshot(catalog: SurfaceCatalog, snapshot: &MapSnapshot) -> MapResult<Map> {
        let mut map = Map::new(catalog);

        for rec in &snapshot.points {
            let id = PointId(rec.id);
            if map.contains_point(id) {
                return Err(MapError::DuplicateRecord(format!("{id}")));
            }
            map.install_point(id, Vec2::new(rec.x, rec.y));
        }

        for rec in &snapshot.lines {
            let id = LineId(rec.id);
            if map.get_line(id).is_some() {
                return Err(MapError::DuplicateRecord(format!("{id}")));
            }
            let points = resolve_points(&map, &rec.point_ids, &format!("{id}"))?;
            if distinct(&points) < LineFeature::MIN_POINTS {
                log::warn!("skipping degenerate {id}: fewer than {} distinct points", LineFeature::MIN_POINTS);
                continue;
            }
            let surface = match map.catalog().by_name(&rec.surface) {
                Some(s) => s,
                None => {
                    let fallback = map
                        .catalog()
                        .first()
                        .ok_or_else(|| MapError::NoFallbackSurface(rec.surface.clone()))?;
                    log::warn!(
                        "unknown surface {:?} on {id}; falling back to {:?}",
                        rec.surface,
                        map.surface(fallback).name,
                    );
                    fallback
                }
            };
            map.install_line(id, surface, points);
        }

        for rec in &snapshot.areas {
            let id = AreaId(rec.id);
            if map.get_area(id).is_some() {
                return Err(MapError::DuplicateRecord(format!("{id}")));
            }
            let points = resolve_points(&map, &rec.point_ids, &format!("{id}"))?;
            if distinct(&points) < AreaFeature::MIN_POINTS {
                log::warn!("skipping degenerate {id}: fewer than {} distinct points", AreaFeature::MIN_POINTS);
                continue;
            }
            map.install_area(id, &rec.kind, points);
        }

        for rec in &snapshot.markers {
            let id = MarkerId(rec.id);
            if map.get_marker(id).is_some() {
                return Err(MapError::DuplicateRecord(format!("{id}")));
            }
            let point = PointId(rec.point_id);
            if !map.contains_point(point) {
                return Err(MapError::MissingPoint { record: format!("{id}"), point: rec.point_id });
            }
            if map.point(point).marker().is_some() {
                log::warn!("skipping {id}: {point} already carries a marker");
                continue;
            }
            map.install_marker(id, point, &rec.kind, &rec.label);
        }

        // Loaded points referenced by no surviving record would linger as
        // orphans; the live-edit invariant says they must not exist.
        let orphans: Vec<PointId> = map
            .points()
            .filter(|(_, p)| p.is_orphaned())
            .map(|(id, _)| id)
            .collect();
        for p in orphans {
            log::warn!("dropping {p}: referenced by no feature record");
            map.delete_point(p);
        }

        log::info!("loaded {map} from snapshot");
        Ok(map)
    }
}

fn resolve_points(map: &Map, raw: &[u32], record: &str) -> MapResult<Vec<PointId>> {
    raw.iter()
        .map(|&r| {
            let id = PointId(r);
            if map.contains_point(id) {
                Ok(id)
            } else {
                Err(MapError::MissingPoint { record: record.to_owned(), point: r })
            }
        })
        .collect()
}

fn distinct(points: &[PointId]) -> usize {
    let mut seen = FxHashSet::default();
    points.iter().filter(|p| seen.insert(**p)).count()
}
