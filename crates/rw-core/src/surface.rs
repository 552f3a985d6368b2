//! Surface types and the surface catalog.
//!
//! A `Surface` carries the two parameters the cost and stamina models need:
//! the reference traversal speed (units/second for a baseline mover) and the
//! energy-drain factor applied to stamina while moving on it.  The catalog is
//! built once at startup and treated as read-only afterwards; every line
//! feature stores a `SurfaceId` into it.

use rustc_hash::FxHashMap;

use crate::error::{CoreError, CoreResult};
use crate::ids::SurfaceId;

/// One surface type (asphalt, sand, water…).
#[derive(Clone, Debug)]
pub struct Surface {
    /// The catalog slot this surface occupies.
    pub id: SurfaceId,
    /// Unique lowercase name; the stable key used by snapshots.
    pub name: String,
    /// Traversal speed of a baseline mover, in map units per second.
    pub ref_speed: f32,
    /// Multiplier on the base stamina drain while moving on this surface.
    pub drain_factor: f32,
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (speed {}, drain x{})", self.name, self.ref_speed, self.drain_factor)
    }
}

// ── SurfaceCatalog ────────────────────────────────────────────────────────────

/// Registry of all surface types known to a map.
///
/// Registration order defines `SurfaceId` values; the first registered surface
/// doubles as the fallback when a snapshot names a surface the catalog does
/// not know.
#[derive(Default, Clone, Debug)]
pub struct SurfaceCatalog {
    surfaces: Vec<Surface>,
    by_name:  FxHashMap<String, SurfaceId>,
}

impl SurfaceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six stock surfaces, fastest to slowest.
    pub fn standard() -> Self {
        let mut cat = Self::new();
        for (name, speed, drain) in [
            ("asphalt", 2.0, 1.0),
            ("dirt",    1.8, 1.1),
            ("gravel",  1.6, 1.1),
            ("trail",   1.4, 1.5),
            ("sand",    1.2, 2.0),
            ("water",   1.0, 3.0),
        ] {
            // Names are distinct literals; registration cannot fail here.
            let _ = cat.register(name, speed, drain);
        }
        cat
    }

    /// Add a surface type.  Names must be unique and `ref_speed` positive.
    pub fn register(&mut self, name: &str, ref_speed: f32, drain_factor: f32) -> CoreResult<SurfaceId> {
        if self.by_name.contains_key(name) {
            return Err(CoreError::DuplicateSurface(name.to_owned()));
        }
        if !(ref_speed > 0.0) {
            return Err(CoreError::Config(format!(
                "surface `{name}` must have a positive reference speed, got {ref_speed}"
            )));
        }
        let id = SurfaceId(self.surfaces.len() as u16);
        self.surfaces.push(Surface {
            id,
            name: name.to_owned(),
            ref_speed,
            drain_factor,
        });
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    #[inline]
    pub fn get(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id.index()]
    }

    #[inline]
    pub fn by_name(&self, name: &str) -> Option<SurfaceId> {
        self.by_name.get(name).copied()
    }

    /// Like [`by_name`](Self::by_name) but an error for config-loading call sites.
    pub fn require(&self, name: &str) -> CoreResult<SurfaceId> {
        self.by_name(name)
            .ok_or_else(|| CoreError::UnknownSurface(name.to_owned()))
    }

    /// The fallback surface for unrecognized names (first registered).
    #[inline]
    pub fn first(&self) -> Option<SurfaceId> {
        self.surfaces.first().map(|s| s.id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }
}
