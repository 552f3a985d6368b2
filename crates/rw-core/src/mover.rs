//! The mover abstraction: who is asking for a traversal cost.
//!
//! Transition costs are mover-dependent (a strong swimmer crosses water
//! cheaply, a baseline mover does not), so every cost query takes a `Mover`.
//! Costs are always computed on demand from the mover and the surface —
//! nothing mover-specific is ever cached inside the map.

use rustc_hash::FxHashMap;

use crate::ids::SurfaceId;
use crate::surface::Surface;

/// Supplies traversal parameters to cost queries.
///
/// Implementations must be pure: the same surface must always yield the same
/// speed for the lifetime of a pathfinding query, or cached paths and costs
/// lose their meaning.
pub trait Mover {
    /// Effective speed on `surface`, in map units per second.
    fn surface_speed(&self, surface: &Surface) -> f32;

    /// Whether the mover can traverse `surface` at all.  The default treats
    /// any non-positive speed as impassable.
    #[inline]
    fn can_traverse(&self, surface: &Surface) -> bool {
        self.surface_speed(surface) > 0.0
    }
}

/// The mover-agnostic reference mover: travels every surface at its reference
/// speed.  Used for the shared best-path ranking cache, where results must
/// not depend on any particular mover.
#[derive(Copy, Clone, Debug, Default)]
pub struct Baseline;

impl Mover for Baseline {
    #[inline]
    fn surface_speed(&self, surface: &Surface) -> f32 {
        surface.ref_speed
    }
}

// ── MoverProfile ──────────────────────────────────────────────────────────────

/// A concrete mover: one general speed multiplier plus optional per-surface
/// multipliers (both default to 1.0).
///
/// A modifier of 0 makes a surface impassable for this mover, which the
/// pathfinder honors by routing around it.
#[derive(Clone, Debug)]
pub struct MoverProfile {
    pub general_modifier: f32,
    surface_modifiers:    FxHashMap<SurfaceId, f32>,
}

impl MoverProfile {
    pub fn new(general_modifier: f32) -> Self {
        Self {
            general_modifier,
            surface_modifiers: FxHashMap::default(),
        }
    }

    /// Builder-style: set the modifier for one surface.
    pub fn with_surface_modifier(mut self, surface: SurfaceId, modifier: f32) -> Self {
        self.surface_modifiers.insert(surface, modifier);
        self
    }

    pub fn set_surface_modifier(&mut self, surface: SurfaceId, modifier: f32) {
        self.surface_modifiers.insert(surface, modifier);
    }

    /// Per-surface multiplier; 1.0 when unset.
    #[inline]
    pub fn surface_modifier(&self, surface: SurfaceId) -> f32 {
        self.surface_modifiers.get(&surface).copied().unwrap_or(1.0)
    }
}

impl Default for MoverProfile {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Mover for MoverProfile {
    #[inline]
    fn surface_speed(&self, surface: &Surface) -> f32 {
        surface.ref_speed * self.general_modifier * self.surface_modifier(surface.id)
    }
}
