//! A single racer: profile, gear, stamina, and progress tracking.
//!
//! # Progress estimates
//!
//! Each racer carries a clone of the best general path to the finish,
//! anchored at one end of the leg it is currently walking
//! (`from_transition_start` says which end).  Its distance to the finish is
//! then the anchored path's length plus the distance to the anchor, an O(1)
//! read with no pathfinding.  The anchor is refreshed whenever a new leg is
//! entered: stepping onto the leg the cached path expected just advances the
//! clone, anything else re-anchors through the shared [`BestPathCache`].

use rw_core::{Mover, MoverId, MoverProfile, MoverRng, PointId};
use rw_actor::{Arrival, MotionState};
use rw_map::{Map, Transition};
use rw_nav::NavigationPath;

use crate::cache::BestPathCache;
use crate::mode::MovementMode;

/// Stamina a racer starts with.
pub const MAX_STAMINA: f32 = 120.0;

/// Stamina drained per minute at jog on a neutral surface.  Surface drain
/// factors and mode modifiers scale this.
pub const BASE_STAMINA_DRAIN_PER_MIN: f32 = 2.0;

/// Recorded when a racer crosses the finish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishRecord {
    /// Fractional tick of the crossing: the tick number minus the unused
    /// fraction of that tick's movement budget.
    pub tick: f64,
    /// Race time in seconds, including the sub-tick fraction.
    pub secs: f64,
    /// 1-based arrival order.
    pub rank: u32,
}

/// One participant in a race.
#[derive(Debug)]
pub struct Racer {
    pub name:    String,
    pub profile: MoverProfile,
    pub mode:    MovementMode,
    pub stamina: f32,

    /// Effective speed sampled on the last tick that moved, in units/sec.
    pub current_speed: f32,

    pub(crate) motion: MotionState,
    pub(crate) finish: Option<FinishRecord>,
    pub(crate) rng:    MoverRng,

    best_path:             Option<NavigationPath>,
    from_transition_start: bool,
}

impl Racer {
    pub(crate) fn new(name: &str, profile: MoverProfile, at: PointId, seed: u64, id: MoverId) -> Self {
        Self {
            name: name.to_owned(),
            profile,
            mode:    MovementMode::Jog,
            stamina: MAX_STAMINA,
            current_speed: 0.0,
            motion: MotionState::new(at),
            finish: None,
            rng:    MoverRng::new(seed, id),
            best_path: None,
            from_transition_start: true,
        }
    }

    /// `Some` once the racer has crossed the finish.
    #[inline]
    pub fn finish_record(&self) -> Option<FinishRecord> {
        self.finish
    }

    #[inline]
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// Estimated distance to the finish in map units, by the anchored best
    /// general path.  Zero once finished, infinite if the finish is
    /// unreachable from the racer's position.
    pub fn distance_to_finish(&self) -> f32 {
        if self.finish.is_some() {
            return 0.0;
        }
        let Some(bp) = &self.best_path else {
            return f32::INFINITY;
        };
        match self.motion.transition() {
            None => bp.length(),
            Some(t) => {
                let along = self.motion.rel_pos() * t.length;
                if self.from_transition_start {
                    // Anchored behind the racer: it is walking away from
                    // the anchor, so the estimate grows with progress.
                    bp.length() + along
                } else {
                    bp.length() + (t.length - along)
                }
            }
        }
    }

    /// Put the racer on its route and prime the progress anchor.
    pub(crate) fn launch(&mut self, map: &Map, cache: &mut BestPathCache, route: NavigationPath) {
        let at = self.motion.at();
        self.best_path = cache.best_from(map, at).cloned();
        self.from_transition_start = true;
        self.motion.set_path(route);
    }

    /// One tick of racing.  Returns the arrival on the tick the finish is
    /// reached, `None` otherwise.
    pub(crate) fn tick(
        &mut self,
        map:                &Map,
        cache:              &mut BestPathCache,
        tick_delta_secs:    f32,
        mode_switch_chance: f64,
        entered:            &mut Vec<Transition>,
    ) -> Option<Arrival> {
        if self.finish.is_some() {
            return None;
        }

        // Occasional whim: swap to a random gear.
        if mode_switch_chance > 0.0 && self.rng.gen_bool(mode_switch_chance) {
            if let Some(&m) = self.rng.choose(&MovementMode::ALL) {
                self.mode = m;
            }
        }
        // An empty tank forces a walk, whatever the gear says.
        if self.stamina <= 0.0 {
            self.mode = MovementMode::Walk;
        }

        let profile = &self.profile;
        let mode = self.mode;
        let mut sampled: Option<(f32, f32)> = None;
        let sampled_ref = &mut sampled;
        let arrival = self.motion.advance(
            map,
            |surface| {
                let speed = profile.surface_speed(surface) * mode.speed_modifier();
                *sampled_ref = Some((speed, surface.drain_factor));
                speed
            },
            tick_delta_secs,
            entered,
        );

        match sampled {
            Some((speed, drain_factor)) if speed > 0.0 => {
                self.current_speed = speed;
                let drain = (BASE_STAMINA_DRAIN_PER_MIN / 60.0)
                    * drain_factor
                    * mode.stamina_modifier()
                    * tick_delta_secs;
                self.stamina = (self.stamina - drain).max(0.0);
            }
            _ => self.current_speed = 0.0,
        }

        for &t in entered.iter() {
            self.on_transition_entered(map, cache, t);
        }
        arrival
    }

    /// Re-anchor the progress estimate for a newly entered leg.
    fn on_transition_entered(&mut self, map: &Map, cache: &mut BestPathCache, t: Transition) {
        // Fast path: the racer stepped onto exactly the leg its anchored
        // path predicted, so the clone just advances by one leg and stays
        // anchored at the new leg's end.  No cache traffic.
        if !self.from_transition_start {
            if let Some(bp) = self.best_path.as_mut() {
                if bp.transitions().first() == Some(&t) {
                    bp.cut_everything_before(t.to);
                    return;
                }
            }
        }

        let via_from = cache.best_length_from(map, t.from);
        let via_to = cache.best_length_from(map, t.to).map(|l| l + t.length);
        let anchor_at_start = match (via_from, via_to) {
            (None, None) => {
                self.best_path = None;
                return;
            }
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(f), Some(through)) => f < through,
        };
        let anchor = if anchor_at_start { t.from } else { t.to };
        self.best_path = cache.best_from(map, anchor).cloned();
        self.from_transition_start = anchor_at_start;
    }
}
