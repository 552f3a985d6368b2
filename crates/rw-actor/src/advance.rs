//! The per-tick advance step.
//!
//! Movement is continuous: one tick moves the actor `speed * tick_delta`
//! map units along its path, crossing as many legs as that distance covers.
//! Speed is sampled once per tick from the surface under the actor at the
//! start of the tick, so a leg change mid-tick does not re-price the tick.
//!
//! Arrival reports the unused fraction of the tick, letting callers compute
//! sub-tick finish times instead of rounding to whole ticks.

use rw_core::Surface;
use rw_map::{Map, Transition};

use crate::state::MotionState;

/// Returned by [`MotionState::advance`] on the tick the actor reaches the
/// end of its path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    /// Fraction of the tick's movement budget left over at the final point,
    /// in `[0, 1]`.  `1.0` means the path was already exhausted when the
    /// tick began.
    pub leftover: f32,
}

impl MotionState {
    /// Advance one tick along the current path.
    ///
    /// `speed_for` prices the tick from the surface under the actor; a
    /// non-positive speed stalls the actor in place.  Every leg *entered*
    /// during the tick (including the first leg of a fresh path) is appended
    /// to `entered`, which the caller clears between ticks.
    ///
    /// Returns `Some(Arrival)` on the tick the final point is reached,
    /// `None` otherwise.  Stationary actors are a no-op.
    pub fn advance(
        &mut self,
        map: &Map,
        speed_for: impl FnOnce(&Surface) -> f32,
        tick_delta_secs: f32,
        entered: &mut Vec<Transition>,
    ) -> Option<Arrival> {
        if self.transition.is_none() {
            let first = match &self.path {
                None => return None,
                Some(p) => p.transitions().first().copied(),
            };
            match first {
                None => {
                    // A path with no legs arrives without moving.
                    self.path = None;
                    return Some(Arrival { leftover: 1.0 });
                }
                Some(t) => {
                    self.transition = Some(t);
                    self.rel_pos = 0.0;
                    entered.push(t);
                }
            }
        }
        let Some(mut leg) = self.transition else {
            return None;
        };

        let speed = speed_for(map.surface(leg.surface_id(map)));
        if speed <= 0.0 {
            log::trace!("actor at {} stalled: speed {speed} on current surface", self.at);
            return None;
        }
        let total = speed * tick_delta_secs;
        if total <= 0.0 {
            return None;
        }

        let mut distance = total;
        loop {
            let step = distance / leg.length;
            if self.rel_pos + step < 1.0 {
                self.rel_pos += step;
                return None;
            }

            // Crossing onto the leg's end point.
            distance -= leg.length * (1.0 - self.rel_pos);
            let reached = leg.to;
            self.at = reached;
            self.rel_pos = 0.0;

            let upcoming = match self.path.as_mut() {
                Some(p) => {
                    p.cut_everything_before(reached);
                    p.transitions().first().copied()
                }
                None => None,
            };
            match upcoming {
                Some(next) => {
                    leg = next;
                    self.transition = Some(next);
                    entered.push(next);
                }
                None => {
                    self.path = None;
                    self.transition = None;
                    return Some(Arrival { leftover: (distance / total).clamp(0.0, 1.0) });
                }
            }
        }
    }
}
