//! Race observer trait for progress reporting and data collection.

use rw_core::{MoverId, Tick};

use crate::racer::Racer;

/// Callbacks invoked by [`RaceSim::tick`][crate::RaceSim::tick] and
/// [`run_until_finished`][crate::RaceSim::run_until_finished] at key points
/// in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — finish announcer
///
/// ```rust,ignore
/// struct Announcer;
///
/// impl RaceObserver for Announcer {
///     fn on_finish(&mut self, tick: Tick, racer: &Racer, rank: u32) {
///         println!("tick {tick}: {} takes place {rank}", racer.name);
///     }
/// }
/// ```
pub trait RaceObserver {
    /// Called at the end of each tick, after every racer has moved.
    fn on_tick_end(&mut self, _tick: Tick, _racers: &[Racer]) {}

    /// Called on the tick a racer crosses the finish.
    ///
    /// `rank` is the 1-based arrival order; the racer's
    /// [`FinishRecord`][crate::FinishRecord] already carries its sub-tick
    /// finish time.
    fn on_finish(&mut self, _tick: Tick, _racer: &Racer, _rank: u32) {}

    /// Called once when the race ends, with the roster in final standings
    /// order.
    fn on_race_end(&mut self, _final_tick: Tick, _standings: &[MoverId]) {}
}

/// A [`RaceObserver`] that does nothing.  Use when you need to drive ticks
/// but don't want progress callbacks.
pub struct NoopObserver;

impl RaceObserver for NoopObserver {}
