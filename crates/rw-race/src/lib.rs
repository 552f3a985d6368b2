//! `rw-race` — race simulation for the `raceway` framework.
//!
//! # Tick loop
//!
//! ```text
//! for each tick:
//!   ① Advance   — every racer moves speed × Δt map units along its route,
//!                 crossing as many legs as the budget covers.
//!   ② Re-anchor — each leg entered refreshes the racer's clone of the
//!                 shared best-path-to-finish estimate (O(1) when the leg
//!                 continues the cached route).
//!   ③ Finish    — racers reaching the final point get a FinishRecord with
//!                 a sub-tick crossing time; ranks follow crossing order.
//! ```
//!
//! Standings rank finished racers by crossing order and everyone else by
//! estimated distance to the finish, priced by a mover-agnostic
//! [`BestPathCache`] so ranking thousands of racers costs no pathfinding
//! per query.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rw_core::MoverProfile;
//! use rw_race::{NoopObserver, RaceConfig, RaceSim};
//!
//! let mut race = RaceSim::new(map, start, finish, RaceConfig::default())?;
//! race.add_racer("Asha", MoverProfile::new(1.1));
//! race.add_racer("Brook", MoverProfile::new(0.9));
//! race.start()?;
//! race.run_until_finished(&mut NoopObserver);
//! ```

pub mod cache;
pub mod error;
pub mod mode;
pub mod observer;
pub mod racer;
pub mod results;
pub mod sim;


pub use cache::BestPathCache;
pub use error::{RaceError, RaceResult};
pub use mode::MovementMode;
pub use observer::{NoopObserver, RaceObserver};
pub use racer::{BASE_STAMINA_DRAIN_PER_MIN, FinishRecord, MAX_STAMINA, Racer};
pub use results::write_standings_csv;
pub use sim::{RaceConfig, RaceGap, RaceSim};
