//! `rw-actor` — moving things along navigation paths, one tick at a time.
//!
//! # Crate layout
//!
//! | Module      | Contents                                         |
//! |-------------|--------------------------------------------------|
//! | [`state`]   | `MotionState` (position, path, current leg)      |
//! | [`advance`] | the per-tick advance step, `Arrival`             |
//!
//! The crate is mover-agnostic: callers price each tick through a speed
//! closure, so the same advance loop serves racers, pedestrians, or
//! anything else that follows a path.

pub mod advance;
pub mod state;


pub use advance::Arrival;
pub use state::MotionState;
