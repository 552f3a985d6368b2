//! `rw-core` — foundational types for the `raceway` framework.
//!
//! This crate is a dependency of every other `rw-*` crate.  It intentionally
//! has no `rw-*` dependencies and minimal external ones (only `rand`,
//! `rustc-hash`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `PointId`, `LineId`, `AreaId`, `MarkerId`, `MoverId`, `SurfaceId` |
//! | [`geom`]    | `Vec2`, Euclidean distance, lerp                          |
//! | [`surface`] | `Surface`, `SurfaceCatalog`                               |
//! | [`mover`]   | `Mover` trait, `Baseline`, `MoverProfile`                 |
//! | [`time`]    | `Tick`, `TickClock`, `FrameDriver`                        |
//! | [`rng`]     | `MoverRng` (per-mover), `SimRng` (global)                 |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Error philosophy
//!
//! Structural misuse by callers — splitting a line at its endpoint, cutting a
//! path at a point it does not contain, advancing with a mismatched path —
//! is a bug at the call site, not a runtime condition, and panics with a
//! descriptive message.  Expected outcomes (no route exists, a name is
//! unknown) are `Option`/`Result` values.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the plain-data public types.|

pub mod error;
pub mod geom;
pub mod ids;
pub mod mover;
pub mod rng;
pub mod surface;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geom::Vec2;
pub use ids::{AreaId, LineId, MarkerId, MoverId, PointId, SurfaceId};
pub use mover::{Baseline, Mover, MoverProfile};
pub use rng::{MoverRng, SimRng};
pub use surface::{Surface, SurfaceCatalog};
pub use time::{FrameDriver, Tick, TickClock, format_secs};
