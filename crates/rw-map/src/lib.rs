//! `rw-map` — the editable spatial network: points, features, transitions.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`map`]        | `Map` (registries + R-tree), all edit operations          |
//! | [`point`]      | `Point`, `PointSpec`                                      |
//! | [`feature`]    | `FeatureRef`, `LineFeature`, `AreaFeature`, `MarkerFeature` |
//! | [`transition`] | `Transition` (directed traversable segment)               |
//! | [`snapshot`]   | `MapSnapshot` and flat save records                       |
//! | [`error`]      | `MapError`, `MapResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on snapshot records and geometry. |

pub mod error;
pub mod feature;
pub mod map;
pub mod point;
pub mod snapshot;
pub mod transition;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use feature::{AreaFeature, FeatureRef, LineFeature, MarkerFeature};
pub use map::Map;
pub use point::{Point, PointSpec};
pub use snapshot::{AreaRecord, LineRecord, MapSnapshot, MarkerRecord, PointRecord};
pub use transition::Transition;
