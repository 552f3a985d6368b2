//! Map-subsystem error type.
//!
//! Only *recoverable* conflicts surface here (marker collisions, corrupt
//! snapshot records).  Structural misuse — splitting at an endpoint, touching
//! an unregistered id — panics; see the crate docs.

use thiserror::Error;

use rw_core::PointId;

/// Errors produced by `rw-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("point {merged} and point {kept} both carry markers; merge refused")]
    MarkerCollision { merged: PointId, kept: PointId },

    #[error("{0} already carries a marker")]
    MarkerExists(PointId),

    #[error("snapshot {record} references missing point {point}")]
    MissingPoint { record: String, point: u32 },

    #[error("snapshot contains a duplicate id: {0}")]
    DuplicateRecord(String),

    #[error("snapshot names surface `{0}` but the catalog is empty")]
    NoFallbackSurface(String),
}

pub type MapResult<T> = Result<T, MapError>;
