//! Error types for rw-race.

use rw_core::PointId;

/// Errors surfaced while setting up or reporting on a race.
///
/// Per-tick racing itself never errors: a racer that cannot move simply
/// stays where it is.
#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    /// A start or finish point is missing from the map or lies on no line.
    #[error("{0} is not on the navigation network")]
    NotOnNetwork(PointId),

    /// A racer has no traversable route from the start to the finish.
    #[error("no route to the finish for racer {0:?}")]
    NoRouteToFinish(String),

    /// CSV serialization failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error while writing results.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RaceResult<T> = Result<T, RaceError>;
