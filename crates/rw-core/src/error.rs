//! Core error type.
//!
//! Sub-crates define their own error enums and either wrap `CoreError` as a
//! variant or convert at the boundary; precondition violations (caller
//! misuse) panic instead of returning errors — see the crate docs.

use thiserror::Error;

/// Errors from core-level configuration (currently: the surface catalog).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("surface `{0}` is already registered")]
    DuplicateSurface(String),

    #[error("unknown surface `{0}`")]
    UnknownSurface(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rw-core` operations.
pub type CoreResult<T> = Result<T, CoreError>;
