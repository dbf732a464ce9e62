//! Error types for the finite-volume solver core.
//!
//! All configuration failures are synchronous: they are raised before any
//! cell is touched, so a failed call never leaves a partially assembled
//! right-hand side behind. Near-zero denominators inside ratio-based
//! limiters are *not* errors; they are handled with a fixed epsilon guard.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type FvResult<T> = Result<T, FvError>;

/// Error type for finite-volume solver operations.
#[derive(Debug, Error)]
pub enum FvError {
    /// A limiter name was not found in the registry.
    #[error("limiter \"{0}\" could not be found")]
    UnknownLimiter(String),

    /// A Riemann solver name was not found in the registry.
    #[error("Riemann solver \"{0}\" could not be found")]
    UnknownRiemannSolver(String),

    /// An initial-profile identifier is not defined by the physics.
    #[error("initial profile {0} is not defined for this physics")]
    UnknownProfile(usize),

    /// The injected physics lacks a required operation.
    #[error("physics has not provided a {0} capability")]
    MissingCapability(&'static str),

    /// The selected limiter has no partition-aware form.
    #[error("limiter \"{0}\" does not support two-region partitions")]
    UnsupportedSplitLimiter(&'static str),
}
