//! Error types for Evidentia computations.

use thiserror::Error;

/// Errors that can occur while validating inputs or combining evidence.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in the future without breaking changes.
///
/// All public APIs return `Result<T, EvalError>`; no numeric input within the
/// documented domains causes a panic. Degenerate arithmetic inside an update
/// (a zero denominator) is defined to produce 0 and is therefore not an
/// error, while a zero normalization constant in Dempster combination has no
/// defined result and surfaces as [`EvalError::TotalConflict`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EvalError {
    /// Invalid input rejected before any computation (out-of-range
    /// probability, mass assignment exceeding unit sum).
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A required precondition for the requested computation is not met
    /// (e.g. Monte Carlo propagation without interval evidence).
    #[error("precondition error: {0}")]
    Precondition(String),

    /// Dempster combination is undefined because the two sources are in
    /// total conflict (normalization constant K = 0).
    #[error("total conflict: {0}")]
    TotalConflict(String),

    /// Internal computation error (programmer error, not user error).
    #[error("internal error: {0}")]
    Internal(String),
}
