//! The evidential-combination engines.
//!
//! This module provides:
//! - **errors**: Error types for rejected input and undefined combinations
//! - **sequential**: Iterative point/interval Bayes updating with the
//!   counter-evidence continuation
//! - **montecarlo**: Uniform-interval Monte Carlo propagation of the point
//!   recurrence
//! - **star**: Closed-form star-topology network posterior
//! - **dempster**: Two-source Dempster-Shafer mass combination

pub mod dempster;
pub mod errors;
pub mod montecarlo;
pub mod sequential;
pub mod star;

use self::errors::EvalError;

/// Rejects probabilities outside [0, 1]; NaN and infinities are outside.
pub(crate) fn validate_probability(value: f64, what: &str) -> Result<(), EvalError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EvalError::ValidationError(format!(
            "{what} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}
