//! Dempster-Shafer belief combination over {guilt, innocence, unknown}.
//!
//! Each source assigns mass to guilt, innocence, and the indeterminate
//! remainder (`unknown = 1 - guilt - innocence`). Two sources are combined
//! with Dempster's rule:
//!
//! ```text
//! conflict = gA·iB + iA·gB
//! K        = 1 - conflict
//! m(guilt)     = (gA·gB + gA·uB + uA·gB) / K
//! m(innocence) = (iA·iB + iA·uB + uA·iB) / K
//! m(unknown)   = 1 - m(guilt) - m(innocence)
//! ```
//!
//! The conflicting mass (one source asserting guilt where the other asserts
//! innocence) is discarded and the remainder renormalized by K. With K = 0
//! the sources are in total conflict and no combined belief is defined; the
//! combination fails explicitly rather than returning a number.

use crate::engine::errors::EvalError;
use crate::engine::validate_probability;

/// A mass assignment over {guilt, innocence, unknown} for one evidence
/// source.
///
/// Only the guilt and innocence masses are stored; the unknown mass is the
/// derived remainder. Valid assignments satisfy `guilt + innocence <= 1`
/// with both masses in [0, 1]; violations are rejected by [`combine`], not
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MassAssignment {
    /// Mass committed to guilt.
    pub guilt: f64,
    /// Mass committed to innocence.
    pub innocence: f64,
}

impl MassAssignment {
    /// Mass left on the indeterminate hypothesis: `1 - guilt - innocence`.
    pub fn unknown(&self) -> f64 {
        1.0 - self.guilt - self.innocence
    }

    pub(crate) fn validate(&self, source: &str) -> Result<(), EvalError> {
        validate_probability(self.guilt, &format!("{source} guilt mass"))?;
        validate_probability(self.innocence, &format!("{source} innocence mass"))?;
        if self.guilt + self.innocence > 1.0 {
            return Err(EvalError::ValidationError(format!(
                "{source}: guilt + innocence mass exceeds 1 (got {})",
                self.guilt + self.innocence
            )));
        }
        Ok(())
    }
}

/// Result of combining two mass assignments with Dempster's rule.
///
/// The discarded conflict and the normalization constant K are returned for
/// transparency.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CombinedMass {
    /// Renormalized mass on guilt.
    pub guilt: f64,
    /// Renormalized mass on innocence.
    pub innocence: f64,
    /// Remaining mass on the indeterminate hypothesis.
    pub unknown: f64,
    /// Mass assigned to contradictory assertions before renormalization.
    pub conflict: f64,
    /// Normalization constant K = 1 - conflict.
    pub normalization: f64,
}

/// Combines two mass assignments with Dempster's rule of combination.
///
/// Both sources are validated first; invalid masses are rejected with no
/// computation. Total conflict (K = 0) fails with
/// [`EvalError::TotalConflict`].
pub fn combine(a: &MassAssignment, b: &MassAssignment) -> Result<CombinedMass, EvalError> {
    a.validate("source A")?;
    b.validate("source B")?;

    let conflict = a.guilt * b.innocence + a.innocence * b.guilt;
    let normalization = 1.0 - conflict;
    if normalization == 0.0 {
        return Err(EvalError::TotalConflict(
            "the two sources are in total conflict (K = 0); no combined belief is defined".into(),
        ));
    }

    let a_unknown = a.unknown();
    let b_unknown = b.unknown();
    let guilt = (a.guilt * b.guilt + a.guilt * b_unknown + a_unknown * b.guilt) / normalization;
    let innocence =
        (a.innocence * b.innocence + a.innocence * b_unknown + a_unknown * b.innocence)
            / normalization;
    let unknown = 1.0 - guilt - innocence;

    #[cfg(feature = "tracing")]
    tracing::debug!(conflict, normalization, "dempster combination complete");

    Ok(CombinedMass {
        guilt,
        innocence,
        unknown,
        conflict,
        normalization,
    })
}
