//! Sequential Bayesian updating of a guilt posterior.
//!
//! Implements the iterative update
//!
//! ```text
//! P(A|B) = P(B|A)·P(A) / (P(B|A)·P(A) + P(B|¬A)·(1 - P(A)))
//! ```
//!
//! applied once per evidence item in input order, the posterior of each step
//! becoming the prior of the next. Two forms are provided:
//!
//! - **Point form** ([`update_point`]): exact probabilities per item,
//!   producing a posterior trace plus one annotated [`StepRow`] per step.
//! - **Interval form** ([`update_interval`]): min/max bounds per item,
//!   producing three independent chains that use the min-pair, the
//!   arithmetic-mean pair, and the max-pair at every step.
//!
//! The interval chains are fixed-endpoint scans, not interval-arithmetic
//! bounds: a true envelope would evaluate all four endpoint combinations per
//! step and track the running min/max across mixed choices. Because the
//! max-pair raises both likelihoods at once, the min-chain can end up above
//! the max-chain whenever the endpoint likelihood ratios order the other
//! way.
//!
//! Counter-evidence extends a finished trace through the identical formula
//! with no sign-aware special-casing; whether a pair raises or lowers the
//! posterior is entirely a property of the supplied probabilities.

use crate::engine::errors::EvalError;
use crate::engine::validate_probability;
use crate::report::{
    counter_assessment, format_decimals, step_assessment, DEFAULT_MAX_DECIMALS,
};

/// A single evidence item in point form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evidence {
    /// P(B|A): probability of observing the evidence given guilt.
    pub p_given_guilt: f64,
    /// P(B|¬A): probability of observing the evidence given innocence.
    pub p_given_innocence: f64,
}

impl Evidence {
    pub(crate) fn validate(&self, what: &str) -> Result<(), EvalError> {
        validate_probability(self.p_given_guilt, &format!("{what} P(B|A)"))?;
        validate_probability(self.p_given_innocence, &format!("{what} P(B|¬A)"))
    }
}

/// A single evidence item in interval form.
///
/// `min <= max` is the caller's responsibility; the chain engine applies the
/// endpoints as given without reordering them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalEvidence {
    /// Lower bound on P(B|A).
    pub p_given_guilt_min: f64,
    /// Upper bound on P(B|A).
    pub p_given_guilt_max: f64,
    /// Lower bound on P(B|¬A).
    pub p_given_innocence_min: f64,
    /// Upper bound on P(B|¬A).
    pub p_given_innocence_max: f64,
}

impl IntervalEvidence {
    pub(crate) fn validate(&self, what: &str) -> Result<(), EvalError> {
        validate_probability(self.p_given_guilt_min, &format!("{what} P(B|A) min"))?;
        validate_probability(self.p_given_guilt_max, &format!("{what} P(B|A) max"))?;
        validate_probability(self.p_given_innocence_min, &format!("{what} P(B|¬A) min"))?;
        validate_probability(self.p_given_innocence_max, &format!("{what} P(B|¬A) max"))
    }
}

/// Whether a trace step consumed ordinary evidence or counter-evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepKind {
    Evidence,
    CounterEvidence,
}

/// One annotated row of a point-form posterior trace.
///
/// Numeric fields are pre-formatted percent strings; the raw chain lives in
/// [`PointTrace::posteriors`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepRow {
    /// 1-based step number, continuing across the counter-evidence
    /// extension.
    pub index: usize,
    /// Kind of evidence consumed by this step.
    pub kind: StepKind,
    /// P(B|A) in percent.
    pub p_given_guilt_pct: String,
    /// P(B|¬A) in percent.
    pub p_given_innocence_pct: String,
    /// Posterior before this step, in percent.
    pub previous_pct: String,
    /// Posterior after this step, in percent.
    pub new_pct: String,
    /// Signed change in percentage points.
    pub delta_pp: String,
    /// Tier label: [`step_assessment`] for evidence steps,
    /// [`counter_assessment`] for counter-evidence steps.
    pub assessment: &'static str,
}

/// Result of a point-form sequential update.
///
/// `posteriors[0]` is the prior; one value is appended per step, so
/// `posteriors.len() == steps.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PointTrace {
    /// The posterior chain, prior first.
    pub posteriors: Vec<f64>,
    /// One annotated row per update step.
    pub steps: Vec<StepRow>,
}

/// Result of an interval-form sequential update: three independent chains.
///
/// Each chain starts at the prior and appends one value per evidence item.
/// The chains never cross-reference each other; see the module docs for why
/// they are not bounds of a propagated interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntervalTrace {
    /// Chain driven by the min endpoints of every item.
    pub min: Vec<f64>,
    /// Chain driven by the arithmetic mean of each item's endpoints.
    pub median: Vec<f64>,
    /// Chain driven by the max endpoints of every item.
    pub max: Vec<f64>,
}

/// Applies one Bayes update to a running posterior.
///
/// ```text
/// new = (pg·old) / (pg·old + pi·(1 - old))
/// ```
///
/// A zero denominator yields 0 by definition, never a division fault.
pub fn bayes_step(posterior: f64, p_given_guilt: f64, p_given_innocence: f64) -> f64 {
    let numerator = p_given_guilt * posterior;
    let denominator = numerator + p_given_innocence * (1.0 - posterior);
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Runs the point-form sequential update across `evidence` in input order.
///
/// Validates the prior and every probability before computing anything.
/// Returns the full posterior trace plus one annotated [`StepRow`] per step.
pub fn update_point(prior: f64, evidence: &[Evidence]) -> Result<PointTrace, EvalError> {
    validate_probability(prior, "prior")?;
    for (i, item) in evidence.iter().enumerate() {
        item.validate(&format!("evidence {}", i + 1))?;
    }

    let mut posteriors = Vec::with_capacity(evidence.len() + 1);
    posteriors.push(prior);
    let mut steps = Vec::with_capacity(evidence.len());
    let mut current = prior;

    for (i, item) in evidence.iter().enumerate() {
        let old = current;
        let new = bayes_step(old, item.p_given_guilt, item.p_given_innocence);
        steps.push(StepRow {
            index: i + 1,
            kind: StepKind::Evidence,
            p_given_guilt_pct: format_decimals(item.p_given_guilt * 100.0, DEFAULT_MAX_DECIMALS),
            p_given_innocence_pct: format_decimals(
                item.p_given_innocence * 100.0,
                DEFAULT_MAX_DECIMALS,
            ),
            previous_pct: format_decimals(old * 100.0, DEFAULT_MAX_DECIMALS),
            new_pct: format_decimals(new * 100.0, DEFAULT_MAX_DECIMALS),
            delta_pp: format_decimals((new - old) * 100.0, DEFAULT_MAX_DECIMALS),
            assessment: step_assessment(new * 100.0),
        });
        posteriors.push(new);
        current = new;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        steps = steps.len(),
        final_posterior = current,
        "sequential point update complete"
    );

    Ok(PointTrace { posteriors, steps })
}

impl PointTrace {
    /// The last value of the posterior chain (the prior if no step ran).
    ///
    /// Returns 0.0 for a trace whose chain is empty.
    pub fn final_posterior(&self) -> f64 {
        self.posteriors.last().copied().unwrap_or(0.0)
    }

    /// Continues the trace with counter-evidence items.
    ///
    /// Each pair is applied through the identical update formula; one
    /// posterior and one row are appended per item, the row numbering
    /// continuing from the existing steps and the tier label drawn from the
    /// abbreviated [`counter_assessment`] vocabulary.
    pub fn extend_with_counter_evidence(
        &mut self,
        counter_evidence: &[Evidence],
    ) -> Result<(), EvalError> {
        for (i, item) in counter_evidence.iter().enumerate() {
            item.validate(&format!("counter-evidence {}", i + 1))?;
        }
        let Some(&last) = self.posteriors.last() else {
            return Err(EvalError::Internal(
                "posterior trace has an empty chain".into(),
            ));
        };

        let mut current = last;
        let mut index = self.steps.len();
        for item in counter_evidence {
            index += 1;
            let old = current;
            let new = bayes_step(old, item.p_given_guilt, item.p_given_innocence);
            self.steps.push(StepRow {
                index,
                kind: StepKind::CounterEvidence,
                p_given_guilt_pct: format_decimals(
                    item.p_given_guilt * 100.0,
                    DEFAULT_MAX_DECIMALS,
                ),
                p_given_innocence_pct: format_decimals(
                    item.p_given_innocence * 100.0,
                    DEFAULT_MAX_DECIMALS,
                ),
                previous_pct: format_decimals(old * 100.0, DEFAULT_MAX_DECIMALS),
                new_pct: format_decimals(new * 100.0, DEFAULT_MAX_DECIMALS),
                delta_pp: format_decimals((new - old) * 100.0, DEFAULT_MAX_DECIMALS),
                assessment: counter_assessment(new * 100.0),
            });
            self.posteriors.push(new);
            current = new;
        }
        Ok(())
    }
}

/// Runs the interval-form sequential update across `evidence` in input
/// order.
///
/// Three chains advance in lock-step from the same prior: the min-chain
/// uses `(p_given_guilt_min, p_given_innocence_min)` at every step, the
/// median-chain the arithmetic mean of each pair, the max-chain the max
/// endpoints. All three append one value per step.
pub fn update_interval(
    prior: f64,
    evidence: &[IntervalEvidence],
) -> Result<IntervalTrace, EvalError> {
    validate_probability(prior, "prior")?;
    for (i, item) in evidence.iter().enumerate() {
        item.validate(&format!("interval evidence {}", i + 1))?;
    }

    let mut trace = IntervalTrace {
        min: vec![prior],
        median: vec![prior],
        max: vec![prior],
    };
    let (mut cur_min, mut cur_median, mut cur_max) = (prior, prior, prior);

    for item in evidence {
        cur_min = bayes_step(cur_min, item.p_given_guilt_min, item.p_given_innocence_min);
        trace.min.push(cur_min);

        let mean_guilt = (item.p_given_guilt_min + item.p_given_guilt_max) / 2.0;
        let mean_innocence = (item.p_given_innocence_min + item.p_given_innocence_max) / 2.0;
        cur_median = bayes_step(cur_median, mean_guilt, mean_innocence);
        trace.median.push(cur_median);

        cur_max = bayes_step(cur_max, item.p_given_guilt_max, item.p_given_innocence_max);
        trace.max.push(cur_max);
    }

    Ok(trace)
}

impl IntervalTrace {
    /// The last value of each chain as `(min, median, max)`.
    ///
    /// Returns `None` if any chain is empty.
    pub fn final_span(&self) -> Option<(f64, f64, f64)> {
        match (self.min.last(), self.median.last(), self.max.last()) {
            (Some(&lo), Some(&mid), Some(&hi)) => Some((lo, mid, hi)),
            _ => None,
        }
    }

    /// Continues all three chains with counter-evidence items.
    ///
    /// Each chain is extended independently with the same fixed pair, using
    /// its own running value in the update formula; one value is appended
    /// per chain per item.
    pub fn extend_with_counter_evidence(
        &mut self,
        counter_evidence: &[Evidence],
    ) -> Result<(), EvalError> {
        for (i, item) in counter_evidence.iter().enumerate() {
            item.validate(&format!("counter-evidence {}", i + 1))?;
        }
        let Some((mut cur_min, mut cur_median, mut cur_max)) = self.final_span() else {
            return Err(EvalError::Internal(
                "interval trace has an empty chain".into(),
            ));
        };

        for item in counter_evidence {
            cur_min = bayes_step(cur_min, item.p_given_guilt, item.p_given_innocence);
            self.min.push(cur_min);
            cur_median = bayes_step(cur_median, item.p_given_guilt, item.p_given_innocence);
            self.median.push(cur_median);
            cur_max = bayes_step(cur_max, item.p_given_guilt, item.p_given_innocence);
            self.max.push(cur_max);
        }
        Ok(())
    }
}
