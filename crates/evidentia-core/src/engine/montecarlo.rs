//! Monte Carlo propagation of interval evidence through the point
//! recurrence.
//!
//! Each trial draws P(B|A) and P(B|¬A) uniformly and independently inside
//! every item's interval, runs the sequential point update across all items
//! in order, then applies the fixed (non-randomized) counter-evidence pairs.
//! The collected final posteriors, in percent, are summarized with mean,
//! min, max, population standard deviation and median, plus the
//! presentation derivatives for a histogram and a box plot.
//!
//! Randomness is injected: the caller supplies any [`rand::Rng`], and each
//! trial runs on a child `ChaCha8Rng` seeded from that source. The run is
//! therefore a pure function of the injected source, and the feature-gated
//! parallel trial loop produces output identical to the sequential
//! fallback.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::engine::errors::EvalError;
use crate::engine::sequential::{bayes_step, Evidence, IntervalEvidence};
use crate::engine::validate_probability;

/// Number of trials used by the original calculator and the CLI default.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Summary of one Monte Carlo run.
///
/// Samples and all statistics are percentages in [0, 100].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MonteCarloRun {
    /// Final posterior of every trial, in trial order.
    pub samples: Vec<f64>,
    /// Arithmetic mean of the samples.
    pub mean: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Population standard deviation, in percentage points.
    pub std_dev: f64,
    /// Median sample (linear interpolation between the middle pair).
    pub median: f64,
}

/// One bar of the binned sample distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HistogramBin {
    /// Inclusive lower edge, in percent.
    pub lower: f64,
    /// Upper edge, in percent (inclusive for the last bin).
    pub upper: f64,
    /// Number of samples falling in the bin.
    pub count: usize,
}

/// Box-plot shape of the sample distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Runs `samples` independent trials of the interval evidence chain.
///
/// Preconditions: `evidence` must be non-empty (Monte Carlo propagation is
/// only defined over interval evidence) and `samples` at least 1. Every
/// probability is validated, and each item's bounds must satisfy
/// `min <= max` since a uniform draw over an empty interval is undefined.
///
/// Counter-evidence pairs, if any, are applied after the randomized items
/// with their fixed values.
pub fn monte_carlo<R: Rng + ?Sized>(
    prior: f64,
    evidence: &[IntervalEvidence],
    counter_evidence: &[Evidence],
    samples: usize,
    rng: &mut R,
) -> Result<MonteCarloRun, EvalError> {
    if evidence.is_empty() {
        return Err(EvalError::Precondition(
            "Monte Carlo requires interval evidence; none was supplied".into(),
        ));
    }
    if samples == 0 {
        return Err(EvalError::ValidationError(
            "sample count must be at least 1".into(),
        ));
    }
    validate_probability(prior, "prior")?;
    for (i, item) in evidence.iter().enumerate() {
        item.validate(&format!("interval evidence {}", i + 1))?;
        if item.p_given_guilt_min > item.p_given_guilt_max
            || item.p_given_innocence_min > item.p_given_innocence_max
        {
            return Err(EvalError::ValidationError(format!(
                "interval evidence {}: min bound exceeds max bound",
                i + 1
            )));
        }
    }
    for (i, item) in counter_evidence.iter().enumerate() {
        item.validate(&format!("counter-evidence {}", i + 1))?;
    }

    // One child generator per trial keeps the trials independent of
    // evaluation order; the sequential and rayon paths give identical
    // output for the same injected source.
    let seeds: Vec<u64> = (0..samples).map(|_| rng.gen()).collect();

    #[cfg(feature = "rayon")]
    let sample_values: Vec<f64> = seeds
        .par_iter()
        .map(|&seed| run_trial(prior, evidence, counter_evidence, seed))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let sample_values: Vec<f64> = seeds
        .iter()
        .map(|&seed| run_trial(prior, evidence, counter_evidence, seed))
        .collect();

    let run = summarize(sample_values);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        samples = run.samples.len(),
        mean = run.mean,
        median = run.median,
        "monte carlo run complete"
    );

    Ok(run)
}

/// One trial: randomized evidence chain plus fixed counter-evidence chain.
fn run_trial(
    prior: f64,
    evidence: &[IntervalEvidence],
    counter_evidence: &[Evidence],
    seed: u64,
) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut posterior = prior;
    for item in evidence {
        let p_guilt = rng.gen_range(item.p_given_guilt_min..=item.p_given_guilt_max);
        let p_innocence = rng.gen_range(item.p_given_innocence_min..=item.p_given_innocence_max);
        posterior = bayes_step(posterior, p_guilt, p_innocence);
    }
    for item in counter_evidence {
        posterior = bayes_step(posterior, item.p_given_guilt, item.p_given_innocence);
    }
    posterior * 100.0
}

fn summarize(samples: Vec<f64>) -> MonteCarloRun {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    let mut sorted = samples.clone();
    sorted.sort_by(f64::total_cmp);
    let median = quantile(&sorted, 0.5);

    MonteCarloRun {
        samples,
        mean,
        min,
        max,
        std_dev: variance.sqrt(),
        median,
    }
}

/// Linear-interpolation quantile over a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

impl MonteCarloRun {
    /// Equal-width frequency bins over `[min, max]` for histogram display.
    ///
    /// A degenerate span (all samples equal) collapses to a single bin.
    /// Returns an empty vector when `max_bins` is 0.
    pub fn histogram(&self, max_bins: usize) -> Vec<HistogramBin> {
        if self.samples.is_empty() || max_bins == 0 {
            return Vec::new();
        }
        let span = self.max - self.min;
        if span == 0.0 {
            return vec![HistogramBin {
                lower: self.min,
                upper: self.max,
                count: self.samples.len(),
            }];
        }
        let width = span / max_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..max_bins)
            .map(|i| HistogramBin {
                lower: self.min + width * i as f64,
                upper: self.min + width * (i + 1) as f64,
                count: 0,
            })
            .collect();
        for &value in &self.samples {
            let idx = (((value - self.min) / width) as usize).min(max_bins - 1);
            bins[idx].count += 1;
        }
        bins
    }

    /// Five-number summary (min, Q1, median, Q3, max) for box-plot display.
    pub fn five_number_summary(&self) -> FiveNumberSummary {
        let mut sorted = self.samples.clone();
        sorted.sort_by(f64::total_cmp);
        FiveNumberSummary {
            min: self.min,
            q1: quantile(&sorted, 0.25),
            median: self.median,
            q3: quantile(&sorted, 0.75),
            max: self.max,
        }
    }
}
