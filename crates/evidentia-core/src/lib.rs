//! # Evidentia Core
//!
//! Engines for computing posterior probabilities of guilt from quantified
//! evidence, using three alternative evidential-reasoning methods:
//!
//! - **Sequential Bayes** ([`engine::sequential`]): iterative updating, one
//!   evidence item at a time, in point or interval (min/median/max) form,
//!   with an optional counter-evidence continuation.
//! - **Monte Carlo propagation** ([`engine::montecarlo`]): repeated
//!   stochastic evaluation of the interval chain with uniformly sampled
//!   per-item probabilities.
//! - **Star Bayesian network** ([`engine::star`]): one-shot closed-form
//!   combination of conditionally independent evidence nodes.
//! - **Dempster-Shafer** ([`engine::dempster`]): two-source mass-function
//!   combination with conflict renormalization.
//!
//! All functions are pure over their inputs: no session state, no implicit
//! randomness (Monte Carlo takes the random source as a parameter), and no
//! panics for numeric input inside the documented domains. The [`report`]
//! module renders results for presentation (minimal decimal strings and the
//! verbal assessment tiers).
//!
//! ## Example
//!
//! ```
//! use evidentia_core::{update_point, Evidence};
//!
//! let trace = update_point(
//!     0.01,
//!     &[Evidence { p_given_guilt: 0.95, p_given_innocence: 0.001 }],
//! )
//! .expect("probabilities are in range");
//! assert!(trace.final_posterior() > 0.90);
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod report;

// Re-export commonly used types
pub use engine::dempster::{combine, CombinedMass, MassAssignment};
pub use engine::errors::EvalError;
pub use engine::montecarlo::{
    monte_carlo, FiveNumberSummary, HistogramBin, MonteCarloRun, DEFAULT_SAMPLE_COUNT,
};
pub use engine::sequential::{
    bayes_step, update_interval, update_point, Evidence, IntervalEvidence, IntervalTrace,
    PointTrace, StepKind, StepRow,
};
pub use engine::star::star_posterior;
