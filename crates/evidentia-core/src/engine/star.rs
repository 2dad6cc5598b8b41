//! Closed-form posterior for a star-topology Bayesian network.
//!
//! One guilt variable S with n evidence nodes depending directly and only
//! on S, all observed true and conditionally independent given S:
//!
//! ```text
//! top    = P(S) · Π P(Bᵢ|S)
//! bottom = top + (1 - P(S)) · Π P(Bᵢ|¬S)
//! P(S | B₁..Bₙ) = top / bottom        (0 if bottom is 0)
//! ```
//!
//! This is a single one-shot combination of simultaneously observed nodes;
//! there is no sequential trace. With a single node the expression reduces
//! exactly to one step of the sequential point update.

use crate::engine::errors::EvalError;
use crate::engine::sequential::Evidence;
use crate::engine::validate_probability;

/// Computes the star-network posterior for `nodes` all observed true.
///
/// Each node supplies `(P(B|S=true), P(B|S=false))` via [`Evidence`].
/// An empty node list degenerates to the prior (the empty products are 1).
pub fn star_posterior(prior: f64, nodes: &[Evidence]) -> Result<f64, EvalError> {
    validate_probability(prior, "prior")?;
    for (i, node) in nodes.iter().enumerate() {
        node.validate(&format!("evidence node {}", i + 1))?;
    }

    let mut product_given_guilt = 1.0;
    let mut product_given_innocence = 1.0;
    for node in nodes {
        product_given_guilt *= node.p_given_guilt;
        product_given_innocence *= node.p_given_innocence;
    }

    let top = prior * product_given_guilt;
    let bottom = top + (1.0 - prior) * product_given_innocence;
    Ok(if bottom == 0.0 { 0.0 } else { top / bottom })
}
