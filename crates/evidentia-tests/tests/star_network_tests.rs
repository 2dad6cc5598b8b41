//! Tests for the closed-form star-network evaluator.

use evidentia_core::{bayes_step, star_posterior, update_point, Evidence};

fn assert_close(actual: f64, expected: f64, tol: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{} mismatch: expected {:.15}, got {:.15}, diff={:.3e}",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}

#[test]
fn single_node_reduces_to_the_point_update() {
    let node = Evidence {
        p_given_guilt: 0.8,
        p_given_innocence: 0.1,
    };
    let star = star_posterior(0.3, &[node]).unwrap();
    let step = bayes_step(0.3, 0.8, 0.1);
    let trace = update_point(0.3, &[node]).unwrap();

    assert_close(star, step, 1e-15, "star vs single step");
    assert_close(star, trace.final_posterior(), 1e-15, "star vs trace");
}

#[test]
fn example_preset_matches_closed_form() {
    // prior 0.01 % with nodes 80/1, 60/20, 90/2 (percent):
    //   top    = 0.0001 · 0.8·0.6·0.9      = 0.0001 · 0.432
    //   bottom = top + 0.9999 · 0.01·0.2·0.02
    //   posterior ≈ 51.93 %
    let nodes = [
        Evidence {
            p_given_guilt: 0.80,
            p_given_innocence: 0.01,
        },
        Evidence {
            p_given_guilt: 0.60,
            p_given_innocence: 0.20,
        },
        Evidence {
            p_given_guilt: 0.90,
            p_given_innocence: 0.02,
        },
    ];
    let posterior = star_posterior(0.0001, &nodes).unwrap();

    let top = 0.0001 * (0.80 * 0.60 * 0.90);
    let bottom = top + 0.9999 * (0.01 * 0.20 * 0.02);
    assert_close(posterior, top / bottom, 1e-12, "posterior");
    assert!(posterior > 0.51 && posterior < 0.53);
}

#[test]
fn node_order_does_not_change_the_posterior() {
    let nodes = [
        Evidence {
            p_given_guilt: 0.7,
            p_given_innocence: 0.2,
        },
        Evidence {
            p_given_guilt: 0.9,
            p_given_innocence: 0.05,
        },
        Evidence {
            p_given_guilt: 0.55,
            p_given_innocence: 0.30,
        },
    ];
    let mut reversed = nodes;
    reversed.reverse();

    let forward = star_posterior(0.02, &nodes).unwrap();
    let backward = star_posterior(0.02, &reversed).unwrap();
    assert_close(forward, backward, 1e-12, "order invariance");
}

#[test]
fn additional_incriminating_nodes_raise_the_posterior() {
    let node = Evidence {
        p_given_guilt: 0.8,
        p_given_innocence: 0.1,
    };
    let one = star_posterior(0.05, &[node]).unwrap();
    let two = star_posterior(0.05, &[node, node]).unwrap();
    assert!(two > one);
}

#[test]
fn zero_prior_pins_the_posterior_to_zero() {
    let posterior = star_posterior(
        0.0,
        &[Evidence {
            p_given_guilt: 0.9,
            p_given_innocence: 0.1,
        }],
    )
    .unwrap();
    assert_eq!(posterior, 0.0);
}
