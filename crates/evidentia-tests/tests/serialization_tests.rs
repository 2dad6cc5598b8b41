//! Serialization coverage for the result types consumed by the CLI's JSON
//! output.

use evidentia_core::{monte_carlo, update_point, Evidence, IntervalEvidence};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn point_trace_serializes_rows_and_chain() {
    let trace = update_point(
        0.01,
        &[Evidence {
            p_given_guilt: 0.95,
            p_given_innocence: 0.001,
        }],
    )
    .unwrap();

    let value = serde_json::to_value(&trace).unwrap();
    assert_eq!(value["posteriors"].as_array().unwrap().len(), 2);
    let row = &value["steps"][0];
    assert_eq!(row["index"], 1);
    assert_eq!(row["kind"], "evidence");
    assert_eq!(row["p_given_guilt_pct"], "95");
    assert_eq!(row["assessment"], "strongly indicates guilt");
}

#[test]
fn monte_carlo_run_serializes_summary_statistics() {
    let evidence = [IntervalEvidence {
        p_given_guilt_min: 0.5,
        p_given_guilt_max: 0.6,
        p_given_innocence_min: 0.05,
        p_given_innocence_max: 0.10,
    }];
    let run = monte_carlo(0.01, &evidence, &[], 50, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();

    let value = serde_json::to_value(&run).unwrap();
    assert_eq!(value["samples"].as_array().unwrap().len(), 50);
    assert!(value["mean"].is_number());
    assert!(value["std_dev"].is_number());
    assert!(value["median"].is_number());
}

#[test]
fn evidence_inputs_deserialize_from_json() {
    let source = r#"[
        { "p_given_guilt": 0.95, "p_given_innocence": 0.001 },
        { "p_given_guilt": 0.80, "p_given_innocence": 0.05 }
    ]"#;
    let evidence: Vec<Evidence> = serde_json::from_str(source).unwrap();
    assert_eq!(evidence.len(), 2);
    let trace = update_point(0.01, &evidence).unwrap();
    assert_eq!(trace.steps.len(), 2);
}
