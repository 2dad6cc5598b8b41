//! Evidentia CLI - command-line evidential probability calculator.
//!
//! Usage:
//!   evidentia sequential --prior 1 -e 95,0.1 -e 80,5      # point-form Bayes
//!   evidentia interval --prior 1 -e 50,60,5,10            # min/median/max chains
//!   evidentia monte-carlo --prior 1 -e 50,60,5,10 --seed 7
//!   evidentia star --prior 0.01 -n 80,1 -n 60,20 -n 90,2
//!   evidentia dempster -a 0.5,0.2 -b 0.4,0.3
//!   evidentia run scenario.json -o json                   # scenario file
//!   evidentia templates                                   # evidence presets
//!
//! Probabilities are entered in percent (masses for `dempster` as fractions
//! in [0, 1], matching their usual presentation). Point evidence arguments
//! also accept a template name from `evidentia templates`.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::error::Error;
use std::process;

use evidentia_core::report::{format_decimals, interpret_percentage, DEFAULT_MAX_DECIMALS};
use evidentia_core::{
    combine, monte_carlo, star_posterior, update_interval, update_point, Evidence,
    IntervalEvidence, IntervalTrace, MassAssignment, MonteCarloRun, PointTrace, StepKind,
    DEFAULT_SAMPLE_COUNT,
};

/// Canonical evidence-strength presets, in percent (P(B|A), P(B|¬A)).
const TEMPLATES: &[(&str, f64, f64)] = &[
    ("fingerprint", 80.0, 5.0),
    ("dna", 95.0, 0.1),
    ("witness-reliable", 60.0, 20.0),
    ("witness-uncertain", 55.0, 35.0),
];

#[derive(Parser)]
#[command(name = "evidentia")]
#[command(version)]
#[command(about = "Evidentia - evidential probability calculator")]
#[command(
    long_about = "Compute posterior probabilities of guilt from quantified evidence using \
sequential Bayes updating, a star-topology Bayesian network, or Dempster-Shafer combination"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format: summary, json, or debug
    #[arg(
        short,
        long,
        global = true,
        default_value = "summary",
        value_name = "FORMAT"
    )]
    output: String,
}

#[derive(Subcommand)]
enum Command {
    /// Sequential Bayes updating with exact per-item probabilities
    Sequential {
        /// Prior probability of guilt, in percent
        #[arg(short, long, value_name = "PCT")]
        prior: f64,

        /// Evidence as "P(B|A),P(B|¬A)" in percent, or a template name (repeatable)
        #[arg(short, long = "evidence", value_name = "PG,PI", required = true)]
        evidence: Vec<String>,

        /// Counter-evidence as "P(MB|A),P(MB|¬A)" in percent (repeatable)
        #[arg(short, long = "counter", value_name = "PG,PI")]
        counter: Vec<String>,
    },

    /// Sequential Bayes updating with min-max bounds per item
    Interval {
        /// Prior probability of guilt, in percent
        #[arg(short, long, value_name = "PCT")]
        prior: f64,

        /// Evidence as "gmin,gmax,imin,imax" in percent (repeatable)
        #[arg(
            short,
            long = "evidence",
            value_name = "GMIN,GMAX,IMIN,IMAX",
            required = true
        )]
        evidence: Vec<String>,

        /// Counter-evidence as "P(MB|A),P(MB|¬A)" in percent (repeatable)
        #[arg(short, long = "counter", value_name = "PG,PI")]
        counter: Vec<String>,
    },

    /// Monte Carlo propagation of interval evidence
    MonteCarlo {
        /// Prior probability of guilt, in percent
        #[arg(short, long, value_name = "PCT")]
        prior: f64,

        /// Evidence as "gmin,gmax,imin,imax" in percent (repeatable)
        #[arg(
            short,
            long = "evidence",
            value_name = "GMIN,GMAX,IMIN,IMAX",
            required = true
        )]
        evidence: Vec<String>,

        /// Counter-evidence as "P(MB|A),P(MB|¬A)" in percent (repeatable)
        #[arg(short, long = "counter", value_name = "PG,PI")]
        counter: Vec<String>,

        /// Number of trials
        #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT, value_name = "N")]
        samples: usize,

        /// Seed for the random source (omit for a fresh one)
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Number of histogram bins
        #[arg(long, default_value_t = 30, value_name = "N")]
        bins: usize,
    },

    /// One-shot star-network combination of simultaneously observed nodes
    Star {
        /// Prior probability of guilt, in percent
        #[arg(short, long, value_name = "PCT")]
        prior: f64,

        /// Evidence node as "P(B|S),P(B|¬S)" in percent, or a template name (repeatable)
        #[arg(short, long = "node", value_name = "PS,PNS", required = true)]
        nodes: Vec<String>,
    },

    /// Dempster-Shafer combination of two mass assignments
    Dempster {
        /// Source A masses as "guilt,innocence" fractions in [0, 1]
        #[arg(short = 'a', long, value_name = "G,I")]
        source_a: String,

        /// Source B masses as "guilt,innocence" fractions in [0, 1]
        #[arg(short = 'b', long, value_name = "G,I")]
        source_b: String,
    },

    /// Execute a scenario file (JSON)
    Run {
        /// Input scenario file
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// List the built-in evidence templates
    Templates,
}

/// A scenario file: one method with its inputs, probabilities in percent
/// (Dempster masses as fractions, as on the command line).
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
enum Scenario {
    Sequential {
        prior_pct: f64,
        evidence: Vec<PairPct>,
        #[serde(default)]
        counter_evidence: Vec<PairPct>,
    },
    Interval {
        prior_pct: f64,
        evidence: Vec<QuadPct>,
        #[serde(default)]
        counter_evidence: Vec<PairPct>,
    },
    MonteCarlo {
        prior_pct: f64,
        evidence: Vec<QuadPct>,
        #[serde(default)]
        counter_evidence: Vec<PairPct>,
        #[serde(default)]
        samples: Option<usize>,
        #[serde(default)]
        seed: Option<u64>,
    },
    Star {
        prior_pct: f64,
        nodes: Vec<PairPct>,
    },
    Dempster {
        source_a: MassInput,
        source_b: MassInput,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct PairPct {
    guilt_pct: f64,
    innocence_pct: f64,
}

impl PairPct {
    fn to_evidence(&self) -> Evidence {
        Evidence {
            p_given_guilt: self.guilt_pct / 100.0,
            p_given_innocence: self.innocence_pct / 100.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct QuadPct {
    guilt_min_pct: f64,
    guilt_max_pct: f64,
    innocence_min_pct: f64,
    innocence_max_pct: f64,
}

impl QuadPct {
    fn to_evidence(&self) -> IntervalEvidence {
        IntervalEvidence {
            p_given_guilt_min: self.guilt_min_pct / 100.0,
            p_given_guilt_max: self.guilt_max_pct / 100.0,
            p_given_innocence_min: self.innocence_min_pct / 100.0,
            p_given_innocence_max: self.innocence_max_pct / 100.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MassInput {
    guilt: f64,
    innocence: f64,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli.command, &cli.output) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn dispatch(command: Command, output: &str) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Sequential {
            prior,
            evidence,
            counter,
        } => {
            let evidence = parse_all(&evidence, parse_point_pct)?;
            let counter = parse_all(&counter, parse_point_pct)?;
            run_sequential(prior, &evidence, &counter, output)
        }
        Command::Interval {
            prior,
            evidence,
            counter,
        } => {
            let evidence = parse_all(&evidence, parse_interval_pct)?;
            let counter = parse_all(&counter, parse_point_pct)?;
            run_interval(prior, &evidence, &counter, output)
        }
        Command::MonteCarlo {
            prior,
            evidence,
            counter,
            samples,
            seed,
            bins,
        } => {
            let evidence = parse_all(&evidence, parse_interval_pct)?;
            let counter = parse_all(&counter, parse_point_pct)?;
            run_monte_carlo(prior, &evidence, &counter, samples, seed, bins, output)
        }
        Command::Star { prior, nodes } => {
            let nodes = parse_all(&nodes, parse_point_pct)?;
            run_star(prior, &nodes, output)
        }
        Command::Dempster { source_a, source_b } => {
            let a = parse_mass(&source_a)?;
            let b = parse_mass(&source_b)?;
            run_dempster(&a, &b, output)
        }
        Command::Run { file } => {
            let source = std::fs::read_to_string(&file)
                .map_err(|e| format!("cannot read scenario file '{file}': {e}"))?;
            let scenario: Scenario = serde_json::from_str(&source)
                .map_err(|e| format!("invalid scenario file '{file}': {e}"))?;
            run_scenario(scenario, output)
        }
        Command::Templates => {
            print_templates();
            Ok(())
        }
    }
}

fn run_scenario(scenario: Scenario, output: &str) -> Result<(), Box<dyn Error>> {
    match scenario {
        Scenario::Sequential {
            prior_pct,
            evidence,
            counter_evidence,
        } => {
            let evidence: Vec<Evidence> = evidence.iter().map(PairPct::to_evidence).collect();
            let counter: Vec<Evidence> =
                counter_evidence.iter().map(PairPct::to_evidence).collect();
            run_sequential(prior_pct, &evidence, &counter, output)
        }
        Scenario::Interval {
            prior_pct,
            evidence,
            counter_evidence,
        } => {
            let evidence: Vec<IntervalEvidence> =
                evidence.iter().map(QuadPct::to_evidence).collect();
            let counter: Vec<Evidence> =
                counter_evidence.iter().map(PairPct::to_evidence).collect();
            run_interval(prior_pct, &evidence, &counter, output)
        }
        Scenario::MonteCarlo {
            prior_pct,
            evidence,
            counter_evidence,
            samples,
            seed,
        } => {
            let evidence: Vec<IntervalEvidence> =
                evidence.iter().map(QuadPct::to_evidence).collect();
            let counter: Vec<Evidence> =
                counter_evidence.iter().map(PairPct::to_evidence).collect();
            run_monte_carlo(
                prior_pct,
                &evidence,
                &counter,
                samples.unwrap_or(DEFAULT_SAMPLE_COUNT),
                seed,
                30,
                output,
            )
        }
        Scenario::Star { prior_pct, nodes } => {
            let nodes: Vec<Evidence> = nodes.iter().map(PairPct::to_evidence).collect();
            run_star(prior_pct, &nodes, output)
        }
        Scenario::Dempster { source_a, source_b } => {
            let a = MassAssignment {
                guilt: source_a.guilt,
                innocence: source_a.innocence,
            };
            let b = MassAssignment {
                guilt: source_b.guilt,
                innocence: source_b.innocence,
            };
            run_dempster(&a, &b, output)
        }
    }
}

fn run_sequential(
    prior_pct: f64,
    evidence: &[Evidence],
    counter: &[Evidence],
    output: &str,
) -> Result<(), Box<dyn Error>> {
    let mut trace = update_point(prior_pct / 100.0, evidence)?;
    trace.extend_with_counter_evidence(counter)?;
    match output {
        "json" => {
            let final_pct = trace.final_posterior() * 100.0;
            let doc = json!({
                "trace": &trace,
                "final_pct": final_pct,
                "assessment": interpret_percentage(final_pct),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        "debug" => println!("{trace:#?}"),
        _ => print_point_summary(&trace),
    }
    Ok(())
}

fn run_interval(
    prior_pct: f64,
    evidence: &[IntervalEvidence],
    counter: &[Evidence],
    output: &str,
) -> Result<(), Box<dyn Error>> {
    let mut trace = update_interval(prior_pct / 100.0, evidence)?;
    trace.extend_with_counter_evidence(counter)?;
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&trace)?),
        "debug" => println!("{trace:#?}"),
        _ => print_interval_summary(&trace),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_monte_carlo(
    prior_pct: f64,
    evidence: &[IntervalEvidence],
    counter: &[Evidence],
    samples: usize,
    seed: Option<u64>,
    bins: usize,
    output: &str,
) -> Result<(), Box<dyn Error>> {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let run = monte_carlo(prior_pct / 100.0, evidence, counter, samples, &mut rng)?;
    match output {
        "json" => {
            let doc = json!({
                "run": &run,
                "histogram": run.histogram(bins),
                "box_plot": run.five_number_summary(),
                "assessment": interpret_percentage(run.median),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        "debug" => println!("{run:#?}"),
        _ => print_monte_carlo_summary(&run, bins),
    }
    Ok(())
}

fn run_star(prior_pct: f64, nodes: &[Evidence], output: &str) -> Result<(), Box<dyn Error>> {
    let posterior = star_posterior(prior_pct / 100.0, nodes)?;
    let pct = posterior * 100.0;
    match output {
        "json" => {
            let doc = json!({
                "posterior_pct": pct,
                "assessment": interpret_percentage(pct),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        "debug" => println!("{posterior:#?}"),
        _ => {
            println!(
                "Posterior (all nodes observed true): {} %",
                format_decimals(pct, DEFAULT_MAX_DECIMALS)
            );
            println!("Assessment: {}", interpret_percentage(pct));
        }
    }
    Ok(())
}

fn run_dempster(
    a: &MassAssignment,
    b: &MassAssignment,
    output: &str,
) -> Result<(), Box<dyn Error>> {
    let combined = combine(a, b)?;
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&combined)?),
        "debug" => println!("{combined:#?}"),
        _ => {
            println!("Dempster's rule of combination:");
            println!(
                "  m(guilt)     = {}",
                format_decimals(combined.guilt, DEFAULT_MAX_DECIMALS)
            );
            println!(
                "  m(innocence) = {}",
                format_decimals(combined.innocence, DEFAULT_MAX_DECIMALS)
            );
            println!(
                "  m(unknown)   = {}",
                format_decimals(combined.unknown, DEFAULT_MAX_DECIMALS)
            );
            println!(
                "  (conflict = {}, K = {})",
                format_decimals(combined.conflict, DEFAULT_MAX_DECIMALS),
                format_decimals(combined.normalization, DEFAULT_MAX_DECIMALS)
            );
        }
    }
    Ok(())
}

fn print_point_summary(trace: &PointTrace) {
    println!(
        "{:>5}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {}",
        "step", "P(B|A)%", "P(B|¬A)%", "old %", "new %", "Δ pp", "assessment"
    );
    let mut has_counter = false;
    for row in &trace.steps {
        let step = match row.kind {
            StepKind::Evidence => row.index.to_string(),
            StepKind::CounterEvidence => {
                has_counter = true;
                format!("{}*", row.index)
            }
        };
        println!(
            "{:>5}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {}",
            step,
            row.p_given_guilt_pct,
            row.p_given_innocence_pct,
            row.previous_pct,
            row.new_pct,
            row.delta_pp,
            row.assessment
        );
    }
    if has_counter {
        println!("  (* counter-evidence step)");
    }
    let final_pct = trace.final_posterior() * 100.0;
    println!(
        "\nFinal probability of guilt: {} %",
        format_decimals(final_pct, DEFAULT_MAX_DECIMALS)
    );
    println!("Assessment: {}", interpret_percentage(final_pct));
}

fn print_interval_summary(trace: &IntervalTrace) {
    println!("{:>5}  {:>9}  {:>9}  {:>9}", "step", "min %", "median %", "max %");
    for (i, ((lo, mid), hi)) in trace
        .min
        .iter()
        .zip(&trace.median)
        .zip(&trace.max)
        .enumerate()
    {
        println!(
            "{:>5}  {:>9.2}  {:>9.2}  {:>9.2}",
            i,
            lo * 100.0,
            mid * 100.0,
            hi * 100.0
        );
    }
    if let Some((lo, mid, hi)) = trace.final_span() {
        println!(
            "\nFinal span: min {} %, median {} %, max {} %",
            format_decimals(lo * 100.0, DEFAULT_MAX_DECIMALS),
            format_decimals(mid * 100.0, DEFAULT_MAX_DECIMALS),
            format_decimals(hi * 100.0, DEFAULT_MAX_DECIMALS)
        );
        println!("Assessment (median): {}", interpret_percentage(mid * 100.0));
    }
}

fn print_monte_carlo_summary(run: &MonteCarloRun, bins: usize) {
    println!("Monte Carlo (trials = {}):", run.samples.len());
    println!("  mean:   {} %", format_decimals(run.mean, DEFAULT_MAX_DECIMALS));
    println!("  min:    {} %", format_decimals(run.min, DEFAULT_MAX_DECIMALS));
    println!("  max:    {} %", format_decimals(run.max, DEFAULT_MAX_DECIMALS));
    println!("  std:    {}", format_decimals(run.std_dev, DEFAULT_MAX_DECIMALS));
    println!("  median: {} %", format_decimals(run.median, DEFAULT_MAX_DECIMALS));

    let histogram = run.histogram(bins);
    if !histogram.is_empty() {
        let peak = histogram.iter().map(|b| b.count).max().unwrap_or(1).max(1);
        println!("\nDistribution:");
        for bin in &histogram {
            let bar_len = bin.count * 40 / peak;
            println!(
                "  {:>7.2} – {:>7.2}  {:>5}  {}",
                bin.lower,
                bin.upper,
                bin.count,
                "#".repeat(bar_len)
            );
        }
    }

    let summary = run.five_number_summary();
    println!(
        "\nBox plot: min {:.2}, Q1 {:.2}, median {:.2}, Q3 {:.2}, max {:.2}",
        summary.min, summary.q1, summary.median, summary.q3, summary.max
    );
    println!("Assessment (median): {}", interpret_percentage(run.median));
}

fn print_templates() {
    println!("Evidence templates (P(B|A) %, P(B|¬A) %):");
    for (name, p_guilt, p_innocence) in TEMPLATES {
        println!("  {name:<18} {p_guilt:>5}  {p_innocence:>5}");
    }
    println!("\nUse a template name in place of a \"pg,pi\" evidence argument.");
}

fn parse_all<T>(args: &[String], parse: fn(&str) -> Result<T, String>) -> Result<Vec<T>, String> {
    args.iter().map(|arg| parse(arg)).collect()
}

/// Parses "pg,pi" in percent, or a template name, into point evidence.
fn parse_point_pct(arg: &str) -> Result<Evidence, String> {
    if let Some(&(_, p_guilt, p_innocence)) = TEMPLATES
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(arg.trim()))
    {
        return Ok(Evidence {
            p_given_guilt: p_guilt / 100.0,
            p_given_innocence: p_innocence / 100.0,
        });
    }
    let values = parse_csv(arg, 2)?;
    Ok(Evidence {
        p_given_guilt: values[0] / 100.0,
        p_given_innocence: values[1] / 100.0,
    })
}

/// Parses "gmin,gmax,imin,imax" in percent into interval evidence.
fn parse_interval_pct(arg: &str) -> Result<IntervalEvidence, String> {
    let values = parse_csv(arg, 4)?;
    Ok(IntervalEvidence {
        p_given_guilt_min: values[0] / 100.0,
        p_given_guilt_max: values[1] / 100.0,
        p_given_innocence_min: values[2] / 100.0,
        p_given_innocence_max: values[3] / 100.0,
    })
}

/// Parses "guilt,innocence" fractions into a mass assignment.
fn parse_mass(arg: &str) -> Result<MassAssignment, String> {
    let values = parse_csv(arg, 2)?;
    Ok(MassAssignment {
        guilt: values[0],
        innocence: values[1],
    })
}

fn parse_csv(arg: &str, expected: usize) -> Result<Vec<f64>, String> {
    let parts: Vec<&str> = arg.split(',').collect();
    if parts.len() != expected {
        return Err(format!(
            "expected {expected} comma-separated values, got '{arg}'"
        ));
    }
    parts
        .iter()
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid number '{}' in '{arg}'", part.trim()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_pct_accepts_pairs_and_templates() {
        let pair = parse_point_pct("95,0.1").unwrap();
        assert!((pair.p_given_guilt - 0.95).abs() < 1e-12);
        assert!((pair.p_given_innocence - 0.001).abs() < 1e-12);

        let dna = parse_point_pct("dna").unwrap();
        assert_eq!(pair, dna);
    }

    #[test]
    fn parse_interval_pct_requires_four_values() {
        assert!(parse_interval_pct("50,60,5").is_err());
        let item = parse_interval_pct("50,60,5,10").unwrap();
        assert!((item.p_given_guilt_max - 0.60).abs() < 1e-12);
        assert!((item.p_given_innocence_min - 0.05).abs() < 1e-12);
    }

    #[test]
    fn parse_mass_reads_fractions() {
        let mass = parse_mass("0.5,0.2").unwrap();
        assert!((mass.guilt - 0.5).abs() < 1e-12);
        assert!((mass.innocence - 0.2).abs() < 1e-12);
    }

    #[test]
    fn scenario_json_round_trips() {
        let source = r#"{
            "method": "monte_carlo",
            "prior_pct": 1.0,
            "evidence": [{
                "guilt_min_pct": 50.0,
                "guilt_max_pct": 60.0,
                "innocence_min_pct": 5.0,
                "innocence_max_pct": 10.0
            }],
            "samples": 200,
            "seed": 42
        }"#;
        let scenario: Scenario = serde_json::from_str(source).unwrap();
        match &scenario {
            Scenario::MonteCarlo { samples, seed, .. } => {
                assert_eq!(*samples, Some(200));
                assert_eq!(*seed, Some(42));
            }
            other => panic!("unexpected scenario: {other:?}"),
        }
        let text = serde_json::to_string(&scenario).unwrap();
        let back: Scenario = serde_json::from_str(&text).unwrap();
        assert!(matches!(back, Scenario::MonteCarlo { .. }));
    }
}
