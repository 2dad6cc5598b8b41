//! Numeric formatting and verbal interpretation of posterior percentages.
//!
//! Three distinct label vocabularies are exposed:
//!
//! - [`interpret_percentage`]: generic tiers for a final combined result
//! - [`step_assessment`]: per-step tiers phrased in legal-process terms
//! - [`counter_assessment`]: abbreviated tiers for counter-evidence steps
//!
//! The vocabularies are intentionally different. A per-step row is read in
//! the context of an evidentiary chain (arrest, indictment, conviction
//! thresholds), while the final interpretation stands alone.

/// Default number of decimal places for [`format_decimals`].
pub const DEFAULT_MAX_DECIMALS: usize = 10;

/// Renders a value with up to `max_decimals` decimal digits, trimming
/// trailing zeros and a trailing decimal point.
///
/// An empty or minus-only result collapses to `"0"`. Total over all finite
/// inputs; non-finite values are rejected upstream by engine validation.
///
/// ```
/// use evidentia_core::report::format_decimals;
///
/// assert_eq!(format_decimals(0.012300, 10), "0.0123");
/// assert_eq!(format_decimals(123.0, 10), "123");
/// ```
pub fn format_decimals(value: f64, max_decimals: usize) -> String {
    let mut s = format!("{value:.max_decimals$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s.is_empty() || s == "-" {
        s = "0".to_string();
    }
    s
}

/// Maps a percentage to a verbal assessment of the combined result.
///
/// Thresholds are evaluated highest first; values outside 0-100 fall into
/// the nearest open-ended tier.
pub fn interpret_percentage(pct: f64) -> &'static str {
    if pct >= 95.0 {
        "beyond reasonable doubt"
    } else if pct >= 80.0 {
        "clearly preponderant reasons"
    } else if pct >= 60.0 {
        "substantially established"
    } else if pct >= 50.0 {
        "roughly even / slight preponderance"
    } else if pct >= 40.0 {
        "doubtful"
    } else if pct >= 20.0 {
        "improbable"
    } else if pct >= 1.0 {
        "practically no chance"
    } else {
        "near impossible"
    }
}

/// Maps a per-step posterior percentage to a legal-process tier label.
///
/// This vocabulary is distinct from [`interpret_percentage`]: it tracks the
/// procedural thresholds a chain of evidence passes through rather than a
/// standalone verdict on the final number.
pub fn step_assessment(pct: f64) -> &'static str {
    if pct >= 95.0 {
        "beyond reasonable doubt"
    } else if pct >= 80.0 {
        "strongly indicates guilt"
    } else if pct >= 60.0 {
        "sufficient grounds for indictment"
    } else if pct >= 50.0 {
        "preponderance of evidence"
    } else if pct >= 40.0 {
        "probable cause to suspect"
    } else if pct >= 30.0 {
        "doubtful"
    } else if pct >= 20.0 {
        "improbable"
    } else {
        "indicates innocence"
    }
}

/// Maps a posterior percentage after a counter-evidence step to one of four
/// abbreviated tiers.
pub fn counter_assessment(pct: f64) -> &'static str {
    if pct >= 95.0 {
        ">95%"
    } else if pct >= 80.0 {
        ">80%"
    } else if pct >= 50.0 {
        ">50%"
    } else {
        "under 50%"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_decimals_trims_trailing_zeros() {
        assert_eq!(format_decimals(0.0123, 10), "0.0123");
        assert_eq!(format_decimals(123.0, 10), "123");
        assert_eq!(format_decimals(100.5, 10), "100.5");
        assert_eq!(format_decimals(0.0, 10), "0");
    }

    #[test]
    fn format_decimals_respects_max_decimals() {
        assert_eq!(format_decimals(0.123456789, 4), "0.1235");
        assert_eq!(format_decimals(1.0 / 3.0, 10), "0.3333333333");
    }

    #[test]
    fn format_decimals_keeps_integers_intact_without_fraction() {
        assert_eq!(format_decimals(100.0, 0), "100");
        assert_eq!(format_decimals(-42.0, 2), "-42");
    }

    #[test]
    fn format_decimals_handles_negative_values() {
        assert_eq!(format_decimals(-0.50, 10), "-0.5");
    }

    #[test]
    fn interpret_percentage_tier_boundaries() {
        assert_eq!(interpret_percentage(95.0), "beyond reasonable doubt");
        assert_eq!(interpret_percentage(94.999), "clearly preponderant reasons");
        assert_eq!(interpret_percentage(60.0), "substantially established");
        assert_eq!(interpret_percentage(50.0), "roughly even / slight preponderance");
        assert_eq!(interpret_percentage(40.0), "doubtful");
        assert_eq!(interpret_percentage(20.0), "improbable");
        assert_eq!(interpret_percentage(1.0), "practically no chance");
        assert_eq!(interpret_percentage(0.5), "near impossible");
    }

    #[test]
    fn interpret_percentage_is_total_outside_zero_to_hundred() {
        assert_eq!(interpret_percentage(250.0), "beyond reasonable doubt");
        assert_eq!(interpret_percentage(-10.0), "near impossible");
    }

    #[test]
    fn step_assessment_uses_the_process_vocabulary() {
        assert_eq!(step_assessment(96.0), "beyond reasonable doubt");
        assert_eq!(step_assessment(85.0), "strongly indicates guilt");
        assert_eq!(step_assessment(65.0), "sufficient grounds for indictment");
        assert_eq!(step_assessment(55.0), "preponderance of evidence");
        assert_eq!(step_assessment(45.0), "probable cause to suspect");
        assert_eq!(step_assessment(35.0), "doubtful");
        assert_eq!(step_assessment(25.0), "improbable");
        assert_eq!(step_assessment(10.0), "indicates innocence");
    }

    #[test]
    fn counter_assessment_has_four_tiers() {
        assert_eq!(counter_assessment(99.0), ">95%");
        assert_eq!(counter_assessment(90.0), ">80%");
        assert_eq!(counter_assessment(75.0), ">50%");
        assert_eq!(counter_assessment(49.9), "under 50%");
    }
}
