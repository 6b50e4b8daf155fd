//! Multi-start root scan over an interval.
//!
//! Partitions [x_min, x_max] into evenly spaced starting points and runs a
//! short Newton-Raphson from each one. Starts that fail (flat derivative,
//! divergence, iteration cap) are skipped silently, so the scan over a
//! function with poles or plateaus still reports the roots it can reach.
//! Converged roots closer than 10x the tolerance to an already found root
//! are treated as duplicates; the survivors keep scan order, not numeric
//! order.

use crate::numerical::NR::{SolveOutcome, solve};
use crate::symbolic::symbolic_engine::{AngleUnit, Expr, InvalidExpression};
use log::{debug, warn};

/// Iteration cap of every scan start. Scans favor breadth over depth:
/// a start that genuinely converges does so quickly.
pub const SCAN_ITERATION_CAP: usize = 50;

/// Multiplier on the tolerance within which two roots count as one.
pub const DEDUP_TOLERANCE_FACTOR: f64 = 10.0;

/// Scans [x_min, x_max] for roots of the expression by running
/// Newton-Raphson from `num_trials` evenly spaced starting points.
///
/// Returns one outcome per distinct converged root, in the order the scan
/// found them. Best-effort by contract: an expression that does not parse,
/// a degenerate interval or an unusable tolerance all yield an empty or
/// partial list, never a failure.
pub fn find_multiple_roots(
    expression: &str,
    x_min: f64,
    x_max: f64,
    num_trials: usize,
    tolerance: f64,
    angle_unit: AngleUnit,
) -> Vec<SolveOutcome> {
    if num_trials == 0 {
        return Vec::new();
    }
    // a non-positive (or NaN) tolerance can never satisfy |dx| < tolerance,
    // so no trial would be accepted anyway; skip the work
    if !(tolerance > 0.0) {
        warn!("root scan skipped, tolerance {} accepts no root", tolerance);
        return Vec::new();
    }
    if let Err(parse_error) = Expr::parse_expression_forgiving(expression) {
        warn!("root scan skipped, expression does not parse: {}", parse_error);
        return Vec::new();
    }

    // starts partition [x_min, x_max) left to right; x_max itself is not a
    // start, it bounds the last subinterval. A degenerate or reversed
    // interval is not an error: the trials simply coincide or sweep
    // right to left
    let step = (x_max - x_min) / num_trials as f64;
    let mut found: Vec<SolveOutcome> = Vec::new();
    for i in 0..num_trials {
        let x0 = x_min + i as f64 * step;
        match solve(expression, x0, tolerance, SCAN_ITERATION_CAP, angle_unit) {
            Ok(outcome) if outcome.converged => {
                let duplicate = found
                    .iter()
                    .any(|known| (known.root - outcome.root).abs() < DEDUP_TOLERANCE_FACTOR * tolerance);
                if !duplicate {
                    debug!("root found at x = {} from start x0 = {}", outcome.root, x0);
                    found.push(outcome);
                }
            }
            Ok(_) => debug!("start x0 = {} exhausted its iterations", x0),
            Err(failure) => debug!("start x0 = {} failed: {}", x0, failure),
        }
    }
    found
}

/// Variant of [`find_multiple_roots`] that surfaces a parse failure instead
/// of swallowing it, for callers that validate input separately.
pub fn find_multiple_roots_checked(
    expression: &str,
    x_min: f64,
    x_max: f64,
    num_trials: usize,
    tolerance: f64,
    angle_unit: AngleUnit,
) -> Result<Vec<SolveOutcome>, InvalidExpression> {
    Expr::parse_expression_forgiving(expression)?;
    Ok(find_multiple_roots(
        expression, x_min, x_max, num_trials, tolerance, angle_unit,
    ))
}

///////////////////////////////////////////////////////////////////////////
//                                     TESTS
///////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scan_finds_all_three_roots_in_scan_order() {
        let roots = find_multiple_roots("x^3-x", -2.0, 2.0, 10, 1e-6, AngleUnit::Radians);
        assert_eq!(roots.len(), 3);
        // starts sweep left to right, so -1 is found before 0 before 1
        assert_relative_eq!(roots[0].root, -1.0, epsilon = 1e-6);
        assert_relative_eq!(roots[1].root, 0.0, epsilon = 1e-5);
        assert_relative_eq!(roots[2].root, 1.0, epsilon = 1e-6);
        for outcome in &roots {
            assert!(outcome.converged);
            assert!(outcome.iterations <= SCAN_ITERATION_CAP);
        }
    }

    #[test]
    fn test_scan_deduplicates_repeated_roots() {
        // every start of x^2-4 in [0, 4] converges to the same root
        let roots = find_multiple_roots("x^2-4", 0.5, 4.0, 8, 1e-6, AngleUnit::Radians);
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0].root, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_scan_survives_failing_starts() {
        // starts at -3,-2,-1,0,1,2: the one at x = 0 hits a flat derivative
        // of x^2-4 and is skipped, the rest converge
        let roots = find_multiple_roots("x^2-4", -3.0, 3.0, 6, 1e-6, AngleUnit::Radians);
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0].root, -2.0, epsilon = 1e-6);
        assert_relative_eq!(roots[1].root, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_scan_with_no_roots_is_empty() {
        let roots = find_multiple_roots("x^2+1", -5.0, 5.0, 10, 1e-6, AngleUnit::Radians);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_invalid_expression_yields_empty_scan() {
        let roots = find_multiple_roots("x +* 2", -1.0, 1.0, 5, 1e-6, AngleUnit::Radians);
        assert!(roots.is_empty());
        let err =
            find_multiple_roots_checked("x +* 2", -1.0, 1.0, 5, 1e-6, AngleUnit::Radians)
                .unwrap_err();
        assert!(err.to_string().contains("invalid function expression"));
    }

    #[test]
    fn test_zero_trials_is_empty() {
        let roots = find_multiple_roots("x", -1.0, 1.0, 0, 1e-6, AngleUnit::Radians);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_degenerate_interval_does_not_panic() {
        // all five starts coincide at x = 1 and converge to the root at 0
        let roots = find_multiple_roots("x", 1.0, 1.0, 5, 1e-6, AngleUnit::Radians);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].root.abs() < 1e-6);
    }

    #[test]
    fn test_reversed_interval_scans_right_to_left() {
        let roots = find_multiple_roots("x^2-4", 2.5, -2.5, 5, 1e-6, AngleUnit::Radians);
        assert_eq!(roots.len(), 2);
        // negative step sweeps from 2.5 down, so +2 is found first
        assert_relative_eq!(roots[0].root, 2.0, epsilon = 1e-6);
        assert_relative_eq!(roots[1].root, -2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_nonpositive_tolerance_is_empty() {
        let roots = find_multiple_roots("x", -1.0, 1.0, 5, 0.0, AngleUnit::Radians);
        assert!(roots.is_empty());
        let roots = find_multiple_roots("x", -1.0, 1.0, 5, f64::NAN, AngleUnit::Radians);
        assert!(roots.is_empty());
    }

    #[test]
    fn test_scan_in_degrees() {
        // sin has roots at 0 and +-180 degrees inside [-270, 270]; starts
        // near the extrema of sin shoot past the interval and converge to
        // +-360, which the scan reports too - roots are not clamped to the
        // interval, only the starting points are
        let roots = find_multiple_roots("sin(x)", -270.0, 270.0, 13, 1e-6, AngleUnit::Degrees);
        let found: Vec<f64> = roots.iter().map(|o| o.root).collect();
        for expected in [-180.0, 0.0, 180.0] {
            assert!(
                found.iter().any(|r| (r - expected).abs() < 1e-4),
                "missing root near {expected}, found {found:?}"
            );
        }
        for root in &found {
            assert!(root.abs() <= 360.0 + 1e-4);
        }
    }
}
