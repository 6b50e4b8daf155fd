// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod numerical;
pub mod symbolic;

pub use crate::numerical::NR::{EvaluationStep, NR, SolveError, SolveOutcome};
pub use crate::numerical::multi_root::find_multiple_roots;
pub use crate::numerical::settings::CalcSettings;
pub use crate::symbolic::symbolic_engine::{AngleUnit, Expr, InvalidExpression};

/// Evaluates an expression of `x` at a point.
///
/// Missing closing brackets are appended before parsing; trigonometric
/// arguments are interpreted in the given angle unit. A point where the
/// expression is undefined (a pole, log of a negative) is an error, not
/// a NaN.
pub fn evaluate(expression: &str, x: f64, angle_unit: AngleUnit) -> Result<f64, InvalidExpression> {
    let expr = Expr::parse_expression_forgiving(expression)?;
    expr.eval1D(x, angle_unit)
}

/// Solves f(x) = 0 by Newton-Raphson from the initial guess `x0`,
/// returning the root together with the full iteration trace.
pub fn solve(
    expression: &str,
    x0: f64,
    tolerance: f64,
    max_iterations: usize,
    angle_unit: AngleUnit,
) -> Result<SolveOutcome, SolveError> {
    crate::numerical::NR::solve(expression, x0, tolerance, max_iterations, angle_unit)
}

/// Scans [x_min, x_max] for roots from `num_trials` evenly spaced starts.
pub fn find_roots(
    expression: &str,
    x_min: f64,
    x_max: f64,
    num_trials: usize,
    tolerance: f64,
    angle_unit: AngleUnit,
) -> Vec<SolveOutcome> {
    find_multiple_roots(expression, x_min, x_max, num_trials, tolerance, angle_unit)
}
