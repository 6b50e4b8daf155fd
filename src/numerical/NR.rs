//! Newton-Raphson solver for a single nonlinear equation f(x) = 0.
//!
//! The function is supplied as a string, parsed into a symbolic expression
//! and lambdified once per solve; the derivative is the central-difference
//! approximation (f(x+h) - f(x-h)) / 2h with a fixed default step of 1e-8.
//! Every iteration is recorded in an `EvaluationStep` trace so a host
//! application can show the computation step by step.
//!
//!  Example#1
//! ```
//! // the shortest way: the free solve() function
//! use RustedNewton::numerical::NR::solve;
//! use RustedNewton::symbolic::symbolic_engine::AngleUnit;
//!
//! let outcome = solve("x^3-2*x-5", 2.0, 1e-6, 100, AngleUnit::Radians).unwrap();
//! assert!(outcome.converged);
//! assert!((outcome.root - 2.0945514815423265).abs() < 1e-6);
//! ```
//! Example#2
//! ```
//! // or more verbose way, with the solver struct and its setters
//! use RustedNewton::numerical::NR::NR;
//! use RustedNewton::symbolic::symbolic_engine::AngleUnit;
//!
//! let mut NR_instanse = NR::new();
//! NR_instanse.set_equation_from_str("x^2-4").unwrap();
//! NR_instanse.set_initial_guess(3.0);
//! NR_instanse.set_solver_params(Some("off".to_string()), None, None, None);
//! NR_instanse.solve().unwrap();
//! let outcome = NR_instanse.get_result().unwrap();
//! assert!((outcome.root - 2.0).abs() < 1e-6);
//! ```

use crate::numerical::settings::CalcSettings;
use crate::symbolic::symbolic_engine::{AngleUnit, Expr, InvalidExpression};
use log::{error, info, warn};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use thiserror::Error;

/// Default step of the central-difference derivative.
pub const DEFAULT_DERIVATIVE_STEP: f64 = 1e-8;
/// Below this |f'(x)| the Newton step divides by a near-zero and the method
/// cannot safely continue.
pub const DERIVATIVE_FLOOR: f64 = 1e-12;
/// An iterate beyond this magnitude is treated as divergence.
pub const DIVERGENCE_BOUND: f64 = 1e10;

/// One recorded Newton-Raphson iteration: the point, the function value
/// and the numeric derivative there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationStep {
    pub iteration: usize,
    pub x: f64,
    pub fx: f64,
    pub fpx: f64,
}

/// Result of a single solve call, owned by the caller and immutable after
/// return. `final_error` is the last step displacement |x_next - x| when
/// converged, and the residual |f(x)| when the iteration cap is exhausted -
/// the two paths deliberately report different quantities, matching the
/// calculator's established output.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub root: f64,
    pub iterations: usize,
    pub converged: bool,
    pub steps: Vec<EvaluationStep>,
    pub final_error: f64,
}

/// Terminal failures of a solve call. Evaluator failures pass through
/// unchanged; the two solver-specific kinds stay distinct so callers can
/// tell "pick another starting point" from "bad input".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(transparent)]
    InvalidExpression(#[from] InvalidExpression),
    #[error("derivative too small at x = {x} (|f'(x)| = {fprime:e}) - the method may not converge")]
    DerivativeTooSmall { x: f64, fprime: f64 },
    #[error("method diverged at iteration {iteration} (x = {x}) - try a different initial value")]
    Diverged { iteration: usize, x: f64 },
}

/// Newton-Raphson solver for one equation in one unknown.
pub struct NR {
    pub expression: Option<Expr>,        // equation to solve, f(x) = 0
    pub x0: f64,                         // initial guess
    pub tolerance: f64,                  // tolerance on the step displacement
    pub max_iterations: usize,           // max number of iterations
    pub derivative_step: f64,            // h of the central difference
    pub angle_unit: AngleUnit,           // unit of trigonometric arguments
    pub steps: Vec<EvaluationStep>,      // trace of the last run, kept on failure too
    pub result: Option<SolveOutcome>,    // result of the iteration
    pub loglevel: Option<String>,
    pub i: usize, // iteration counter
}

impl NR {
    pub fn new() -> NR {
        NR {
            expression: None,
            x0: 0.0,
            tolerance: 1e-6,
            max_iterations: 100,
            derivative_step: DEFAULT_DERIVATIVE_STEP,
            angle_unit: AngleUnit::Radians,
            steps: Vec::new(),
            result: None,
            loglevel: Some("info".to_string()),
            i: 0,
        }
    }

    ////////////////////////////SETTERS///////////////////////////////////////

    /// Parses and sets the equation from a string, with the calculator's
    /// forgiving bracket policy.
    pub fn set_equation_from_str(&mut self, equation: &str) -> Result<(), InvalidExpression> {
        self.expression = Some(Expr::parse_expression_forgiving(equation)?);
        Ok(())
    }

    pub fn set_equation(&mut self, expression: Expr) {
        self.expression = Some(expression);
    }

    pub fn set_initial_guess(&mut self, x0: f64) {
        self.x0 = x0;
    }

    pub fn set_solver_params(
        &mut self,
        loglevel: Option<String>,
        tolerance: Option<f64>,
        max_iterations: Option<usize>,
        derivative_step: Option<f64>,
    ) {
        if let Some(level) = loglevel {
            assert!(
                level == "debug"
                    || level == "info"
                    || level == "warn"
                    || level == "error"
                    || level == "off"
                    || level == "none",
                "loglevel must be debug/info/warn/error or off"
            );
            self.loglevel = Some(level);
        }
        if let Some(tolerance) = tolerance {
            assert!(tolerance > 0.0, "Tolerance should be a positive number.");
            self.tolerance = tolerance;
        }
        if let Some(max_iterations) = max_iterations {
            assert!(
                max_iterations > 0,
                "Max iterations should be a positive number."
            );
            self.max_iterations = max_iterations;
        }
        if let Some(derivative_step) = derivative_step {
            assert!(
                derivative_step > 0.0,
                "Derivative step should be a positive number."
            );
            self.derivative_step = derivative_step;
        }
    }

    pub fn set_angle_unit(&mut self, angle_unit: AngleUnit) {
        self.angle_unit = angle_unit;
    }

    /// Copies tolerance, iteration cap, derivative step, angle unit and
    /// loglevel from an explicit settings struct.
    pub fn apply_settings(&mut self, settings: &CalcSettings) {
        settings.validate();
        self.tolerance = settings.tolerance;
        self.max_iterations = settings.max_iterations;
        self.derivative_step = settings.derivative_step;
        self.angle_unit = settings.angle_unit;
        if settings.loglevel.is_some() {
            self.loglevel = settings.loglevel.clone();
        }
    }

    /////////////////////////////////////////////////////////////////////////
    //                ITERATIONS
    /////////////////////////////////////////////////////////////////////////

    /// Runs the Newton-Raphson iteration x_{n+1} = x_n - f(x_n)/f'(x_n)
    /// until the step displacement |x_next - x| drops below the tolerance,
    /// the iterate diverges, the derivative vanishes, or the iteration cap
    /// is exhausted. Exhausting the cap is a normal outcome reported with
    /// `converged = false`, not an error.
    pub fn main_loop(&mut self) -> Result<SolveOutcome, SolveError> {
        let expr = self
            .expression
            .as_ref()
            .expect("equation must be set before solving");
        let func = expr.lambdify1D(self.angle_unit)?;
        let eval = |x: f64| -> Result<f64, InvalidExpression> {
            let y = func(x);
            if y.is_finite() {
                Ok(y)
            } else {
                Err(InvalidExpression::new(format!(
                    "evaluation at x = {} produced a non-finite value",
                    x
                )))
            }
        };

        let h = self.derivative_step;
        let mut x = self.x0;
        // the trace accumulates in place so every exit, including an
        // evaluation failure propagated by `?`, leaves it current
        self.steps.clear();
        self.result = None;

        for iteration in 0..self.max_iterations {
            self.i = iteration;
            let fx = eval(x)?;
            let fpx = (eval(x + h)? - eval(x - h)?) / (2.0 * h);
            self.steps.push(EvaluationStep { iteration, x, fx, fpx });
            info!(
                "iteration = {}, x = {}, f(x) = {}, f'(x) = {}",
                iteration, x, fx, fpx
            );

            if fpx.abs() < DERIVATIVE_FLOOR {
                error!("derivative too small at x = {}: |f'(x)| = {:e}", x, fpx.abs());
                return Err(SolveError::DerivativeTooSmall { x, fprime: fpx });
            }

            let x_next = x - fx / fpx;
            let displacement = (x_next - x).abs();
            if displacement < self.tolerance {
                // one terminal record evaluated at the accepted root
                let fx_next = eval(x_next)?;
                let fpx_next = (eval(x_next + h)? - eval(x_next - h)?) / (2.0 * h);
                self.steps.push(EvaluationStep {
                    iteration: iteration + 1,
                    x: x_next,
                    fx: fx_next,
                    fpx: fpx_next,
                });
                info!("converged in {} iterations, root = {}", iteration + 1, x_next);
                let outcome = SolveOutcome {
                    root: x_next,
                    iterations: iteration + 1,
                    converged: true,
                    steps: self.steps.clone(),
                    final_error: displacement,
                };
                self.result = Some(outcome.clone());
                return Ok(outcome);
            }

            x = x_next;
            if !x.is_finite() || x.abs() > DIVERGENCE_BOUND {
                error!("method diverged at iteration {}: x = {}", iteration, x);
                return Err(SolveError::Diverged { iteration, x });
            }
        }

        warn!("Maximum number of iterations reached. No root found within tolerance.");
        let final_error = eval(x)?.abs();
        let outcome = SolveOutcome {
            root: x,
            iterations: self.max_iterations,
            converged: false,
            steps: self.steps.clone(),
            final_error,
        };
        self.result = Some(outcome.clone());
        Ok(outcome)
    }

    // wrapper around main_loop to implement logging
    pub fn solve(&mut self) -> Result<SolveOutcome, SolveError> {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            self.main_loop()
        } else {
            let log_option = match self.loglevel.as_deref() {
                Some("debug") => LevelFilter::Debug,
                Some("info") | None => LevelFilter::Info,
                Some("warn") => LevelFilter::Warn,
                Some("error") => LevelFilter::Error,
                Some(level) => panic!("loglevel must be debug, info, warn or error, got {}", level),
            };
            let logger_instance = CombinedLogger::init(vec![TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]);

            match logger_instance {
                Ok(()) => {
                    let res = self.main_loop();
                    info!("solve finished");
                    res
                }
                // a logger installed earlier in the process is fine
                Err(_) => self.main_loop(),
            }
        }
    }

    pub fn get_result(&self) -> Option<SolveOutcome> {
        self.result.clone()
    }
}

impl Default for NR {
    fn default() -> Self {
        NR::new()
    }
}

/// Solves f(x) = 0 by Newton-Raphson from the initial guess `x0`.
///
/// The derivative step is fixed at 1e-8. This is the plain functional entry
/// point: it never touches the logger installation and builds a fresh
/// solver per call, so it is safe to call from multiple threads.
pub fn solve(
    expression: &str,
    x0: f64,
    tolerance: f64,
    max_iterations: usize,
    angle_unit: AngleUnit,
) -> Result<SolveOutcome, SolveError> {
    let mut nr = NR::new();
    nr.set_equation_from_str(expression)?;
    nr.set_initial_guess(x0);
    nr.set_solver_params(None, Some(tolerance), Some(max_iterations), None);
    nr.set_angle_unit(angle_unit);
    nr.main_loop()
}
