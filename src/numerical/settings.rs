//! Calculator settings shared by the evaluator and the solver.

use crate::symbolic::symbolic_engine::AngleUnit;

/// Knobs of a calculation: numeric tolerances, the iteration cap, the
/// derivative step, the angle unit of trigonometric arguments, display
/// precision and the solver's loglevel. `Default` reproduces the
/// calculator's stock configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcSettings {
    pub angle_unit: AngleUnit,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub derivative_step: f64,
    /// Number of significant digits a host application rounds results to.
    /// Purely presentational, never applied to the numbers returned here.
    pub precision: usize,
    pub loglevel: Option<String>,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            angle_unit: AngleUnit::Radians,
            tolerance: 1e-6,
            max_iterations: 100,
            derivative_step: 1e-8,
            precision: 6,
            loglevel: None,
        }
    }
}

impl CalcSettings {
    pub fn validate(&self) {
        assert!(self.tolerance > 0.0, "Tolerance should be a positive number.");
        assert!(
            self.max_iterations > 0,
            "Max iterations should be a positive number."
        );
        assert!(
            self.derivative_step > 0.0,
            "Derivative step should be a positive number."
        );
        assert!(self.precision > 0, "Precision should be a positive number.");
    }
}
