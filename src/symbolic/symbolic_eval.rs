//! Converting symbolic expressions to executable f64 functions.
//!
//! `lambdify1D` compiles an `Expr` into a tree of nested closures, one per
//! AST node, so the solver can evaluate f(x) thousands of times without
//! re-parsing. The angle unit is baked into the trigonometric nodes at
//! compile time: the argument of every sin/cos/tan node is multiplied by
//! `radians_per_unit()` before the host trig call, and nothing else in the
//! expression is converted.

use crate::symbolic::symbolic_engine::{AngleUnit, Expr, InvalidExpression};
use crate::symbolic::utils::linspace;

impl Expr {
    /// Converts the expression into an executable closure over the single
    /// variable `x`, honoring the angle unit for trigonometric arguments.
    ///
    /// Fails with `InvalidExpression` if the expression contains any free
    /// variable other than `x` - the calculator grammar defines no other
    /// identifiers, so anything else is a user typo caught here rather than
    /// at parse time.
    ///
    /// # Examples
    /// ```
    /// use RustedNewton::symbolic::symbolic_engine::{AngleUnit, Expr};
    /// let f = Expr::parse_expression("x^2-4").unwrap();
    /// let func = f.lambdify1D(AngleUnit::Radians).unwrap();
    /// assert_eq!(func(2.0), 0.0);
    /// ```
    pub fn lambdify1D(
        &self,
        angle_unit: AngleUnit,
    ) -> Result<Box<dyn Fn(f64) -> f64 + Send + Sync>, InvalidExpression> {
        for name in self.extract_variables() {
            if name != "x" {
                return Err(InvalidExpression::new(format!(
                    "unknown identifier '{}': the only defined variable is 'x'",
                    name
                )));
            }
        }
        Ok(self.compile1d(angle_unit.radians_per_unit()))
    }

    // Recursive closure builder; callers guarantee every Var is "x".
    fn compile1d(&self, angle_factor: f64) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lf = lhs.compile1d(angle_factor);
                let rf = rhs.compile1d(angle_factor);
                Box::new(move |x| lf(x) + rf(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lf = lhs.compile1d(angle_factor);
                let rf = rhs.compile1d(angle_factor);
                Box::new(move |x| lf(x) - rf(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lf = lhs.compile1d(angle_factor);
                let rf = rhs.compile1d(angle_factor);
                Box::new(move |x| lf(x) * rf(x))
            }
            Expr::Div(lhs, rhs) => {
                let lf = lhs.compile1d(angle_factor);
                let rf = rhs.compile1d(angle_factor);
                Box::new(move |x| lf(x) / rf(x))
            }
            Expr::Pow(base, exp) => {
                let bf = base.compile1d(angle_factor);
                let ef = exp.compile1d(angle_factor);
                Box::new(move |x| bf(x).powf(ef(x)))
            }
            Expr::Exp(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| f(x).exp())
            }
            Expr::Ln(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| f(x).ln())
            }
            Expr::Log10(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| f(x).log10())
            }
            Expr::Sqrt(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| f(x).sqrt())
            }
            Expr::Abs(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| f(x).abs())
            }
            // the trig argument is pre-multiplied by the radians-per-unit
            // factor; with radians the factor is exactly 1.0
            Expr::sin(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| (angle_factor * f(x)).sin())
            }
            Expr::cos(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| (angle_factor * f(x)).cos())
            }
            Expr::tg(e) => {
                let f = e.compile1d(angle_factor);
                Box::new(move |x| (angle_factor * f(x)).tan())
            }
        }
    }

    /// Evaluates the expression at a single point, rejecting non-finite
    /// results (division blowing up, ln of a negative number, and so on).
    pub fn eval1D(&self, x: f64, angle_unit: AngleUnit) -> Result<f64, InvalidExpression> {
        let func = self.lambdify1D(angle_unit)?;
        let result = func(x);
        if result.is_finite() {
            Ok(result)
        } else {
            Err(InvalidExpression::new(format!(
                "evaluation at x = {} produced a non-finite value",
                x
            )))
        }
    }

    /// Samples the function on a uniform grid over [x_min, x_max], for
    /// plotting by a host application. Points where the function is
    /// non-finite (poles, domain edges) are skipped rather than reported
    /// as errors.
    pub fn eval_on_linspace(
        &self,
        x_min: f64,
        x_max: f64,
        num_values: usize,
        angle_unit: AngleUnit,
    ) -> Result<Vec<(f64, f64)>, InvalidExpression> {
        let func = self.lambdify1D(angle_unit)?;
        let points = linspace(x_min, x_max, num_values)
            .into_iter()
            .map(|x| (x, func(x)))
            .filter(|(_, y)| y.is_finite())
            .collect();
        Ok(points)
    }
}
