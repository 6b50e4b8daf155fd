//! # Symbolic Engine Module
//!
//! Core symbolic representation of a single-variable real function. A user
//! supplied string like "x^3 - 2*x - 5" is parsed (see parse_expr) into the
//! `Expr` tree defined here, and later turned into an executable f64 closure
//! (see symbolic_eval). The engine is deliberately small: one variable, the
//! fixed function set of the calculator grammar, no symbolic differentiation.
//!
//! ## Main Structures
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - the function argument "x" (other names
//!   parse but are rejected at evaluation time)
//! - **Constants**: `Const(f64)` - numeric literals; `pi` and `e` are already
//!   resolved to constants by the parser
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//! - **Functions**: `Exp`, `Ln`, `Log10`, `Sqrt`, `Abs`, `sin`, `cos`, `tg`
//!
//! ### `AngleUnit` Enum
//! Governs how arguments of the trigonometric functions are interpreted:
//! radians (no conversion), degrees (pi/180 per unit) or gradians (pi/200
//! per unit). Conversion is applied at the trig nodes during evaluation,
//! never to `x` globally, so non-trigonometric uses of `x` in the same
//! expression stay unconverted.
//!
//! Expressions are plain values: no global state, no caching, every call
//! into the engine works on call-local data only.

use std::f64::consts::PI;
use std::fmt;
use strum_macros::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// Error returned when an input string cannot be reduced to a computable
/// numeric expression: malformed syntax, an unknown identifier, or an
/// evaluation producing a non-finite value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid function expression: {reason}")]
pub struct InvalidExpression {
    pub reason: String,
}

impl InvalidExpression {
    pub fn new(reason: impl Into<String>) -> Self {
        InvalidExpression {
            reason: reason.into(),
        }
    }
}

/// Unit in which arguments of sin/cos/tan are interpreted.
///
/// Parses from and prints as the lowercase wire strings
/// "radians" | "degrees" | "gradians".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
    Gradians,
}

impl AngleUnit {
    /// Radians contained in one unit of this angle measure.
    pub fn radians_per_unit(&self) -> f64 {
        match self {
            AngleUnit::Radians => 1.0,
            AngleUnit::Degrees => PI / 180.0,
            AngleUnit::Gradians => PI / 200.0,
        }
    }

    /// Converts an angle value between units (through radians).
    pub fn convert(value: f64, from: AngleUnit, to: AngleUnit) -> f64 {
        if from == to {
            return value;
        }
        value * from.radians_per_unit() / to.radians_per_unit()
    }
}

/// Symbolic expression tree over a single real variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (the calculator grammar defines only "x")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Base-10 logarithm: log(x)
    Log10(Box<Expr>),
    /// Square root: sqrt(x)
    Sqrt(Box<Expr>),
    /// Absolute value: abs(x)
    Abs(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x) - uses mathematical notation 'tg'
    tg(Box<Expr>),
}

/// Display implementation printing the calculator's input grammar, with
/// parentheses for proper precedence. `tg` prints as "tan", `Log10` as "log".
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::Log10(expr) => write!(f, "log({})", expr),
            Expr::Sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::Abs(expr) => write!(f, "abs({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tan({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Log10(expr)
            | Expr::Sqrt(expr)
            | Expr::Abs(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr) => expr.contains_variable(var_name),
        }
    }

    /// Collects the names of all variables appearing in the expression,
    /// sorted and deduplicated. A well-formed calculator expression yields
    /// either an empty vector (constant) or exactly `["x"]`.
    pub fn extract_variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names.sort();
        names.dedup();
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expr::Var(name) => names.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Log10(expr)
            | Expr::Sqrt(expr)
            | Expr::Abs(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr) => expr.collect_variables(names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_angle_unit_from_str() {
        assert_eq!(AngleUnit::from_str("radians").unwrap(), AngleUnit::Radians);
        assert_eq!(AngleUnit::from_str("degrees").unwrap(), AngleUnit::Degrees);
        assert_eq!(
            AngleUnit::from_str("gradians").unwrap(),
            AngleUnit::Gradians
        );
        assert!(AngleUnit::from_str("turns").is_err());
    }

    #[test]
    fn test_angle_unit_factors() {
        assert_eq!(AngleUnit::Radians.radians_per_unit(), 1.0);
        assert_eq!(AngleUnit::Degrees.radians_per_unit(), PI / 180.0);
        assert_eq!(AngleUnit::Gradians.radians_per_unit(), PI / 200.0);
    }

    #[test]
    fn test_angle_conversion() {
        use approx::assert_relative_eq;
        let rad = AngleUnit::convert(180.0, AngleUnit::Degrees, AngleUnit::Radians);
        assert_relative_eq!(rad, PI);
        let grad = AngleUnit::convert(90.0, AngleUnit::Degrees, AngleUnit::Gradians);
        assert_relative_eq!(grad, 100.0);
        // round trip
        let back = AngleUnit::convert(grad, AngleUnit::Gradians, AngleUnit::Degrees);
        assert_relative_eq!(back, 90.0);
        assert_eq!(
            AngleUnit::convert(1.5, AngleUnit::Radians, AngleUnit::Radians),
            1.5
        );
    }

    #[test]
    fn test_display_grammar_names() {
        let x = Expr::Var("x".to_string());
        let e = Expr::tg(Box::new(Expr::Log10(Box::new(x))));
        assert_eq!(format!("{}", e), "tan(log(x))");
    }

    #[test]
    fn test_contains_and_extract_variables() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone() * x.clone() + Expr::Const(1.0);
        assert!(expr.contains_variable("x"));
        assert!(!expr.contains_variable("y"));
        assert_eq!(expr.extract_variables(), vec!["x".to_string()]);
        assert!(Expr::Const(2.0).extract_variables().is_empty());
    }

    #[test]
    fn test_ops_overloads() {
        let x = Expr::Var("x".to_string());
        let expr = x.clone().pow(Expr::Const(2.0)) - Expr::Const(4.0);
        assert_eq!(
            expr,
            Expr::Sub(
                Box::new(Expr::Pow(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Const(2.0))
                )),
                Box::new(Expr::Const(4.0))
            )
        );
    }
}
