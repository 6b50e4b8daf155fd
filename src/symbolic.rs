/// symbolic expressions of the calculator grammar: the Expr enum, angle
/// units and operator overloads
pub mod symbolic_engine;

/// parsing a String into a symbolic expression
pub mod parse_expr;

/// turning a symbolic expression into a native Rust closure and evaluating it
pub mod symbolic_eval;

/// small helpers: bracket search, bracket balancing, linspace
pub mod utils;
