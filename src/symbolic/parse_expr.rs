//! a module turns a String expression into a symbolic expression
//!
//! Grammar of the calculator: decimal literals, the variable `x`, the
//! constants `pi` and `e`, operators `+ - * / ^`, parentheses, unary minus,
//! and the functions `sin cos tan ln log sqrt abs exp`, each followed by a
//! parenthesized argument.
//!
//! The parser splits the input recursively at the top-level operator of
//! lowest precedence: `+`/`-` at their rightmost occurrence outside
//! brackets, then `*`/`/` (also rightmost, so chains associate left), then
//! `^` at its leftmost occurrence (so towers associate right), then function
//! calls, bracketed groups, and finally atoms. `pi` and `e` are resolved to
//! numeric constants here, at the AST level, so identifiers containing those
//! letters as substrings can never collide with them. Unknown identifiers
//! parse to `Var` and are rejected when the expression is evaluated.
//
//                  search recursion diagram
//                "x^2+exp(x)-log(x)/2"             |
//                |       left  | right             |
//                |_________________________________|
//                |       div by rightmost -        |
//                |_________________________________|
//                | x^2+exp(x)  |  log(x)/2         |
//                |     |       |      |            |
//                |    \|/      |      |            |
//                |  div by +   |      |            |
//                |_____________|_____\|/___________|
//                | x^2 |exp(x) |  div by /         |
//                |  .. |  ..   |  log(x) | 2       |
//                  etc...

use crate::symbolic::symbolic_engine::{Expr, InvalidExpression};
use crate::symbolic::utils::{
    balance_brackets, find_char_positions_outside_brackets, find_pair_to_this_bracket,
    find_rightmost_operator_outside_brackets,
};
use std::f64::consts::{E, PI};

/// Named functions of the grammar mapped onto their AST constructors.
/// `tan` is the grammar's spelling, `tg` is accepted as an alias.
const FUNCTIONS: [(&str, fn(Box<Expr>) -> Expr); 9] = [
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tan", Expr::tg),
    ("tg", Expr::tg),
    ("ln", Expr::Ln),
    ("log", Expr::Log10),
    ("sqrt", Expr::Sqrt),
    ("abs", Expr::Abs),
    ("exp", Expr::Exp),
];

impl Expr {
    /// Parses an infix expression string into a symbolic expression.
    pub fn parse_expression(input: &str) -> Result<Expr, InvalidExpression> {
        parse_expression_func(input)
    }

    /// Parses user input with the calculator's forgiving bracket policy:
    /// missing closing brackets are appended before parsing, so "sin(x"
    /// is accepted as "sin(x)". Unopened closing brackets still fail.
    pub fn parse_expression_forgiving(input: &str) -> Result<Expr, InvalidExpression> {
        parse_expression_func(&balance_brackets(input))
    }
}

pub fn parse_expression_func(input: &str) -> Result<Expr, InvalidExpression> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InvalidExpression::new("empty expression"));
    }

    // Handling addition and subtraction
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();

        // Handle unary sign
        if left.is_empty() {
            return if op == '-' {
                Ok(-parse_expression_func(right)?)
            } else {
                parse_expression_func(right)
            };
        }

        return match op {
            '+' => Ok(Expr::Add(
                Box::new(parse_expression_func(left)?),
                Box::new(parse_expression_func(right)?),
            )),
            '-' => Ok(Expr::Sub(
                Box::new(parse_expression_func(left)?),
                Box::new(parse_expression_func(right)?),
            )),
            _ => unreachable!(),
        };
    }

    // Handling multiplication and division; rightmost split keeps a/b/c
    // associating to the left
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        if left.is_empty() || right.is_empty() {
            return Err(InvalidExpression::new(format!(
                "operator '{}' is missing an operand in '{}'",
                op, input
            )));
        }
        return match op {
            '*' => Ok(Expr::Mul(
                Box::new(parse_expression_func(left)?),
                Box::new(parse_expression_func(right)?),
            )),
            '/' => Ok(Expr::Div(
                Box::new(parse_expression_func(left)?),
                Box::new(parse_expression_func(right)?),
            )),
            _ => unreachable!(),
        };
    }

    // Handling exponentiation; leftmost split keeps 2^3^2 associating to
    // the right
    if let Some(pos) = find_char_positions_outside_brackets(input, '^') {
        let base = input[..pos].trim();
        let exponent = input[pos + 1..].trim();
        if base.is_empty() || exponent.is_empty() {
            return Err(InvalidExpression::new(format!(
                "operator '^' is missing an operand in '{}'",
                input
            )));
        }
        return Ok(Expr::Pow(
            Box::new(parse_expression_func(base)?),
            Box::new(parse_expression_func(exponent)?),
        ));
    }

    // Handling function calls: the whole fragment must be name(argument)
    for (name, constructor) in FUNCTIONS {
        if let Some(rest) = input.strip_prefix(name) {
            if rest.starts_with('(') {
                let bracket_end = find_pair_to_this_bracket(rest).ok_or_else(|| {
                    InvalidExpression::new(format!("unmatched bracket in '{}'", input))
                })?;
                if bracket_end != rest.len() - 1 {
                    return Err(InvalidExpression::new(format!(
                        "unexpected characters after '{}' call in '{}'",
                        name, input
                    )));
                }
                let inner = &rest[1..bracket_end];
                return Ok(constructor(Box::new(parse_expression_func(inner)?)));
            }
        }
    }

    // Handling a fragment that is all in brackets
    if input.starts_with('(') {
        let bracket_end = find_pair_to_this_bracket(input)
            .ok_or_else(|| InvalidExpression::new(format!("unmatched bracket in '{}'", input)))?;
        if bracket_end != input.len() - 1 {
            return Err(InvalidExpression::new(format!(
                "unexpected characters after bracketed group in '{}'",
                input
            )));
        }
        return parse_expression_func(&input[1..bracket_end]);
    }

    // Handling constants and variables
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }
    let mut chars = input.chars();
    let first_is_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if first_is_alpha && input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(match input {
            "pi" => Expr::Const(PI),
            "e" => Expr::Const(E),
            name => Expr::Var(name.to_string()),
        });
    }

    Err(InvalidExpression::new(format!(
        "unrecognized expression fragment '{}'",
        input
    )))
}
