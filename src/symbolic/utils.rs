// the collection of utility functions mainly for bracket parsing and proceeding

/// Finds the byte position of the rightmost occurrence of any of the given
/// operator characters at bracket depth zero. Splitting at the rightmost
/// `+`/`-` (and `*`/`/`) keeps those operators left-associative.
///
/// Byte positions, not char counts: the parser slices the input at the
/// returned position, and the two differ whenever a multi-byte character
/// (a stray `π`, say) precedes the operator.
pub fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let mut bracket_depth = 0i32;
    let mut last_op = None;

    for (i, c) in input.char_indices() {
        match c {
            '(' => bracket_depth += 1,
            ')' => bracket_depth -= 1,
            _ if bracket_depth == 0 && operators.contains(&c) => {
                last_op = Some((i, c));
            }
            _ => {}
        }
    }

    last_op
}

/// Finds the byte position of the first occurrence of the given char at
/// bracket depth zero. Used for `^`, which associates to the right.
pub fn find_char_positions_outside_brackets(s: &str, c: char) -> Option<usize> {
    let mut depth = 0i32;
    for (i, ch) in s.char_indices() {
        if ch == '(' {
            depth += 1;
        } else if ch == ')' {
            depth -= 1;
        } else if ch == c && depth == 0 {
            return Some(i);
        }
    }
    None
}

/// Finds the byte position of the closing bracket matching the first `(`
/// in the input, or None if the brackets never balance out.
pub fn find_pair_to_this_bracket(input: &str) -> Option<usize> {
    let mut stack = 0i32;
    for (i, c) in input.char_indices() {
        if c == '(' {
            stack += 1;
        } else if c == ')' {
            stack -= 1;
            if stack == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Appends missing `)` characters when the input has more `(` than `)`.
/// This is the calculator's forgiving-input policy: "sin(x" is accepted as
/// "sin(x)". Excess closing brackets are left alone and fail in the parser.
pub fn balance_brackets(input: &str) -> String {
    let open = input.chars().filter(|&c| c == '(').count();
    let close = input.chars().filter(|&c| c == ')').count();
    if open > close {
        let mut balanced = input.to_string();
        balanced.extend(std::iter::repeat(')').take(open - close));
        balanced
    } else {
        input.to_string()
    }
}

pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    // fewer than two points has no well-defined step
    if num_values == 0 {
        return Vec::new();
    }
    if num_values == 1 {
        return vec![start];
    }
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);

    for i in 0..num_values {
        let value = start + (i as f64 * step);
        values.push(value);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rightmost_operator() {
        assert_eq!(
            find_rightmost_operator_outside_brackets("3-4-5", &['+', '-']),
            Some((3, '-'))
        );
        assert_eq!(
            find_rightmost_operator_outside_brackets("sin(x+1)", &['+', '-']),
            None
        );
        assert_eq!(
            find_rightmost_operator_outside_brackets("(a+b)*c", &['*', '/']),
            Some((5, '*'))
        );
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        // 'π' occupies two bytes, so '+' sits at byte 2 and slicing at the
        // returned position stays on a char boundary
        assert_eq!(
            find_rightmost_operator_outside_brackets("π+1", &['+', '-']),
            Some((2, '+'))
        );
        assert_eq!(find_char_positions_outside_brackets("π^2", '^'), Some(2));
        assert_eq!(find_pair_to_this_bracket("(π)"), Some(3));
    }

    #[test]
    fn test_first_char_outside_brackets() {
        assert_eq!(find_char_positions_outside_brackets("2^3^2", '^'), Some(1));
        assert_eq!(find_char_positions_outside_brackets("(2^3)*2", '^'), None);
    }

    #[test]
    fn test_find_pair_to_this_bracket() {
        assert_eq!(find_pair_to_this_bracket("sin(cos(x))"), Some(10));
        assert_eq!(find_pair_to_this_bracket("(x+1"), None);
    }

    #[test]
    fn test_balance_brackets() {
        assert_eq!(balance_brackets("sin(x"), "sin(x)");
        assert_eq!(balance_brackets("((x+1"), "((x+1))");
        assert_eq!(balance_brackets("x+1"), "x+1");
        // excess close brackets are not repaired
        assert_eq!(balance_brackets("x+1)"), "x+1)");
    }

    #[test]
    fn test_linspace() {
        let values = linspace(0.0, 1.0, 5);
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        // a single sample sits at the start of the interval, never NaN
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
    }
}
