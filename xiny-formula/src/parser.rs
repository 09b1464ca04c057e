//! Formula parser
//!
//! Each precedence level scans its input for an operator that sits outside
//! any parentheses and splits there, handing both halves to the next level.
//! Levels, lowest first: `+ -`, `* / %`, unary sign, `^`, primary.

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::FormulaError;

/// Parse formula text into an expression tree
pub fn parse_expr(input: &str) -> Result<Expr, FormulaError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FormulaError::Empty);
    }
    check_balanced(input)?;
    parse_additive(input)
}

fn check_balanced(input: &str) -> Result<(), FormulaError> {
    let mut depth = 0i32;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(FormulaError::UnbalancedParens);
                }
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(FormulaError::UnbalancedParens)
    }
}

fn syntax(input: &str) -> FormulaError {
    FormulaError::Syntax(input.trim().to_string())
}

fn parse_additive(input: &str) -> Result<Expr, FormulaError> {
    let input = input.trim();
    let mut paren_depth = 0;

    // Collect (byte_offset, char) pairs to handle multi-byte UTF-8 correctly
    let char_indices: Vec<(usize, char)> = input.char_indices().collect();

    // Rightmost operator first so the tree is left associative
    for idx in (0..char_indices.len()).rev() {
        let (byte_pos, c) = char_indices[idx];
        match c {
            ')' => paren_depth += 1,
            '(' => paren_depth -= 1,
            '+' | '-' if paren_depth == 0 && is_binary_sign(&char_indices, idx) => {
                let left = input[..byte_pos].trim();
                let right = input[byte_pos + c.len_utf8()..].trim();
                if right.is_empty() {
                    return Err(syntax(input));
                }
                let op = if c == '+' { BinOp::Add } else { BinOp::Sub };
                return Ok(Expr::BinaryOp(
                    Box::new(parse_additive(left)?),
                    op,
                    Box::new(parse_multiplicative(right)?),
                ));
            }
            _ => {}
        }
    }

    parse_multiplicative(input)
}

/// A sign is binary when an operand ends right before it
fn is_binary_sign(chars: &[(usize, char)], idx: usize) -> bool {
    let prev = (0..idx).rev().find(|&i| !chars[i].1.is_whitespace());
    let Some(prev) = prev else {
        return false;
    };

    match chars[prev].1 {
        '+' | '-' | '*' | '/' | '%' | '^' | '(' | ',' => false,
        'e' | 'E' if prev + 1 == idx && is_exponent_marker(chars, prev) => false,
        _ => true,
    }
}

/// True for the `e` in a literal like `1.5e-3`
fn is_exponent_marker(chars: &[(usize, char)], idx: usize) -> bool {
    let mut start = idx;
    let mut digits = 0;
    while start > 0 {
        let c = chars[start - 1].1;
        if c.is_ascii_digit() {
            digits += 1;
        } else if c != '.' {
            break;
        }
        start -= 1;
    }
    if digits == 0 {
        return false;
    }
    start == 0 || !is_ident_char(chars[start - 1].1)
}

fn parse_multiplicative(input: &str) -> Result<Expr, FormulaError> {
    let input = input.trim();
    let mut paren_depth = 0;
    let char_indices: Vec<(usize, char)> = input.char_indices().collect();

    for idx in (0..char_indices.len()).rev() {
        let (byte_pos, c) = char_indices[idx];
        match c {
            ')' => paren_depth += 1,
            '(' => paren_depth -= 1,
            '*' | '/' | '%' if paren_depth == 0 => {
                let left = input[..byte_pos].trim();
                let right = input[byte_pos + c.len_utf8()..].trim();
                if left.is_empty() || right.is_empty() {
                    return Err(syntax(input));
                }
                let op = match c {
                    '*' => BinOp::Mul,
                    '/' => BinOp::Div,
                    _ => BinOp::Rem,
                };
                return Ok(Expr::BinaryOp(
                    Box::new(parse_multiplicative(left)?),
                    op,
                    Box::new(parse_unary(right)?),
                ));
            }
            _ => {}
        }
    }

    parse_unary(input)
}

fn parse_unary(input: &str) -> Result<Expr, FormulaError> {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix('-') {
        return Ok(Expr::UnaryOp(UnaryOp::Neg, Box::new(parse_unary(rest)?)));
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_unary(rest);
    }
    parse_power(input)
}

fn parse_power(input: &str) -> Result<Expr, FormulaError> {
    let mut paren_depth = 0;

    // Leftmost operator first so the tree is right associative
    for (byte_pos, c) in input.char_indices() {
        match c {
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            '^' if paren_depth == 0 => {
                let left = input[..byte_pos].trim();
                let right = input[byte_pos + c.len_utf8()..].trim();
                if left.is_empty() || right.is_empty() {
                    return Err(syntax(input));
                }
                return Ok(Expr::BinaryOp(
                    Box::new(parse_primary(left)?),
                    BinOp::Pow,
                    Box::new(parse_unary(right)?),
                ));
            }
            _ => {}
        }
    }

    parse_primary(input)
}

fn parse_primary(input: &str) -> Result<Expr, FormulaError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(syntax(input));
    }

    if let Some(open) = input.find('(') {
        if matching_close(input, open) != Some(input.len() - 1) {
            return Err(syntax(input));
        }
        let inner = &input[open + 1..input.len() - 1];

        // Parentheses
        if open == 0 {
            if inner.trim().is_empty() {
                return Err(syntax(input));
            }
            return parse_additive(inner);
        }

        // Function call
        let func_name = input[..open].trim();
        if !is_identifier(func_name) {
            return Err(syntax(input));
        }
        let args = parse_args(inner)?;
        return Ok(Expr::FunctionCall(func_name.to_lowercase(), args));
    }

    // Number
    if input.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return input.parse::<f64>()
            .map(Expr::Number)
            .map_err(|_| syntax(input));
    }

    if is_identifier(input) {
        return Ok(Expr::Variable(input.to_string()));
    }

    Err(syntax(input))
}

/// Byte offset of the `)` matching the `(` at `open`
fn matching_close(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_args(input: &str) -> Result<Vec<Expr>, FormulaError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut paren_depth = 0;
    let mut current_start = 0;

    for (byte_pos, c) in input.char_indices() {
        match c {
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            ',' if paren_depth == 0 => {
                args.push(parse_arg(&input[current_start..byte_pos])?);
                current_start = byte_pos + c.len_utf8();
            }
            _ => {}
        }
    }

    args.push(parse_arg(&input[current_start..])?);
    Ok(args)
}

fn parse_arg(input: &str) -> Result<Expr, FormulaError> {
    if input.trim().is_empty() {
        return Err(syntax(input));
    }
    parse_additive(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') && s.chars().all(is_ident_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    fn x() -> Box<Expr> {
        Box::new(Expr::Variable("x".to_string()))
    }

    #[test]
    fn test_ratio_formula() {
        let expr = parse_expr("x * 0.001").unwrap();
        assert_eq!(expr, Expr::BinaryOp(x(), BinOp::Mul, num(0.001)));
    }

    #[test]
    fn test_precedence() {
        let expr = parse_expr("x * 1.8 + 32").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::BinaryOp(x(), BinOp::Mul, num(1.8))),
                BinOp::Add,
                num(32.0),
            )
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        // (x - 1) - 2, not x - (1 - 2)
        let expr = parse_expr("x - 1 - 2").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::BinaryOp(x(), BinOp::Sub, num(1.0))),
                BinOp::Sub,
                num(2.0),
            )
        );
    }

    #[test]
    fn test_right_associative_power() {
        let expr = parse_expr("2 ^ 3 ^ 2").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                num(2.0),
                BinOp::Pow,
                Box::new(Expr::BinaryOp(num(3.0), BinOp::Pow, num(2.0))),
            )
        );
    }

    #[test]
    fn test_unary_minus() {
        let expr = parse_expr("x * -1").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(x(), BinOp::Mul, Box::new(Expr::UnaryOp(UnaryOp::Neg, num(1.0))))
        );

        let expr = parse_expr("x - -1").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(x(), BinOp::Sub, Box::new(Expr::UnaryOp(UnaryOp::Neg, num(1.0))))
        );
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_expr("1.5e-3").unwrap(), Expr::Number(1.5e-3));
        assert_eq!(
            parse_expr("x * 2E+2").unwrap(),
            Expr::BinaryOp(x(), BinOp::Mul, num(200.0))
        );
    }

    #[test]
    fn test_parentheses() {
        let expr = parse_expr("(x - 32) / 1.8").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::BinaryOp(x(), BinOp::Sub, num(32.0))),
                BinOp::Div,
                num(1.8),
            )
        );
    }

    #[test]
    fn test_function_call() {
        let expr = parse_expr("POW(x, 2) + sqrt(x)").unwrap();
        assert_eq!(
            expr,
            Expr::BinaryOp(
                Box::new(Expr::FunctionCall("pow".to_string(), vec![*x(), Expr::Number(2.0)])),
                BinOp::Add,
                Box::new(Expr::FunctionCall("sqrt".to_string(), vec![*x()])),
            )
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_expr("   "), Err(FormulaError::Empty));
        assert_eq!(parse_expr("(x + 1"), Err(FormulaError::UnbalancedParens));
        assert_eq!(parse_expr("x + 1)"), Err(FormulaError::UnbalancedParens));
        assert!(matches!(parse_expr("x *"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_expr("x +"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_expr("()"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_expr("2x"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_expr("x $ 2"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_expr("(x)(x)"), Err(FormulaError::Syntax(_))));
        assert!(matches!(parse_expr("max(x,)"), Err(FormulaError::Syntax(_))));
    }
}
