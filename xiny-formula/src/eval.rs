//! Formula resolution and evaluation
//!
//! Resolution runs once at compile time: named constants are folded in and
//! every variable and function is checked, so evaluation afterwards is
//! plain `f64` arithmetic that cannot fail.

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::FormulaError;

/// The free variable holding the input value
pub const VARIABLE: &str = "x";

/// Expected argument count for a built-in function
fn arity(name: &str) -> Option<usize> {
    match name {
        "sqrt" | "abs" | "ln" | "log10" | "exp" => Some(1),
        "pow" | "min" | "max" => Some(2),
        _ => None,
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

/// Check names and fold constants
pub fn resolve(expr: Expr) -> Result<Expr, FormulaError> {
    match expr {
        Expr::Number(_) => Ok(expr),

        Expr::Variable(name) => {
            if name == VARIABLE {
                Ok(Expr::Variable(name))
            } else if let Some(value) = constant(&name) {
                Ok(Expr::Number(value))
            } else {
                Err(FormulaError::UnknownVariable(name))
            }
        }

        Expr::BinaryOp(left, op, right) => Ok(Expr::BinaryOp(
            Box::new(resolve(*left)?),
            op,
            Box::new(resolve(*right)?),
        )),

        Expr::UnaryOp(op, inner) => Ok(Expr::UnaryOp(op, Box::new(resolve(*inner)?))),

        Expr::FunctionCall(name, args) => {
            let expected = arity(&name).ok_or_else(|| FormulaError::UnknownFunction(name.clone()))?;
            if args.len() != expected {
                return Err(FormulaError::ArgCount { func: name, expected, got: args.len() });
            }
            let args = args.into_iter()
                .map(resolve)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::FunctionCall(name, args))
        }
    }
}

/// Evaluate a resolved expression for one input value
pub fn eval_expr(expr: &Expr, x: f64) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Variable(_) => x,
        Expr::BinaryOp(left, op, right) => {
            eval_binary_op(eval_expr(left, x), *op, eval_expr(right, x))
        }
        Expr::UnaryOp(op, inner) => eval_unary_op(*op, eval_expr(inner, x)),
        Expr::FunctionCall(name, args) => {
            let args: Vec<f64> = args.iter().map(|a| eval_expr(a, x)).collect();
            call_function(name, &args)
        }
    }
}

fn eval_binary_op(l: f64, op: BinOp, r: f64) -> f64 {
    match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Div => l / r,
        BinOp::Rem => l % r,
        BinOp::Pow => l.powf(r),
    }
}

fn eval_unary_op(op: UnaryOp, v: f64) -> f64 {
    match op {
        UnaryOp::Neg => -v,
    }
}

// Arity was checked by `resolve`
fn call_function(name: &str, args: &[f64]) -> f64 {
    match (name, args) {
        ("sqrt", [a]) => a.sqrt(),
        ("abs", [a]) => a.abs(),
        ("ln", [a]) => a.ln(),
        ("log10", [a]) => a.log10(),
        ("exp", [a]) => a.exp(),
        ("pow", [a, b]) => a.powf(*b),
        ("min", [a, b]) => a.min(*b),
        ("max", [a, b]) => a.max(*b),
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn eval(src: &str, x: f64) -> f64 {
        let expr = resolve(parse_expr(src).unwrap()).unwrap();
        eval_expr(&expr, x)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("x * 1.8 + 32", 100.0), 212.0);
        assert_eq!(eval("(x - 32) / 1.8", 212.0), 100.0);
        assert_eq!(eval("x + 273.15", 0.0), 273.15);
        assert_eq!(eval("x % 360", 370.0), 10.0);
        assert_eq!(eval("-x ^ 2", 3.0), -9.0);
        assert_eq!(eval("2 ^ 3 ^ 2", 0.0), 512.0);
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval("pi * x", 1.0), std::f64::consts::PI);
        assert_eq!(eval("e", 0.0), std::f64::consts::E);
    }

    #[test]
    fn test_functions() {
        assert_eq!(eval("sqrt(x)", 16.0), 4.0);
        assert_eq!(eval("abs(x)", -2.5), 2.5);
        assert_eq!(eval("pow(x, 3)", 2.0), 8.0);
        assert_eq!(eval("max(min(x, 10), 0)", 42.0), 10.0);
        assert!((eval("log10(x)", 1000.0) - 3.0).abs() < 1e-12);
        assert!((eval("ln(exp(x))", 1.25) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_variable() {
        let err = resolve(parse_expr("y * 2").unwrap()).unwrap_err();
        assert_eq!(err, FormulaError::UnknownVariable("y".to_string()));
    }

    #[test]
    fn test_unknown_function() {
        let err = resolve(parse_expr("cbrt(x)").unwrap()).unwrap_err();
        assert_eq!(err, FormulaError::UnknownFunction("cbrt".to_string()));
    }

    #[test]
    fn test_arg_count() {
        let err = resolve(parse_expr("pow(x)").unwrap()).unwrap_err();
        assert_eq!(err, FormulaError::ArgCount { func: "pow".to_string(), expected: 2, got: 1 });
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert!(eval("x / 0", 1.0).is_infinite());
    }
}
