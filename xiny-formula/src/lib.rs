//! xiny Formula - conversion formulas over one variable
//!
//! Compiles text such as `x * 1.8 + 32` into a [`ConversionFn`]. This is the
//! default [`FormulaCompiler`]; any other implementation of that trait can be
//! handed to a quantity instead.

mod ast;
mod error;
mod eval;
mod parser;

pub use ast::{BinOp, Expr, UnaryOp};
pub use error::FormulaError;
pub use eval::VARIABLE;
pub use parser::parse_expr;

use std::fmt;
use std::sync::Arc;
use xiny_core::{ConversionError, ConversionFn, FormulaCompiler};

/// A parsed and resolved formula
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parse `source` and check every name it uses
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let expr = eval::resolve(parser::parse_expr(source)?)?;
        Ok(Formula {
            source: source.trim().to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate with the free variable bound to `x`
    pub fn eval(&self, x: f64) -> f64 {
        eval::eval_expr(&self.expr, x)
    }

    pub fn into_fn(self) -> ConversionFn {
        Arc::new(move |x| self.eval(x))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The default formula compiler
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprCompiler;

impl FormulaCompiler for ExprCompiler {
    fn compile(&self, formula: &str) -> Result<ConversionFn, ConversionError> {
        match Formula::parse(formula) {
            Ok(f) => {
                tracing::trace!(formula = f.source(), "compiled formula");
                Ok(f.into_fn())
            }
            Err(e) => Err(ConversionError::formula_compile(formula, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_eval() {
        let f = Formula::parse("  x * 0.001 ").unwrap();
        assert_eq!(f.source(), "x * 0.001");
        assert_eq!(f.eval(2500.0), 2.5);
        assert_eq!(f.to_string(), "x * 0.001");
    }

    #[test]
    fn test_compiler_produces_fn() {
        let f = ExprCompiler.compile("(x - 32) * 5 / 9").unwrap();
        assert_eq!(f(212.0), 100.0);
        assert_eq!(f(32.0), 0.0);
    }

    #[test]
    fn test_compiler_reports_formula() {
        let err = ExprCompiler.compile("x * ").err().unwrap();
        match err {
            ConversionError::FormulaCompile { formula, reason } => {
                assert_eq!(formula, "x * ");
                assert!(reason.contains("syntax error"), "reason: {}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_compiler_rejects_unknown_names() {
        assert!(ExprCompiler.compile("y + 1").is_err());
        assert!(ExprCompiler.compile("floor(x)").is_err());
    }
}
