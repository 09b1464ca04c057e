//! Conversion functions and the formula compiler capability

use std::sync::Arc;
use crate::ConversionError;

/// A pure numeric transform applied along one conversion edge
pub type ConversionFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Compiles formula text over the free variable `x` into a [`ConversionFn`]
///
/// Compilation happens once, at registration time. Any syntax or naming
/// problem must be reported here as [`ConversionError::FormulaCompile`] so
/// the returned function itself never fails.
pub trait FormulaCompiler: Send + Sync {
    fn compile(&self, formula: &str) -> Result<ConversionFn, ConversionError>;
}

/// Scale by a constant factor
pub fn ratio_fn(ratio: f64) -> ConversionFn {
    Arc::new(move |x| x * ratio)
}

/// Divide by a constant factor (the inverse of [`ratio_fn`])
pub fn inverse_ratio_fn(ratio: f64) -> ConversionFn {
    Arc::new(move |x| x / ratio)
}
