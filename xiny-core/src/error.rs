//! Conversion errors
//!
//! Lookup and conversion failures are plain values returned to the caller.
//! Each variant carries a stable machine-readable code and, where useful,
//! a hint for fixing the problem.

use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_NOT_FOUND: &str = "UNIT_NOT_FOUND";
    pub const CONVERSION_NOT_FOUND: &str = "CONVERSION_NOT_FOUND";
    pub const FORMULA_COMPILE: &str = "FORMULA_COMPILE";
    pub const QUANTITY_NOT_FOUND: &str = "QUANTITY_NOT_FOUND";
    pub const INVALID_QUERY: &str = "INVALID_QUERY";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Error type for unit lookup, registration and conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unit \"{0}\" not found")]
    UnitNotFound(String),

    #[error("no conversion path from {from} to {to}")]
    ConversionNotFound { from: String, to: String },

    #[error("cannot compile formula \"{formula}\": {reason}")]
    FormulaCompile { formula: String, reason: String },

    #[error("quantity \"{0}\" not found")]
    QuantityNotFound(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConversionError {
    pub fn conversion_not_found(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::ConversionNotFound { from: from.into(), to: to.into() }
    }

    pub fn formula_compile(formula: impl Into<String>, reason: impl ToString) -> Self {
        Self::FormulaCompile { formula: formula.into(), reason: reason.to_string() }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnitNotFound(_) => codes::UNIT_NOT_FOUND,
            Self::ConversionNotFound { .. } => codes::CONVERSION_NOT_FOUND,
            Self::FormulaCompile { .. } => codes::FORMULA_COMPILE,
            Self::QuantityNotFound(_) => codes::QUANTITY_NOT_FOUND,
            Self::InvalidQuery(_) => codes::INVALID_QUERY,
            Self::Internal(_) => codes::INTERNAL,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnitNotFound(token) => {
                Some(format!("Register '{}' or check the spelling of the name or symbol", token))
            }
            Self::ConversionNotFound { from, to } if from == to => {
                Some(format!("Register an explicit {} -> {} conversion", from, to))
            }
            Self::ConversionNotFound { .. } => {
                Some("Register a conversion chain connecting both units".to_string())
            }
            Self::FormulaCompile { .. } => Some("Check formula syntax; use 'x' for the input value".to_string()),
            Self::InvalidQuery(_) => Some("Use the form '<value> <unit> in <unit>'".to_string()),
            Self::QuantityNotFound(_) => None,
            Self::Internal(_) => Some("This is a bug, please report it".to_string()),
        }
    }
}
