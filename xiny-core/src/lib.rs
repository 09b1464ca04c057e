//! xiny Core - Fundamental types
//!
//! This crate provides the core types shared by the xiny crates:
//! - `Unit` / `Value`: a unit identifier and a magnitude tagged with one
//! - `ConversionFn` / `FormulaCompiler`: numeric transforms and their producers
//! - `FmtOptions` / `ValueFormatter`: pluggable value rendering
//! - `ConversionError`: lookup, registration and conversion failures

mod value;
mod format;
mod formula;
mod error;

pub use value::{Unit, Value};
pub use format::{FmtOptions, ValueFormatter, default_format, default_formatter};
pub use formula::{ConversionFn, FormulaCompiler, ratio_fn, inverse_ratio_fn};
pub use error::{ConversionError, codes};

