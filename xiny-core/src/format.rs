//! Value formatting
//!
//! Every quantity carries a [`ValueFormatter`]. The conversion engine never
//! looks inside it; it only hands it a value and the caller's options.

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::Value;

/// Options controlling how a value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FmtOptions {
    /// Use the unit symbol instead of its full name
    pub short: bool,
    /// Decimal places to render
    pub precision: usize,
}

impl FmtOptions {
    pub fn new(short: bool, precision: usize) -> Self {
        FmtOptions { short, precision }
    }
}

/// Creates human-readable strings for a value
pub type ValueFormatter = Arc<dyn Fn(&Value, &FmtOptions) -> String + Send + Sync>;

/// Render as `"<val> <label>"`
///
/// Full names are pluralized with a trailing `s` when the value is above
/// one; symbols never are.
pub fn default_format(v: &Value, opts: &FmtOptions) -> String {
    let label = if opts.short {
        v.unit.symbol.clone()
    } else if v.val > 1.0 {
        format!("{}s", v.unit.name)
    } else {
        v.unit.name.clone()
    };

    format!("{:.*} {}", opts.precision, v.val, label)
}

/// The default formatter as a shareable [`ValueFormatter`]
pub fn default_formatter() -> ValueFormatter {
    Arc::new(default_format)
}
