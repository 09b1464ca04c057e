//! Conversion edges

use std::fmt;
use xiny_core::{ConversionFn, Unit};

/// A directed edge between two named nodes
pub trait Edge {
    fn source(&self) -> &str;
    fn target(&self) -> &str;
}

/// A registered one-way conversion from one unit to another
///
/// Graph resolution identifies a conversion only by the names of its two
/// units, never by the unit structs themselves.
#[derive(Clone)]
pub struct Conversion {
    from: Unit,
    to: Unit,
    func: ConversionFn,
    /// Source text, for conversions compiled from a formula
    formula: Option<String>,
}

impl Conversion {
    pub fn new(from: Unit, to: Unit, func: ConversionFn) -> Self {
        Conversion { from, to, func, formula: None }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn from(&self) -> &Unit {
        &self.from
    }

    pub fn to(&self) -> &Unit {
        &self.to
    }

    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }

    pub fn apply(&self, x: f64) -> f64 {
        (self.func)(x)
    }
}

impl Edge for Conversion {
    fn source(&self) -> &str {
        &self.from.name
    }

    fn target(&self) -> &str {
        &self.to.name
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversion")
            .field("from", &self.from.name)
            .field("to", &self.to.name)
            .field("formula", &self.formula)
            .finish()
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.name, self.to.name)?;
        if let Some(ref formula) = self.formula {
            write!(f, " ({})", formula)?;
        }
        Ok(())
    }
}
