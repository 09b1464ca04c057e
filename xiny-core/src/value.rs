//! Units and the values tagged with them

use std::fmt;
use serde::{Deserialize, Serialize};

/// A unit of measurement within a quantity
///
/// A unit is nothing more than its full name and its symbol. Neither is
/// validated: empty strings and duplicates are accepted, and lookup picks
/// the first match in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Unit {
    /// The unit name (e.g., "meter", "kilogram")
    pub name: String,
    /// The unit symbol (e.g., "m", "kg")
    pub symbol: String,
}

impl Unit {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Unit {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// True if `token` equals either the name or the symbol
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.symbol == token
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A magnitude tagged with the unit it is expressed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub val: f64,
    pub unit: Unit,
}

impl Value {
    pub fn new(val: f64, unit: Unit) -> Self {
        Value { val, unit }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.val)
        } else {
            write!(f, "{} {}", self.val, self.unit.symbol)
        }
    }
}
