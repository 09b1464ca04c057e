//! Quantity - a family of units and the conversions between them

use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use xiny_core::{
    default_formatter, inverse_ratio_fn, ratio_fn, ConversionError, ConversionFn, FmtOptions,
    FormulaCompiler, Unit, Value, ValueFormatter,
};
use xiny_formula::ExprCompiler;
use crate::conversion::Conversion;
use crate::graph::ConversionGraph;

/// A named family of units, e.g. "length", with its registered conversions
///
/// Conversions between any two units are discovered by chaining registered
/// conversions. The search runs over the live conversion list on every
/// call, so registering a conversion takes effect immediately.
#[derive(Clone)]
pub struct Quantity {
    name: String,
    units: Vec<Unit>,
    formatter: ValueFormatter,
    compiler: Arc<dyn FormulaCompiler>,
    conversions: Vec<Conversion>,
}

impl Quantity {
    pub fn new(name: impl Into<String>, formatter: ValueFormatter) -> Self {
        Quantity {
            name: name.into(),
            units: Vec::new(),
            formatter,
            compiler: Arc::new(ExprCompiler),
            conversions: Vec::new(),
        }
    }

    /// Use a different compiler for formula conversions
    pub fn with_compiler(mut self, compiler: Arc<dyn FormulaCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units in registration order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Conversions in registration order
    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    /// Create a new unit within this quantity and return it
    pub fn new_unit(&mut self, name: &str, symbol: &str) -> Unit {
        let unit = Unit::new(name, symbol);
        self.units.push(unit.clone());
        debug!(quantity = %self.name, unit = name, symbol, "added new unit");
        unit
    }

    /// Return the first unit whose name or symbol equals `token`
    pub fn find_unit(&self, token: &str) -> Result<Unit, ConversionError> {
        self.units.iter()
            .find(|u| u.matches(token))
            .cloned()
            .ok_or_else(|| ConversionError::UnitNotFound(token.to_string()))
    }

    /// Register `from -> to` scaling by `ratio`, and the inverse `to -> from`
    ///
    /// `ratio` is how many `to` make one `from`: one mile is 1.609344 km.
    pub fn new_ratio_conv(&mut self, from: &Unit, to: &Unit, ratio: f64) {
        self.push(Conversion::new(from.clone(), to.clone(), ratio_fn(ratio)));
        self.push(Conversion::new(to.clone(), from.clone(), inverse_ratio_fn(ratio)));
    }

    /// Register a single `from -> to` conversion computed by `formula` over `x`
    ///
    /// Nothing is registered when the formula does not compile.
    pub fn new_conv(&mut self, from: &Unit, to: &Unit, formula: &str) -> Result<(), ConversionError> {
        let func = self.compiler.compile(formula)?;
        self.push(Conversion::new(from.clone(), to.clone(), func).with_formula(formula.trim()));
        Ok(())
    }

    /// Register a single `from -> to` conversion from an already built function
    pub fn new_fn_conv(&mut self, from: &Unit, to: &Unit, func: ConversionFn) {
        self.push(Conversion::new(from.clone(), to.clone(), func));
    }

    fn push(&mut self, conv: Conversion) {
        debug!(quantity = %self.name, conversion = %conv, "added new conversion");
        self.conversions.push(conv);
    }

    pub fn fmt_value(&self, v: &Value, opts: &FmtOptions) -> String {
        (self.formatter)(v, opts)
    }

    /// Convert a value to another unit
    ///
    /// Either every conversion along the path is applied or an error is
    /// returned; `v` itself is never touched.
    pub fn convert(&self, v: &Value, to: &Unit) -> Result<Value, ConversionError> {
        let path = self.resolve(&v.unit, to)?;

        let mut val = v.val;
        for conv in path {
            let next = conv.apply(val);
            trace!(from = %conv.from().name, to = %conv.to().name, input = val, output = next, "applied conversion");
            val = next;
        }

        Ok(Value::new(val, to.clone()))
    }

    /// Resolve the chain of conversions leading from one unit to another
    pub fn resolve(&self, from: &Unit, to: &Unit) -> Result<Vec<&Conversion>, ConversionError> {
        let graph = ConversionGraph::from_edges(&self.conversions);

        let path = graph.find_path(&from.name, &to.name)
            .ok_or_else(|| ConversionError::conversion_not_found(&from.name, &to.name))?;

        let mut chain = Vec::with_capacity(path.len());
        for hop in path.hops() {
            debug!(quantity = %self.name, "{} -> {}", hop.from, hop.to);
            let conv = self.lookup(hop.from, hop.to).ok_or_else(|| {
                ConversionError::Internal(format!(
                    "resolved hop {} -> {} has no registered conversion",
                    hop.from, hop.to
                ))
            })?;
            chain.push(conv);
        }

        Ok(chain)
    }

    /// First registered conversion between two unit names
    fn lookup(&self, from: &str, to: &str) -> Option<&Conversion> {
        self.conversions.iter()
            .find(|c| c.from().name == from && c.to().name == to)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::new("", default_formatter())
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("name", &self.name)
            .field("units", &self.units)
            .field("conversions", &self.conversions)
            .finish_non_exhaustive()
    }
}
