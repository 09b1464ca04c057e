//! Quantity registry

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use xiny_core::{ConversionError, FormulaCompiler, Unit, Value, ValueFormatter};
use xiny_formula::ExprCompiler;
use crate::Quantity;

/// Quantities by name
///
/// The registry is append-only: once a name is registered it always
/// resolves to the same quantity. It is an ordinary owned value, so callers
/// that share one across threads wrap it in their own lock.
pub struct Registry {
    quantities: Vec<Quantity>,
    index: HashMap<String, usize>,
    compiler: Arc<dyn FormulaCompiler>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            quantities: Vec::new(),
            index: HashMap::new(),
            compiler: Arc::new(ExprCompiler),
        }
    }

    /// Registry preloaded with the built-in unit catalog
    pub fn with_builtin_units() -> Result<Self, ConversionError> {
        crate::catalog::load_builtin_units(Self::new())
    }

    /// Compiler handed to quantities created from now on
    pub fn with_compiler(mut self, compiler: Arc<dyn FormulaCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    /// Return the quantity called `name`, creating it if needed
    ///
    /// `formatter` is only used when the quantity is created.
    pub fn get_or_create(&mut self, name: &str, formatter: ValueFormatter) -> &mut Quantity {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let quantity = Quantity::new(name, formatter).with_compiler(self.compiler.clone());
                self.quantities.push(quantity);
                let idx = self.quantities.len() - 1;
                self.index.insert(name.to_string(), idx);
                debug!(quantity = name, "added new quantity");
                idx
            }
        };
        &mut self.quantities[idx]
    }

    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.index.get(name).map(|&idx| &self.quantities[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Quantity> {
        self.index.get(name).map(|&idx| &mut self.quantities[idx])
    }

    /// Like [`Registry::get`], failing with `QuantityNotFound`
    pub fn quantity(&self, name: &str) -> Result<&Quantity, ConversionError> {
        self.get(name).ok_or_else(|| ConversionError::QuantityNotFound(name.to_string()))
    }

    /// Quantities in registration order
    pub fn quantities(&self) -> impl Iterator<Item = &Quantity> {
        self.quantities.iter()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Find a unit by name or symbol in any quantity
    ///
    /// Quantities are searched in registration order and the first match wins.
    pub fn find_unit(&self, token: &str) -> Result<(&Quantity, Unit), ConversionError> {
        self.quantities.iter()
            .find_map(|q| q.find_unit(token).ok().map(|u| (q, u)))
            .ok_or_else(|| ConversionError::UnitNotFound(token.to_string()))
    }

    /// Convert `val` from the unit named `from` to the unit named `to`
    ///
    /// `from` picks the quantity; `to` must belong to that same quantity.
    pub fn convert(&self, val: f64, from: &str, to: &str) -> Result<(&Quantity, Value), ConversionError> {
        let (quantity, from_unit) = self.find_unit(from)?;
        let to_unit = quantity.find_unit(to)?;
        let value = quantity.convert(&Value::new(val, from_unit), &to_unit)?;
        Ok((quantity, value))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiny_core::{default_formatter, ConversionFn};

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut registry = Registry::new();
        let m = registry.get_or_create("length", default_formatter()).new_unit("meter", "m");

        let again = registry.get_or_create("length", default_formatter());
        assert_eq!(again.units(), &[m]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_quantities_keep_registration_order() {
        let mut registry = Registry::new();
        registry.get_or_create("mass", default_formatter());
        registry.get_or_create("length", default_formatter());
        registry.get_or_create("mass", default_formatter());

        let names: Vec<&str> = registry.quantities().map(|q| q.name()).collect();
        assert_eq!(names, vec!["mass", "length"]);
    }

    #[test]
    fn test_quantity_not_found() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.get("length").is_none());
        assert_eq!(
            registry.quantity("length").unwrap_err(),
            ConversionError::QuantityNotFound("length".to_string())
        );
    }

    #[test]
    fn test_find_unit_across_quantities() {
        let mut registry = Registry::new();
        registry.get_or_create("length", default_formatter()).new_unit("meter", "m");
        registry.get_or_create("time", default_formatter()).new_unit("minute", "m");

        let (q, unit) = registry.find_unit("m").unwrap();
        assert_eq!(q.name(), "length");
        assert_eq!(unit.name, "meter");

        let (q, _) = registry.find_unit("minute").unwrap();
        assert_eq!(q.name(), "time");

        assert!(matches!(registry.find_unit("parsec"), Err(ConversionError::UnitNotFound(_))));
    }

    #[test]
    fn test_convert_stays_within_quantity() {
        let mut registry = Registry::new();
        let length = registry.get_or_create("length", default_formatter());
        let m = length.new_unit("meter", "m");
        let km = length.new_unit("kilometer", "km");
        length.new_ratio_conv(&m, &km, 0.001);
        registry.get_or_create("time", default_formatter()).new_unit("second", "s");

        let (q, v) = registry.convert(2500.0, "m", "kilometer").unwrap();
        assert_eq!(q.name(), "length");
        assert_eq!(v.val, 2.5);

        assert_eq!(
            registry.convert(1.0, "m", "s").unwrap_err(),
            ConversionError::UnitNotFound("s".to_string())
        );
    }

    struct Doubler;

    impl FormulaCompiler for Doubler {
        fn compile(&self, _formula: &str) -> Result<ConversionFn, ConversionError> {
            Ok(Arc::new(|x: f64| x * 2.0))
        }
    }

    #[test]
    fn test_custom_compiler_reaches_quantities() {
        let mut registry = Registry::new().with_compiler(Arc::new(Doubler));
        let q = registry.get_or_create("anything", default_formatter());
        let a = q.new_unit("a", "a");
        let b = q.new_unit("b", "b");
        q.new_conv(&a, &b, "not a formula at all").unwrap();

        let (_, v) = registry.convert(21.0, "a", "b").unwrap();
        assert_eq!(v.val, 42.0);
    }
}
