//! xiny Units - Quantities and conversion-graph resolution
//!
//! A quantity (length, temperature, ...) owns its units and a set of
//! directed conversions between them. Converting between two units finds
//! the shortest chain of registered conversions and applies it in order.
//!
//! Built-in catalog:
//! - Length (mm, cm, m, km, in, ft, yd, mi, nmi)
//! - Mass (mg, g, kg, t, oz, lb, st)
//! - Temperature (C, F, K, R)
//! - Duration (ms, s, min, h, d, wk, yr, c)
//! - Data (b, B, kB, MB, GB, TB, KiB, MiB, GiB, TiB)
//! - Volume (mL, L, m3, tsp, tbsp, cup, pt, qt, gal)

mod conversion;
mod graph;
mod quantity;
mod registry;
mod catalog;
mod parse;

pub use conversion::{Conversion, Edge};
pub use graph::{ConversionGraph, Hop, Path};
pub use quantity::Quantity;
pub use registry::Registry;
pub use catalog::load_builtin_units;
pub use parse::{parse_query, parse_value, Query};

pub use xiny_core::{ConversionError, FmtOptions, Unit, Value};
