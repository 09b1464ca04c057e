//! Built-in unit catalog
//!
//! Conversions are registered as a sparse chain, not every pair, and rely on
//! path resolution for everything else: mile to centimeter goes
//! mile -> foot -> inch -> centimeter.

use std::sync::Arc;
use xiny_core::{default_format, ConversionError, FmtOptions, Value, ValueFormatter};
use crate::{Quantity, Registry};

/// Load every built-in quantity into `registry`
pub fn load_builtin_units(mut registry: Registry) -> Result<Registry, ConversionError> {
    register_length_units(registry.get_or_create("length", length_formatter()));
    register_mass_units(registry.get_or_create("mass", mass_formatter()));
    register_temperature_units(registry.get_or_create("temperature", Arc::new(singular_format)))?;
    register_duration_units(registry.get_or_create("duration", plural_formatter(&[("century", "centuries")])));
    register_data_units(registry.get_or_create("data", plural_formatter(&[])));
    register_volume_units(registry.get_or_create("volume", plural_formatter(&[("cubic meter", "cubic meters")])));
    Ok(registry)
}

/// Default formatting with irregular plurals looked up by unit name
fn plural_formatter(irregular: &'static [(&'static str, &'static str)]) -> ValueFormatter {
    Arc::new(move |v: &Value, opts: &FmtOptions| {
        if opts.short || v.val <= 1.0 {
            return default_format(v, opts);
        }
        match irregular.iter().find(|(singular, _)| *singular == v.unit.name) {
            Some((_, plural)) => format!("{:.*} {}", opts.precision, v.val, plural),
            None => default_format(v, opts),
        }
    })
}

fn length_formatter() -> ValueFormatter {
    plural_formatter(&[("foot", "feet"), ("inch", "inches"), ("nautical mile", "nautical miles")])
}

fn mass_formatter() -> ValueFormatter {
    // "stone" is its own plural in common use
    plural_formatter(&[("stone", "stone")])
}

/// Label is never pluralized ("100 celsius")
fn singular_format(v: &Value, opts: &FmtOptions) -> String {
    let label = if opts.short { &v.unit.symbol } else { &v.unit.name };
    format!("{:.*} {}", opts.precision, v.val, label)
}

fn register_length_units(q: &mut Quantity) {
    let mm = q.new_unit("millimeter", "mm");
    let cm = q.new_unit("centimeter", "cm");
    let m = q.new_unit("meter", "m");
    let km = q.new_unit("kilometer", "km");
    let inch = q.new_unit("inch", "in");
    let ft = q.new_unit("foot", "ft");
    let yd = q.new_unit("yard", "yd");
    let mi = q.new_unit("mile", "mi");
    let nmi = q.new_unit("nautical mile", "nmi");

    q.new_ratio_conv(&mm, &m, 0.001);
    q.new_ratio_conv(&cm, &m, 0.01);
    q.new_ratio_conv(&km, &m, 1000.0);
    q.new_ratio_conv(&inch, &cm, 2.54);
    q.new_ratio_conv(&ft, &inch, 12.0);
    q.new_ratio_conv(&yd, &ft, 3.0);
    q.new_ratio_conv(&mi, &ft, 5280.0);
    q.new_ratio_conv(&nmi, &m, 1852.0);
}

fn register_mass_units(q: &mut Quantity) {
    let mg = q.new_unit("milligram", "mg");
    let g = q.new_unit("gram", "g");
    let kg = q.new_unit("kilogram", "kg");
    let t = q.new_unit("tonne", "t");
    let oz = q.new_unit("ounce", "oz");
    let lb = q.new_unit("pound", "lb");
    let st = q.new_unit("stone", "st");

    q.new_ratio_conv(&mg, &g, 0.001);
    q.new_ratio_conv(&g, &kg, 0.001);
    q.new_ratio_conv(&t, &kg, 1000.0);
    q.new_ratio_conv(&lb, &kg, 0.45359237);
    q.new_ratio_conv(&oz, &lb, 0.0625);
    q.new_ratio_conv(&st, &lb, 14.0);
}

fn register_temperature_units(q: &mut Quantity) -> Result<(), ConversionError> {
    let c = q.new_unit("celsius", "C");
    let f = q.new_unit("fahrenheit", "F");
    let k = q.new_unit("kelvin", "K");
    let r = q.new_unit("rankine", "R");

    q.new_conv(&c, &f, "x * 1.8 + 32")?;
    q.new_conv(&f, &c, "(x - 32) / 1.8")?;
    q.new_conv(&c, &k, "x + 273.15")?;
    q.new_conv(&k, &c, "x - 273.15")?;
    q.new_conv(&f, &r, "x + 459.67")?;
    q.new_conv(&r, &f, "x - 459.67")?;
    Ok(())
}

fn register_duration_units(q: &mut Quantity) {
    let ms = q.new_unit("millisecond", "ms");
    let s = q.new_unit("second", "s");
    let min = q.new_unit("minute", "min");
    let h = q.new_unit("hour", "h");
    let d = q.new_unit("day", "d");
    let wk = q.new_unit("week", "wk");
    let yr = q.new_unit("year", "yr");
    let century = q.new_unit("century", "c");

    q.new_ratio_conv(&ms, &s, 0.001);
    q.new_ratio_conv(&min, &s, 60.0);
    q.new_ratio_conv(&h, &min, 60.0);
    q.new_ratio_conv(&d, &h, 24.0);
    q.new_ratio_conv(&wk, &d, 7.0);
    // Julian year
    q.new_ratio_conv(&yr, &d, 365.25);
    q.new_ratio_conv(&century, &yr, 100.0);
}

fn register_data_units(q: &mut Quantity) {
    let bit = q.new_unit("bit", "b");
    let byte = q.new_unit("byte", "B");
    let kb = q.new_unit("kilobyte", "kB");
    let mb = q.new_unit("megabyte", "MB");
    let gb = q.new_unit("gigabyte", "GB");
    let tb = q.new_unit("terabyte", "TB");
    let kib = q.new_unit("kibibyte", "KiB");
    let mib = q.new_unit("mebibyte", "MiB");
    let gib = q.new_unit("gibibyte", "GiB");
    let tib = q.new_unit("tebibyte", "TiB");

    q.new_ratio_conv(&bit, &byte, 0.125);
    q.new_ratio_conv(&kb, &byte, 1000.0);
    q.new_ratio_conv(&mb, &kb, 1000.0);
    q.new_ratio_conv(&gb, &mb, 1000.0);
    q.new_ratio_conv(&tb, &gb, 1000.0);
    q.new_ratio_conv(&kib, &byte, 1024.0);
    q.new_ratio_conv(&mib, &kib, 1024.0);
    q.new_ratio_conv(&gib, &mib, 1024.0);
    q.new_ratio_conv(&tib, &gib, 1024.0);
}

fn register_volume_units(q: &mut Quantity) {
    let ml = q.new_unit("milliliter", "mL");
    let l = q.new_unit("liter", "L");
    let m3 = q.new_unit("cubic meter", "m3");
    let tsp = q.new_unit("teaspoon", "tsp");
    let tbsp = q.new_unit("tablespoon", "tbsp");
    let cup = q.new_unit("cup", "cup");
    let pt = q.new_unit("pint", "pt");
    let qt = q.new_unit("quart", "qt");
    let gal = q.new_unit("gallon", "gal");

    q.new_ratio_conv(&ml, &l, 0.001);
    q.new_ratio_conv(&m3, &l, 1000.0);
    // US customary, defined from the gallon of 231 cubic inches
    q.new_ratio_conv(&gal, &l, 3.785411784);
    q.new_ratio_conv(&qt, &gal, 0.25);
    q.new_ratio_conv(&pt, &qt, 0.5);
    q.new_ratio_conv(&cup, &pt, 0.5);
    q.new_ratio_conv(&tbsp, &cup, 0.0625);
    q.new_ratio_conv(&tsp, &tbsp, 1.0 / 3.0);
}
