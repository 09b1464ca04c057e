//! Query parsing - "5 km in mi", "100F to C", "1 GiB -> MB"

use serde::{Deserialize, Serialize};
use xiny_core::ConversionError;

/// Separators between the source and target unit, most specific first
const SEPARATORS: [&str; 4] = ["->", "→", " to ", " in "];

/// A parsed conversion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub value: f64,
    pub from: String,
    pub to: String,
}

/// Parse a conversion request like "5 km in mi"
///
/// Supported separators: `->`, `→`, ` to `, ` in `. The last occurrence of
/// the separator is used, so "3 in in cm" reads as inches to centimeters.
pub fn parse_query(s: &str) -> Result<Query, ConversionError> {
    let s = s.trim();

    let (lhs, rhs) = SEPARATORS.iter()
        .find_map(|sep| s.rsplit_once(sep))
        .ok_or_else(|| invalid(format!("expected '<value> <unit> in <unit>', got '{}'", s)))?;

    let (value, from) = parse_value(lhs)?;
    let to = rhs.trim();
    if to.is_empty() {
        return Err(invalid(format!("missing target unit in '{}'", s)));
    }

    Ok(Query {
        value,
        from: from.to_string(),
        to: to.to_string(),
    })
}

/// Split a value string like "5 m" or "-3.2e2F" into number and unit token
pub fn parse_value(s: &str) -> Result<(f64, &str), ConversionError> {
    let s = s.trim();
    let split_pos = number_len(s);

    if split_pos == 0 {
        return Err(invalid(format!("no number found in '{}'", s)));
    }

    let num_str = &s[..split_pos];
    let unit_str = s[split_pos..].trim();

    let value: f64 = num_str.parse()
        .map_err(|_| invalid(format!("invalid number '{}'", num_str)))?;

    if unit_str.is_empty() {
        return Err(invalid(format!("missing unit after '{}'", num_str)));
    }

    Ok((value, unit_str))
}

/// Byte length of the leading numeric literal
///
/// An `e`/`E` only counts as an exponent when digits follow, so "5eV"
/// leaves "eV" as the unit.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        pos += 1;
    }

    let digits_start = pos;
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }
    if !bytes[digits_start..pos].iter().any(u8::is_ascii_digit) {
        return 0;
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'-' || bytes[exp] == b'+') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            pos = exp;
        }
    }

    pos
}

fn invalid(details: String) -> ConversionError {
    ConversionError::InvalidQuery(details)
}
