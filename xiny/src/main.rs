//! xiny - X in Y
//!
//! Convert a value between units:
//!
//! ```text
//! xiny 5 km in mi
//! xiny -s 100F to C
//! xiny --json "1 GiB -> MB"
//! xiny --list
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use xiny_core::{ConversionError, FmtOptions, Value};
use xiny_units::{parse_query, Query, Registry};

#[derive(Parser, Debug)]
#[command(name = "xiny")]
#[command(version)]
#[command(about = "Convert a value from one unit to another, e.g. `xiny 5 km in mi`")]
struct Args {
    /// Conversion query, e.g. `5 km in mi`, `100F to C`, `1 GiB -> MB`
    #[arg(allow_negative_numbers = true)]
    query: Vec<String>,

    /// Label the result with the unit symbol instead of its name
    #[arg(short, long)]
    short: bool,

    /// Decimal places in the result
    #[arg(short, long, default_value_t = 4)]
    precision: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also print the chain of conversions applied
    #[arg(long)]
    path: bool,

    /// List known quantities and units
    #[arg(long)]
    list: bool,
}

#[derive(Serialize)]
struct ConversionOutput<'a> {
    query: &'a Query,
    quantity: &'a str,
    result: &'a Value,
    formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<String>>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<ConversionError>() {
        Some(err) => {
            eprintln!("error[{}]: {}", err.code(), err);
            if let Some(suggestion) = err.suggestion() {
                eprintln!("  hint: {}", suggestion);
            }
        }
        None => eprintln!("error: {:#}", e),
    }
}

fn run(args: &Args) -> Result<String> {
    let registry = Registry::with_builtin_units().context("failed to load built-in units")?;
    debug!(quantities = registry.len(), "loaded unit catalog");

    if args.list {
        return Ok(list_units(&registry));
    }

    if args.query.is_empty() {
        bail!("nothing to convert, try `xiny 5 km in mi` or `xiny --list`");
    }

    convert(&registry, &args.query.join(" "), args)
}

fn convert(registry: &Registry, input: &str, args: &Args) -> Result<String> {
    let query = parse_query(input)?;
    debug!(value = query.value, from = %query.from, to = %query.to, "parsed query");

    let (quantity, result) = registry.convert(query.value, &query.from, &query.to)?;
    let opts = FmtOptions::new(args.short, args.precision);
    let formatted = quantity.fmt_value(&result, &opts);

    let path = if args.path {
        let from = quantity.find_unit(&query.from)?;
        let chain = quantity.resolve(&from, &result.unit)?;
        Some(chain.iter().map(|c| c.to_string()).collect::<Vec<_>>())
    } else {
        None
    };

    if args.json {
        let output = ConversionOutput {
            query: &query,
            quantity: quantity.name(),
            result: &result,
            formatted,
            path,
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    let steps = path.unwrap_or_default().into_iter().map(|step| format!("\n  {}", step));
    Ok(std::iter::once(formatted).chain(steps).collect())
}

fn list_units(registry: &Registry) -> String {
    registry.quantities()
        .map(|q| {
            let units: Vec<String> = q.units().iter()
                .map(|u| format!("  {} ({})", u.name, u.symbol))
                .collect();
            format!("{}:\n{}", q.name(), units.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
