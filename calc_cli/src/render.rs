//! Text and JSON output.

use serde::Serialize;

use calc_core::catalog::{Calculator, CalculatorMetadata};
use calc_core::parsing::QuickConversion;
use calc_core::solver::{Auxiliary, SolveRequest, SolveResult};
use calc_core::speed_profile::SpeedProfileResult;
use calc_core::{CalcError, CalcResult, OutputFormat, SolveError};

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

pub fn print_result(
    result: &SolveResult,
    request: &SolveRequest,
    output: OutputFormat,
) -> CalcResult<()> {
    if output == OutputFormat::Json {
        return print_json(result);
    }

    let relation = result.relation.relation();
    let meta = result.relation.metadata();

    println!("═══════════════════════════════════════");
    match meta.parameter_code {
        Some(code) => println!("  {} ({})", meta.name.to_uppercase(), code),
        None => println!("  {}", meta.name.to_uppercase()),
    }
    println!("═══════════════════════════════════════");
    println!();
    println!("Formula: {}", result.formula);
    println!();

    // Solved fields are marked; entered fields are echoed as typed
    for var in relation.variables {
        let (marker, shown) = match result.get(var.name) {
            Some(solved) => ("→", var.unit.suffix(&solved.formatted)),
            None => (" ", var.unit.suffix(request.raw(var.name).unwrap_or("").trim())),
        };
        println!("  {} {:<24} {}", marker, var.label, shown);
    }
    if request.delta_vl_mode && result.relation == calc_core::RelationId::FrequencyDivider {
        println!("    (Delta VL)");
    }

    println!();
    println!("Steps:");
    for (i, step) in result.steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    if let Some(Auxiliary::RegisterBytes {
        value_hex,
        high_register,
        high,
        low_register,
        low,
    }) = &result.auxiliary
    {
        println!();
        println!("Registers ({}H):", value_hex);
        println!("  {} (high byte) = {}H", high_register, high);
        println!("  {} (low byte)  = {}H", low_register, low);
    }
    Ok(())
}

pub fn print_no_result(error: &SolveError, output: OutputFormat) -> CalcResult<()> {
    if output == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "result": null,
            "code": error.error_code(),
            "reason": error,
        }));
    }
    println!("No result: {}", error);
    Ok(())
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    slug: &'static str,
    #[serde(flatten)]
    meta: CalculatorMetadata,
}

fn catalog_entries(calculators: &[Calculator]) -> Vec<CatalogEntry> {
    calculators
        .iter()
        .map(|c| CatalogEntry {
            slug: c.slug(),
            meta: c.metadata(),
        })
        .collect()
}

/// Search hits and the optional number conversion, printed as one JSON value.
#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    calculators: Vec<CatalogEntry>,
    conversion: Option<&'a QuickConversion>,
}

pub fn print_catalog(calculators: &[Calculator], output: OutputFormat) -> CalcResult<()> {
    if output == OutputFormat::Json {
        return print_json(&catalog_entries(calculators));
    }

    if calculators.is_empty() {
        println!("No matching calculators.");
        return Ok(());
    }
    for calculator in calculators {
        let meta = calculator.metadata();
        let categories: Vec<_> = meta.categories.iter().map(|c| c.display_name()).collect();
        println!(
            "  {:<18} {:<24} {:<12} [{}]",
            calculator.slug(),
            meta.name,
            meta.parameter_code.unwrap_or("-"),
            categories.join(", ")
        );
    }
    Ok(())
}

pub fn print_search(
    hits: &[Calculator],
    conversion: Option<&QuickConversion>,
    output: OutputFormat,
) -> CalcResult<()> {
    if output == OutputFormat::Json {
        return print_json(&SearchReport {
            calculators: catalog_entries(hits),
            conversion,
        });
    }

    print_catalog(hits, output)?;
    if let Some(conversion) = conversion {
        println!();
        println!(
            "Quick convert ({}): {} decimal = {}H",
            conversion.interpreted_as.display_name(),
            conversion.decimal,
            conversion.hex
        );
    }
    Ok(())
}

pub fn print_profile(profile: &SpeedProfileResult, output: OutputFormat) -> CalcResult<()> {
    if output == OutputFormat::Json {
        return print_json(profile);
    }
    println!("Speed profile for {} at {} Hz", profile.rated_speed, profile.frequency_hz);
    println!();
    for row in &profile.rows {
        println!("  {}  {:<22} {:>8} Hz", row.code, row.description, row.formatted);
    }
    Ok(())
}
