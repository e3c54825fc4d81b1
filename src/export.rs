//! Tabular CSV export of projection results, schedules and scenarios
//!
//! Monetary values in the summary and overview tables are rounded to two
//! decimals here, never in the engine. Amortization tables are written at
//! full precision.

use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::{info, warn};

use crate::assumptions::{ScenarioId, ScenarioSet};
use crate::errors::ExportError;
use crate::loan::AmortizationRow;
use crate::property::Property;
use crate::projection::ProjectionResult;
use crate::scenario::{ProjectionRunner, ScenarioComparison};

type Result<T> = std::result::Result<T, ExportError>;

/// Property names are cut to this many characters in file names
const AMORTIZATION_NAME_LIMIT: usize = 20;

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn optional_money(value: Option<f64>) -> String {
    value.map(money).unwrap_or_default()
}

/// Header of the per-scenario summary table
pub fn summary_header(result: &ProjectionResult) -> Vec<String> {
    let scenario = &result.scenario;
    let mut header = vec!["Year".to_string()];
    header.extend(result.properties.iter().map(|p| format!("CF {}", p.name)));
    header.push(format!("TOTAL CF ({})", scenario));
    header.extend(result.properties.iter().map(|p| format!("IMP {}", p.name)));
    header.push(format!("TOTAL IMP ({})", scenario));
    header.push(format!("Tax {}", scenario));
    header.push(format!("Levy {}", scenario));
    header.push(format!("CF after tax {}", scenario));
    header
}

/// Write the year-by-year summary of one scenario
pub fn write_summary<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(summary_header(result))?;

    for row in result.rows() {
        let mut record = vec![row.year.to_string()];
        record.extend(row.property_cash_flow.iter().map(|&v| money(v)));
        record.push(money(row.total_cash_flow));
        record.extend(row.property_taxable_income.iter().map(|&v| money(v)));
        record.push(money(row.total_taxable_income));
        record.push(money(row.tax));
        record.push(money(row.social_levy));
        record.push(money(row.after_tax_cash_flow));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write a monthly amortization table
pub fn write_amortization<W: Write>(writer: W, rows: &[AmortizationRow]) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    if rows.is_empty() {
        csv.write_record([
            "month_index",
            "year",
            "month",
            "payment",
            "interest",
            "principal",
            "balance",
        ])?;
    }
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write both scenarios in the format the scenario loader reads
pub fn write_scenarios<W: Write>(writer: W, scenarios: &ScenarioSet) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record([
        "scenario",
        "rent_indexation",
        "insurance_indexation",
        "condo_fees_indexation",
        "property_tax_indexation",
        "loan_insurance_indexation",
        "other_indexation",
        "marginal_tax_rate",
        "social_levy_rate",
        "projection_horizon_years",
    ])?;

    for id in [ScenarioId::A, ScenarioId::B] {
        let p = scenarios.get(id);
        csv.write_record([
            id.to_string(),
            p.rent_indexation.to_string(),
            p.insurance_indexation.to_string(),
            p.condo_fees_indexation.to_string(),
            p.property_tax_indexation.to_string(),
            p.loan_insurance_indexation.to_string(),
            p.other_indexation.to_string(),
            p.marginal_tax_rate.to_string(),
            p.social_levy_rate.to_string(),
            p.projection_horizon_years.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the portfolio overview: one line per property with its loan payment
pub fn write_property_overview<W: Write>(writer: W, properties: &[Property]) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["Name", "Loan", "Duration", "Rate", "Rent", "Monthly payment"])?;

    for p in properties {
        csv.write_record([
            p.name.clone(),
            format!("{:.0}", p.loan_principal),
            p.loan_duration_years.to_string(),
            format!("{:.2}%", p.annual_rate * 100.0),
            format!("{:.0}", p.annual_rent),
            money(p.monthly_payment()),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write A/B portfolio totals aligned by year
pub fn write_comparison<W: Write>(writer: W, comparison: &ScenarioComparison) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    let (a, b) = (&comparison.a.scenario, &comparison.b.scenario);
    csv.write_record([
        "Year".to_string(),
        format!("TOTAL CF ({})", a),
        format!("CF after tax {}", a),
        format!("TOTAL CF ({})", b),
        format!("CF after tax {}", b),
    ])?;

    for row in comparison.aligned_rows() {
        csv.write_record([
            row.year.to_string(),
            optional_money(row.total_cash_flow_a),
            optional_money(row.after_tax_cash_flow_a),
            optional_money(row.total_cash_flow_b),
            optional_money(row.after_tax_cash_flow_b),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// File stem for a property's amortization table
pub fn amortization_file_stem(name: &str) -> String {
    let truncated: String = name
        .chars()
        .take(AMORTIZATION_NAME_LIMIT)
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("amort_{}", truncated)
}

/// Write the full bundle into `dir`: both scenario summaries, the scenario
/// table and one amortization table per financed property
///
/// Names whose file stems coincide (after truncation and character
/// replacement) get their 1-based portfolio position appended, so no
/// schedule overwrites another. Returns the paths written, selected scenario
/// first.
pub fn export_bundle(
    dir: &Path,
    properties: &[Property],
    scenarios: &ScenarioSet,
    selected: ScenarioId,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let runner = ProjectionRunner::new(properties);
    let mut written = Vec::new();

    for id in [selected, selected.other()] {
        let result = runner.run_scenario(scenarios, id);
        let path = dir.join(format!("summary_{}.csv", result.scenario));
        write_summary(File::create(&path)?, &result)?;
        written.push(path);
    }

    let path = dir.join("scenarios.csv");
    write_scenarios(File::create(&path)?, scenarios)?;
    written.push(path);

    let mut used_stems = HashSet::new();
    for (i, property) in properties.iter().enumerate() {
        if property.amortization_rows().is_empty() {
            continue;
        }

        let base = amortization_file_stem(&property.name);
        let mut stem = base.clone();
        let mut suffix = i + 1;
        while !used_stems.insert(stem.clone()) {
            stem = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        if stem != base {
            warn!(
                "Amortization file for {:?} collides with another property; writing {}.csv",
                property.name, stem
            );
        }

        let path = dir.join(format!("{}.csv", stem));
        write_amortization(File::create(&path)?, property.amortization_rows())?;
        written.push(path);
    }

    info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}
