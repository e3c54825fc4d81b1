//! Rental Projection CLI
//!
//! Command-line interface for running portfolio projections

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use rental_projection::assumptions::{load_scenarios_or_default, DEFAULT_SCENARIOS_PATH};
use rental_projection::export::{
    export_bundle, write_amortization, write_comparison, write_property_overview, write_summary,
};
use rental_projection::property::{load_properties, loader::DEFAULT_PORTFOLIO_PATH};
use rental_projection::{ProjectionResult, ProjectionRunner, Property, ScenarioId};

#[derive(Parser)]
#[command(
    name = "rental_projection",
    version,
    about = "Multi-property rental investment projections"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project the portfolio under one scenario, optionally against the other
    Project {
        #[arg(long, default_value = DEFAULT_PORTFOLIO_PATH)]
        properties: PathBuf,
        #[arg(long, default_value = DEFAULT_SCENARIOS_PATH)]
        scenarios: PathBuf,
        #[arg(long, default_value = "A")]
        scenario: ScenarioId,
        /// Also run the other scenario and show totals side by side
        #[arg(long)]
        compare: bool,
        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Write the summary table to this CSV file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print or export the amortization schedule of one property
    Amortization {
        #[arg(long, default_value = DEFAULT_PORTFOLIO_PATH)]
        properties: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export both scenario summaries, the scenarios and every schedule
    Export {
        #[arg(long, default_value = DEFAULT_PORTFOLIO_PATH)]
        properties: PathBuf,
        #[arg(long, default_value = DEFAULT_SCENARIOS_PATH)]
        scenarios: PathBuf,
        #[arg(long, default_value = "A")]
        scenario: ScenarioId,
        #[arg(long)]
        dir: PathBuf,
    },
    /// List the portfolio with each property's monthly payment
    Properties {
        #[arg(long, default_value = DEFAULT_PORTFOLIO_PATH)]
        properties: PathBuf,
    },
}

fn load_portfolio(path: &Path) -> Result<Vec<Property>> {
    load_properties(path)
        .with_context(|| format!("failed to load properties from {}", path.display()))
}

/// Projections need at least one property
fn require_properties(properties: &[Property]) -> Result<()> {
    if properties.is_empty() {
        bail!("no properties in portfolio; add at least one before projecting");
    }
    Ok(())
}

fn print_result(result: &ProjectionResult) {
    println!(
        "Scenario {} ({} properties, {} years)",
        result.scenario,
        result.properties.len(),
        result.horizon()
    );
    println!("{:>4} {:>14} {:>14} {:>12} {:>12} {:>14}",
        "Year", "Cash flow", "Taxable", "Tax", "Levy", "After tax");
    println!("{}", "-".repeat(75));

    for row in result.rows() {
        println!("{:>4} {:>14.2} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
            row.year,
            row.total_cash_flow,
            row.total_taxable_income,
            row.tax,
            row.social_levy,
            row.after_tax_cash_flow,
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Cumulative cash flow:   {:.2}", summary.cumulative_cash_flow);
    println!("  Cumulative tax:         {:.2}", summary.cumulative_tax);
    println!("  Cumulative social levy: {:.2}", summary.cumulative_social_levy);
    println!("  Cumulative after tax:   {:.2}", summary.cumulative_after_tax_cash_flow);
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Project { properties, scenarios, scenario, compare, json, out } => {
            let portfolio = load_portfolio(&properties)?;
            require_properties(&portfolio)?;
            let scenario_set = load_scenarios_or_default(&scenarios)
                .with_context(|| format!("failed to load scenarios from {}", scenarios.display()))?;

            let runner = ProjectionRunner::new(&portfolio);
            let selected = runner.run_scenario(&scenario_set, scenario);
            let comparison = compare.then(|| runner.run_both(&scenario_set));

            if let Some(path) = &out {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                write_summary(file, &selected)?;
                info!("Summary written to {}", path.display());
            }

            if json {
                let text = match &comparison {
                    Some(both) => serde_json::to_string_pretty(both)?,
                    None => serde_json::to_string_pretty(&selected)?,
                };
                println!("{}", text);
            } else {
                print_result(&selected);
                if let Some(both) = &comparison {
                    println!();
                    write_comparison(io::stdout().lock(), both)?;
                }
            }
        }
        Command::Amortization { properties, name, out } => {
            let portfolio = load_portfolio(&properties)?;
            let property = portfolio
                .iter()
                .find(|p| p.name == name)
                .with_context(|| format!("no property named {:?}", name))?;
            if property.amortization_rows().is_empty() {
                bail!("{} has no loan; no amortization schedule", property.name);
            }

            match &out {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    write_amortization(file, property.amortization_rows())?;
                    println!("Schedule written to {}", path.display());
                }
                None => write_amortization(io::stdout().lock(), property.amortization_rows())?,
            }
        }
        Command::Export { properties, scenarios, scenario, dir } => {
            let portfolio = load_portfolio(&properties)?;
            require_properties(&portfolio)?;
            let scenario_set = load_scenarios_or_default(&scenarios)
                .with_context(|| format!("failed to load scenarios from {}", scenarios.display()))?;

            let written = export_bundle(&dir, &portfolio, &scenario_set, scenario)
                .with_context(|| format!("failed to export to {}", dir.display()))?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Command::Properties { properties } => {
            let portfolio = load_portfolio(&properties)?;
            write_property_overview(io::stdout().lock(), &portfolio)?;
        }
    }

    Ok(())
}
