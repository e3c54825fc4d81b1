//! Projection output structures

use serde::{Deserialize, Serialize};

/// Detailed breakdown of one property in one projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyYearRow {
    pub year: u32,
    pub rent: f64,
    /// Insurance, condo fees, loan insurance and other charges
    pub operating_charges: f64,
    pub property_tax: f64,
    /// Annual debt service (0 once the loan is repaid)
    pub annuity: f64,
    /// Interest paid in the year (0 once the loan is repaid)
    pub interest: f64,
    pub taxable_income: f64,
    pub cash_flow: f64,
}

/// Cash-flow and taxable-income series for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySeries {
    pub name: String,

    /// Pre-tax cash flow per year, index 0 = year 1
    pub cash_flow: Vec<f64>,

    /// Taxable income per year, index 0 = year 1
    pub taxable_income: Vec<f64>,
}

impl PropertySeries {
    pub fn from_rows(name: impl Into<String>, rows: &[PropertyYearRow]) -> Self {
        Self {
            name: name.into(),
            cash_flow: rows.iter().map(|r| r.cash_flow).collect(),
            taxable_income: rows.iter().map(|r| r.taxable_income).collect(),
        }
    }
}

/// Portfolio-level sums and taxation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub total_cash_flow: Vec<f64>,
    pub total_taxable_income: Vec<f64>,
    /// Income tax on positive taxable income
    pub tax: Vec<f64>,
    /// Social levy on positive taxable income
    pub social_levy: Vec<f64>,
    pub after_tax_cash_flow: Vec<f64>,
}

/// Complete result for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Scenario label
    pub scenario: String,

    /// Projected years (1-indexed)
    pub years: Vec<u32>,

    /// Per-property series, in portfolio order
    pub properties: Vec<PropertySeries>,

    pub totals: PortfolioTotals,
}

/// One year of the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub year: u32,
    pub property_cash_flow: Vec<f64>,
    pub total_cash_flow: f64,
    pub property_taxable_income: Vec<f64>,
    pub total_taxable_income: f64,
    pub tax: f64,
    pub social_levy: f64,
    pub after_tax_cash_flow: f64,
}

impl ProjectionResult {
    pub fn horizon(&self) -> usize {
        self.years.len()
    }

    /// Rows keyed by year, in the column order of the summary table
    pub fn rows(&self) -> Vec<SummaryRow> {
        let at = |series: &[f64], i: usize| series.get(i).copied().unwrap_or(0.0);

        self.years
            .iter()
            .enumerate()
            .map(|(i, &year)| SummaryRow {
                year,
                property_cash_flow: self.properties.iter().map(|p| at(&p.cash_flow, i)).collect(),
                total_cash_flow: at(&self.totals.total_cash_flow, i),
                property_taxable_income: self
                    .properties
                    .iter()
                    .map(|p| at(&p.taxable_income, i))
                    .collect(),
                total_taxable_income: at(&self.totals.total_taxable_income, i),
                tax: at(&self.totals.tax, i),
                social_levy: at(&self.totals.social_levy, i),
                after_tax_cash_flow: at(&self.totals.after_tax_cash_flow, i),
            })
            .collect()
    }

    /// Cumulative figures over the whole horizon
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            total_years: self.years.len() as u32,
            property_count: self.properties.len(),
            cumulative_cash_flow: self.totals.total_cash_flow.iter().sum(),
            cumulative_taxable_income: self.totals.total_taxable_income.iter().sum(),
            cumulative_tax: self.totals.tax.iter().sum(),
            cumulative_social_levy: self.totals.social_levy.iter().sum(),
            cumulative_after_tax_cash_flow: self.totals.after_tax_cash_flow.iter().sum(),
            final_after_tax_cash_flow: self
                .totals
                .after_tax_cash_flow
                .last()
                .copied()
                .unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub property_count: usize,
    pub cumulative_cash_flow: f64,
    pub cumulative_taxable_income: f64,
    pub cumulative_tax: f64,
    pub cumulative_social_levy: f64,
    pub cumulative_after_tax_cash_flow: f64,
    pub final_after_tax_cash_flow: f64,
}
