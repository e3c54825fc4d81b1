//! Portfolio aggregation and flat-rate taxation

use crate::assumptions::ScenarioParameters;
use super::cashflows::{PortfolioTotals, PropertySeries};

/// Sum property series year by year, then tax the positive aggregate
///
/// Tax and social levy are computed on the portfolio total, never per
/// property, with no loss carry-forward: a negative year is taxed at zero.
pub fn aggregate(series: &[PropertySeries], params: &ScenarioParameters) -> PortfolioTotals {
    let horizon = params.projection_horizon_years as usize;

    let mut total_cash_flow = vec![0.0; horizon];
    let mut total_taxable_income = vec![0.0; horizon];

    for property in series {
        for (total, value) in total_cash_flow.iter_mut().zip(&property.cash_flow) {
            *total += value;
        }
        for (total, value) in total_taxable_income.iter_mut().zip(&property.taxable_income) {
            *total += value;
        }
    }

    let tax: Vec<f64> = total_taxable_income
        .iter()
        .map(|&income| income.max(0.0) * params.marginal_tax_rate)
        .collect();
    let social_levy: Vec<f64> = total_taxable_income
        .iter()
        .map(|&income| income.max(0.0) * params.social_levy_rate)
        .collect();

    let after_tax_cash_flow = total_cash_flow
        .iter()
        .zip(tax.iter().zip(&social_levy))
        .map(|(cf, (t, l))| cf - t - l)
        .collect();

    PortfolioTotals {
        total_cash_flow,
        total_taxable_income,
        tax,
        social_levy,
        after_tax_cash_flow,
    }
}
