//! Projection runner for single and A/B scenario runs
//!
//! Holds a borrowed portfolio and projects it under whatever scenario
//! parameters it is handed. Nothing is cached between runs, so the same
//! runner can be reused for both scenarios.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::assumptions::{ScenarioId, ScenarioParameters, ScenarioSet};
use crate::projection::{aggregate, PropertyProjector, ProjectionResult};
use crate::property::Property;

/// Runs portfolio projections
///
/// # Example
/// ```ignore
/// let runner = ProjectionRunner::new(&properties);
/// let result = runner.run(&scenarios.a);
/// let comparison = runner.run_both(&scenarios);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProjectionRunner<'a> {
    properties: &'a [Property],
}

impl<'a> ProjectionRunner<'a> {
    pub fn new(properties: &'a [Property]) -> Self {
        Self { properties }
    }

    /// Project every property under `params`, then aggregate and tax
    pub fn run(&self, params: &ScenarioParameters) -> ProjectionResult {
        info!(
            "Projecting {} properties over {} years (scenario {})",
            self.properties.len(),
            params.projection_horizon_years,
            params.name
        );
        if self.properties.is_empty() {
            warn!("Empty portfolio; scenario {} totals are all zero", params.name);
        }

        let projector = PropertyProjector::new(params);
        let series: Vec<_> = self
            .properties
            .iter()
            .map(|property| {
                debug!("Projecting {}", property.name);
                projector.project(property)
            })
            .collect();

        let totals = aggregate(&series, params);

        ProjectionResult {
            scenario: params.name.clone(),
            years: params.years(),
            properties: series,
            totals,
        }
    }

    /// Run one scenario out of the pair
    pub fn run_scenario(&self, scenarios: &ScenarioSet, id: ScenarioId) -> ProjectionResult {
        self.run(scenarios.get(id))
    }

    /// Run both scenarios for side-by-side comparison
    pub fn run_both(&self, scenarios: &ScenarioSet) -> ScenarioComparison {
        ScenarioComparison {
            a: self.run(&scenarios.a),
            b: self.run(&scenarios.b),
        }
    }
}

/// Project a portfolio under one scenario
pub fn run(properties: &[Property], params: &ScenarioParameters) -> ProjectionResult {
    ProjectionRunner::new(properties).run(params)
}

/// Results of both scenarios on the same portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub a: ProjectionResult,
    pub b: ProjectionResult,
}

/// Portfolio totals of both scenarios for one year
///
/// A side is `None` when its horizon ends before this year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub year: u32,
    pub total_cash_flow_a: Option<f64>,
    pub after_tax_cash_flow_a: Option<f64>,
    pub total_cash_flow_b: Option<f64>,
    pub after_tax_cash_flow_b: Option<f64>,
}

impl ScenarioComparison {
    pub fn get(&self, id: ScenarioId) -> &ProjectionResult {
        match id {
            ScenarioId::A => &self.a,
            ScenarioId::B => &self.b,
        }
    }

    /// Totals aligned by year index over the longer of the two horizons
    pub fn aligned_rows(&self) -> Vec<ComparisonRow> {
        let horizon = self.a.horizon().max(self.b.horizon());
        (0..horizon)
            .map(|i| ComparisonRow {
                year: i as u32 + 1,
                total_cash_flow_a: self.a.totals.total_cash_flow.get(i).copied(),
                after_tax_cash_flow_a: self.a.totals.after_tax_cash_flow.get(i).copied(),
                total_cash_flow_b: self.b.totals.total_cash_flow.get(i).copied(),
                after_tax_cash_flow_b: self.b.totals.after_tax_cash_flow.get(i).copied(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Charges;
    use approx::assert_relative_eq;

    fn portfolio() -> Vec<Property> {
        let charges = Charges {
            insurance: 200.0,
            condo_fees: 600.0,
            property_tax: 900.0,
            loan_insurance: 150.0,
            other: 100.0,
        };
        vec![
            Property::new("T2 Lyon", 150_000.0, 100_000.0, 20, 0.03, 9_600.0, charges),
            Property::new("T3 Nantes", 210_000.0, 180_000.0, 25, 0.035, 11_400.0, charges),
            Property::cash_purchase("Studio", 80_000.0, 6_000.0, Charges::default()),
        ]
    }

    #[test]
    fn test_run_aggregates_all_properties() {
        let properties = portfolio();
        let params = ScenarioParameters::default();
        let result = ProjectionRunner::new(&properties).run(&params);

        assert_eq!(result.scenario, "A");
        assert_eq!(result.years, (1..=15).collect::<Vec<_>>());
        assert_eq!(result.properties.len(), 3);

        for year in 0..result.horizon() {
            let cf: f64 = result.properties.iter().map(|p| p.cash_flow[year]).sum();
            assert_relative_eq!(result.totals.total_cash_flow[year], cf, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_empty_portfolio() {
        let params = ScenarioParameters::default();
        let result = run(&[], &params);

        assert!(result.properties.is_empty());
        assert_eq!(result.totals.total_cash_flow, vec![0.0; 15]);
        assert_eq!(result.totals.after_tax_cash_flow, vec![0.0; 15]);
    }

    #[test]
    fn test_single_property_matches_its_series() {
        let properties =
            vec![Property::cash_purchase("Studio", 80_000.0, 12_000.0, Charges::default())];
        let params = ScenarioParameters {
            marginal_tax_rate: 0.11,
            social_levy_rate: 0.172,
            ..Default::default()
        };
        let result = run(&properties, &params);

        assert_eq!(result.totals.total_cash_flow, result.properties[0].cash_flow);
        let first = &result.rows()[0];
        assert_eq!(first.year, 1);
        assert_eq!(first.property_cash_flow, vec![12_000.0]);
        assert_relative_eq!(first.tax, 12_000.0 * 0.11);
        assert_relative_eq!(
            first.after_tax_cash_flow,
            12_000.0 - 12_000.0 * 0.11 - 12_000.0 * 0.172
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let properties = portfolio();
        let scenarios = ScenarioSet::default();
        let runner = ProjectionRunner::new(&properties);

        assert_eq!(runner.run(&scenarios.a), runner.run(&scenarios.a));
    }

    #[test]
    fn test_run_both_uses_each_scenario() {
        let properties = portfolio();
        let mut scenarios = ScenarioSet::default();
        scenarios.b.rent_indexation = 0.04;
        scenarios.b.projection_horizon_years = 20;

        let comparison = ProjectionRunner::new(&properties).run_both(&scenarios);
        assert_eq!(comparison.a.scenario, "A");
        assert_eq!(comparison.get(ScenarioId::B).scenario, "B");
        assert_eq!(comparison.b.horizon(), 20);

        // Same year-1 figures, diverging afterwards
        assert_eq!(comparison.a.totals.total_cash_flow[0], comparison.b.totals.total_cash_flow[0]);
        assert!(comparison.b.totals.total_cash_flow[5] > comparison.a.totals.total_cash_flow[5]);

        let rows = comparison.aligned_rows();
        assert_eq!(rows.len(), 20);
        assert!(rows[14].total_cash_flow_a.is_some());
        assert!(rows[15].total_cash_flow_a.is_none());
        assert!(rows[19].after_tax_cash_flow_b.is_some());
    }

    #[test]
    fn test_run_scenario_selects_by_id() {
        let properties = portfolio();
        let mut scenarios = ScenarioSet::default();
        scenarios.b.projection_horizon_years = 5;

        let result = ProjectionRunner::new(&properties).run_scenario(&scenarios, ScenarioId::B);
        assert_eq!(result.scenario, "B");
        assert_eq!(result.horizon(), 5);
    }
}
