//! Per-property projection engine

use crate::assumptions::ScenarioParameters;
use crate::property::Property;
use super::cashflows::{PropertySeries, PropertyYearRow};
use super::lines::IndexedLines;

/// Projects one property at a time under a fixed set of scenario parameters
#[derive(Debug, Clone, Copy)]
pub struct PropertyProjector<'a> {
    params: &'a ScenarioParameters,
}

impl<'a> PropertyProjector<'a> {
    pub fn new(params: &'a ScenarioParameters) -> Self {
        Self { params }
    }

    /// Cash-flow and taxable-income series over the scenario horizon
    pub fn project(&self, property: &Property) -> PropertySeries {
        let rows = self.project_detailed(property);
        PropertySeries::from_rows(property.name.clone(), &rows)
    }

    /// Full per-year breakdown over the scenario horizon
    pub fn project_detailed(&self, property: &Property) -> Vec<PropertyYearRow> {
        (1..=self.params.projection_horizon_years)
            .map(|year| self.project_year(property, year))
            .collect()
    }

    /// Single projected year (1-indexed)
    pub fn project_year(&self, property: &Property, year: u32) -> PropertyYearRow {
        let lines = IndexedLines::for_year(property, self.params, year);
        let operating_charges = lines.operating_charges();

        // No debt service or interest deduction once the loan term is over
        let (annuity, interest) = if property.has_debt_service(year) {
            (
                property.schedule().annual_payment(),
                property.schedule().interest_in_year(year),
            )
        } else {
            (0.0, 0.0)
        };

        // Interest is deductible, principal repayment is not
        let taxable_income = lines.rent - operating_charges - lines.property_tax - interest;
        // Cash flow carries the full debt service
        let cash_flow = lines.rent - operating_charges - lines.property_tax - annuity;

        PropertyYearRow {
            year,
            rent: lines.rent,
            operating_charges,
            property_tax: lines.property_tax,
            annuity,
            interest,
            taxable_income,
            cash_flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Charges;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn financed_property() -> Property {
        let charges = Charges {
            insurance: 200.0,
            condo_fees: 600.0,
            property_tax: 900.0,
            loan_insurance: 150.0,
            other: 100.0,
        };
        Property::new("T2 Lyon", 150_000.0, 100_000.0, 20, 0.03, 9_600.0, charges)
    }

    #[test]
    fn test_series_length_matches_horizon() {
        let params = ScenarioParameters {
            projection_horizon_years: 25,
            ..Default::default()
        };
        let series = PropertyProjector::new(&params).project(&financed_property());

        assert_eq!(series.name, "T2 Lyon");
        assert_eq!(series.cash_flow.len(), 25);
        assert_eq!(series.taxable_income.len(), 25);
    }

    #[test]
    fn test_unleveraged_property_follows_rent() {
        let params = ScenarioParameters {
            rent_indexation: 0.02,
            ..Default::default()
        };
        let property = Property::cash_purchase("Studio", 90_000.0, 12_000.0, Charges::default());
        let series = PropertyProjector::new(&params).project(&property);

        for (i, (cf, ti)) in series.cash_flow.iter().zip(&series.taxable_income).enumerate() {
            let expected = 12_000.0 * 1.02_f64.powi(i as i32);
            assert_relative_eq!(*cf, expected, max_relative = 1e-12);
            assert_relative_eq!(*ti, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_year_one_breakdown() {
        let params = ScenarioParameters::default();
        let property = financed_property();
        let row = PropertyProjector::new(&params).project_year(&property, 1);

        let annuity = property.monthly_payment() * 12.0;
        let interest: f64 = property
            .amortization_rows()
            .iter()
            .filter(|r| r.year == 1)
            .map(|r| r.interest)
            .sum();

        assert_eq!(row.operating_charges, 1_050.0);
        assert_eq!(row.property_tax, 900.0);
        assert_relative_eq!(row.annuity, annuity);
        assert_relative_eq!(row.interest, interest, max_relative = 1e-12);
        assert_relative_eq!(row.cash_flow, 9_600.0 - 1_050.0 - 900.0 - annuity);
        assert_relative_eq!(row.taxable_income, 9_600.0 - 1_050.0 - 900.0 - interest);
        // Principal repayment reduces cash flow but not taxable income
        assert!(row.taxable_income > row.cash_flow);
    }

    #[test]
    fn test_debt_service_stops_after_term() {
        let params = ScenarioParameters {
            projection_horizon_years: 25,
            ..Default::default()
        };
        let rows = PropertyProjector::new(&params).project_detailed(&financed_property());

        assert!(rows[19].annuity > 0.0);
        assert!(rows[19].interest > 0.0);
        for row in &rows[20..] {
            assert_eq!(row.annuity, 0.0);
            assert_eq!(row.interest, 0.0);
            assert_abs_diff_eq!(row.cash_flow, row.taxable_income, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let params = ScenarioParameters::default();
        let property = financed_property();
        let projector = PropertyProjector::new(&params);

        assert_eq!(projector.project(&property), projector.project(&property));
    }
}
