//! Income and charge lines compounded to a given projection year

use crate::assumptions::ScenarioParameters;
use crate::property::{ChargeCategory, Property};

/// Compound `base` at `rate` for `year - 1` years (year 1 is the base itself)
pub(crate) fn indexed(base: f64, rate: f64, year: u32) -> f64 {
    let periods = year.saturating_sub(1) as i32;
    base * (1.0 + rate).powi(periods)
}

/// Rent and each charge category for one property in one year
///
/// Every line ages at its own indexation rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedLines {
    pub year: u32,
    pub rent: f64,
    pub insurance: f64,
    pub condo_fees: f64,
    pub property_tax: f64,
    pub loan_insurance: f64,
    pub other: f64,
}

impl IndexedLines {
    pub fn for_year(property: &Property, params: &ScenarioParameters, year: u32) -> Self {
        let charge = |category: ChargeCategory| {
            indexed(
                property.charges.get(category),
                params.charge_indexation(category),
                year,
            )
        };

        Self {
            year,
            rent: indexed(property.annual_rent, params.rent_indexation, year),
            insurance: charge(ChargeCategory::Insurance),
            condo_fees: charge(ChargeCategory::CondoFees),
            property_tax: charge(ChargeCategory::PropertyTax),
            loan_insurance: charge(ChargeCategory::LoanInsurance),
            other: charge(ChargeCategory::Other),
        }
    }

    pub fn charge(&self, category: ChargeCategory) -> f64 {
        match category {
            ChargeCategory::Insurance => self.insurance,
            ChargeCategory::CondoFees => self.condo_fees,
            ChargeCategory::PropertyTax => self.property_tax,
            ChargeCategory::LoanInsurance => self.loan_insurance,
            ChargeCategory::Other => self.other,
        }
    }

    /// Operating charges: every category except property tax
    pub fn operating_charges(&self) -> f64 {
        ChargeCategory::ALL
            .iter()
            .filter(|c| c.is_operating())
            .map(|&c| self.charge(c))
            .sum()
    }
}
