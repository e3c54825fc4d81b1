//! Property data structures

use serde::{Deserialize, Serialize};

use crate::loan::{AmortizationRow, AmortizationSchedule};

/// Recurring charge categories, each indexed at its own rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    Insurance,
    CondoFees,
    PropertyTax,
    LoanInsurance,
    Other,
}

impl ChargeCategory {
    pub const ALL: [ChargeCategory; 5] = [
        ChargeCategory::Insurance,
        ChargeCategory::CondoFees,
        ChargeCategory::PropertyTax,
        ChargeCategory::LoanInsurance,
        ChargeCategory::Other,
    ];

    /// Property tax is deducted on its own line, not as an operating charge
    pub fn is_operating(&self) -> bool {
        !matches!(self, ChargeCategory::PropertyTax)
    }
}

/// Year-1 base amounts of the recurring charges
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Charges {
    pub insurance: f64,
    pub condo_fees: f64,
    pub property_tax: f64,
    pub loan_insurance: f64,
    pub other: f64,
}

impl Charges {
    pub fn get(&self, category: ChargeCategory) -> f64 {
        match category {
            ChargeCategory::Insurance => self.insurance,
            ChargeCategory::CondoFees => self.condo_fees,
            ChargeCategory::PropertyTax => self.property_tax,
            ChargeCategory::LoanInsurance => self.loan_insurance,
            ChargeCategory::Other => self.other,
        }
    }
}

/// A rental property with its financing
///
/// The monthly payment and amortization schedule are derived once at
/// construction. Editing a property means building a new one.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    /// Display/export key; uniqueness is not enforced
    pub name: String,

    pub purchase_price: f64,

    pub loan_principal: f64,

    /// Loan term in years; 0 means no active loan
    pub loan_duration_years: u32,

    /// Annual loan rate as a fraction (0.035 = 3.5%)
    pub annual_rate: f64,

    /// Year-1 annual rent
    pub annual_rent: f64,

    /// Year-1 recurring charges
    pub charges: Charges,

    #[serde(skip)]
    schedule: AmortizationSchedule,
}

impl Property {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        purchase_price: f64,
        loan_principal: f64,
        loan_duration_years: u32,
        annual_rate: f64,
        annual_rent: f64,
        charges: Charges,
    ) -> Self {
        let schedule = AmortizationSchedule::new(loan_principal, annual_rate, loan_duration_years);
        Self {
            name: name.into(),
            purchase_price,
            loan_principal,
            loan_duration_years,
            annual_rate,
            annual_rent,
            charges,
            schedule,
        }
    }

    /// Property bought without financing
    pub fn cash_purchase(
        name: impl Into<String>,
        purchase_price: f64,
        annual_rent: f64,
        charges: Charges,
    ) -> Self {
        Self::new(name, purchase_price, 0.0, 0, 0.0, annual_rent, charges)
    }

    /// Monthly loan payment (0 without a loan)
    pub fn monthly_payment(&self) -> f64 {
        self.schedule.monthly_payment
    }

    pub fn schedule(&self) -> &AmortizationSchedule {
        &self.schedule
    }

    /// Flat monthly amortization table, independent of any projection
    pub fn amortization_rows(&self) -> &[AmortizationRow] {
        &self.schedule.rows
    }

    /// Whether debt service applies in projection year `year` (1-indexed)
    pub fn has_debt_service(&self, year: u32) -> bool {
        year >= 1 && year <= self.loan_duration_years
    }
}
