//! Amortization schedule for a constant-annuity loan
//!
//! Rates are annual fractions converted to a flat monthly rate (`annual / 12`).
//! Durations are signed so that zero or negative terms degrade to an empty
//! schedule with a zero payment instead of an error.

use serde::{Deserialize, Serialize};

/// Monthly rates closer to zero than this use straight-line repayment
const ZERO_RATE_EPSILON: f64 = 1e-12;

/// Number of monthly instalments for a term in years (0 when the term is not positive)
fn term_months(duration_years: i64) -> u32 {
    if duration_years <= 0 {
        0
    } else {
        u32::try_from(duration_years.saturating_mul(12)).unwrap_or(u32::MAX)
    }
}

/// Monthly payment of a constant-annuity loan (excluding borrower insurance)
///
/// * `n <= 0` months: 0
/// * monthly rate within epsilon of 0: `principal / n`
/// * otherwise: `principal * r / (1 - (1 + r)^-n)`
pub fn monthly_payment(principal: f64, annual_rate: f64, duration_years: i64) -> f64 {
    let n = term_months(duration_years);
    if n == 0 {
        return 0.0;
    }

    let r = annual_rate / 12.0;
    if r.abs() < ZERO_RATE_EPSILON {
        return principal / n as f64;
    }

    principal * r / (1.0 - (1.0 + r).powf(-(n as f64)))
}

/// One month of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Month index over the whole loan (1-indexed)
    pub month_index: u32,

    /// Loan year (1-indexed)
    pub year: u32,

    /// Month within the loan year (1-12)
    #[serde(rename = "month")]
    pub month_in_year: u32,

    pub payment: f64,
    pub interest: f64,
    pub principal: f64,

    /// Outstanding balance after this month's payment
    pub balance: f64,
}

/// Generate the month-by-month schedule
///
/// The principal component is floored at zero and capped at the outstanding
/// balance, so the balance never goes negative. Interest is not floored.
pub fn generate_schedule(
    principal: f64,
    annual_rate: f64,
    duration_years: i64,
) -> Vec<AmortizationRow> {
    let n = term_months(duration_years);
    if n == 0 {
        return Vec::new();
    }

    let r = annual_rate / 12.0;
    let payment = monthly_payment(principal, annual_rate, duration_years);

    let mut rows = Vec::with_capacity(n as usize);
    let mut balance = principal;

    for i in 1..=n {
        let interest = balance * r;
        let principal_paid = (payment - interest).max(0.0).min(balance.max(0.0));
        balance = (balance - principal_paid).max(0.0);

        rows.push(AmortizationRow {
            month_index: i,
            year: (i - 1) / 12 + 1,
            month_in_year: (i - 1) % 12 + 1,
            payment,
            interest,
            principal: principal_paid,
            balance,
        });
    }

    rows
}

/// Complete schedule for one loan, with interest pre-grouped by loan year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: f64,
    pub annual_rate: f64,
    pub duration_years: u32,
    pub monthly_payment: f64,
    pub rows: Vec<AmortizationRow>,

    /// Total interest per loan year, index 0 = year 1
    interest_by_year: Vec<f64>,
}

impl AmortizationSchedule {
    /// Build the schedule and its yearly interest totals in one pass
    pub fn new(principal: f64, annual_rate: f64, duration_years: u32) -> Self {
        let duration = i64::from(duration_years);
        let rows = generate_schedule(principal, annual_rate, duration);

        let mut interest_by_year = vec![0.0; duration_years as usize];
        for row in &rows {
            if let Some(total) = interest_by_year.get_mut(row.year as usize - 1) {
                *total += row.interest;
            }
        }

        Self {
            principal,
            annual_rate,
            duration_years,
            monthly_payment: monthly_payment(principal, annual_rate, duration),
            rows,
            interest_by_year,
        }
    }

    /// Interest paid during loan year `year` (1-indexed); 0 outside the term
    pub fn interest_in_year(&self, year: u32) -> f64 {
        if year == 0 {
            return 0.0;
        }
        self.interest_by_year
            .get(year as usize - 1)
            .copied()
            .unwrap_or(0.0)
    }

    /// Annual debt service (12 monthly payments)
    pub fn annual_payment(&self) -> f64 {
        self.monthly_payment * 12.0
    }
}
