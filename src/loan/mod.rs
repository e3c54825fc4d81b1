//! Constant-payment loan amortization

mod amortization;

pub use amortization::{monthly_payment, generate_schedule, AmortizationRow, AmortizationSchedule};
