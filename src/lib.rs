//! Rental Projection - multi-property real-estate investment projections
//!
//! This library provides:
//! - Constant-annuity loan amortization schedules
//! - Per-property cash flow and taxable income with per-line indexation
//! - Portfolio aggregation with flat-rate income tax and social levy
//! - Side-by-side A/B scenario runs
//! - CSV loading of portfolios and scenarios, CSV export of results

pub mod errors;
pub mod loan;
pub mod property;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod export;

// Re-export commonly used types
pub use property::{Property, Charges, ChargeCategory};
pub use loan::{AmortizationRow, AmortizationSchedule};
pub use assumptions::{ScenarioParameters, ScenarioId, ScenarioSet};
pub use projection::{PropertyProjector, ProjectionResult, PortfolioTotals, PropertySeries};
pub use scenario::{ProjectionRunner, ScenarioComparison};
pub use errors::{LoadError, ExportError};
