//! Year-by-year projection of rental cash flow, taxable income and taxation

mod lines;
mod engine;
mod aggregate;
mod cashflows;

pub use lines::IndexedLines;
pub use engine::PropertyProjector;
pub use aggregate::aggregate;
pub use cashflows::{
    PropertyYearRow, PropertySeries, PortfolioTotals, ProjectionResult, ProjectionSummary,
    SummaryRow,
};
