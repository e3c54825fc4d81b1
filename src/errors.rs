//! Errors raised at the input and export boundaries
//!
//! The numeric core never fails; everything here comes from reading or
//! writing tables.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid value for {field}: {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: {field} must be non-negative, got {value}")]
    NegativeAmount {
        row: usize,
        field: &'static str,
        value: f64,
    },

    #[error("scenario {scenario}: {reason}")]
    InvalidScenario { scenario: String, reason: String },

    #[error("unknown scenario: {0:?} (expected A or B)")]
    UnknownScenario(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;
