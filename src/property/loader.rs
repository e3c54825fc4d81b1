//! Load a property portfolio from CSV
//!
//! Columns: name, purchase_price, loan_principal, loan_duration_years,
//! annual_rate, annual_rent, insurance, property_tax, condo_fees,
//! loan_insurance, other. Rates are fractions. Empty cells read as 0 and an
//! empty name becomes `Property<n>` (1-based row position).

use std::collections::HashSet;
use std::path::Path;

use csv::Reader;
use log::{debug, info, warn};

use super::{Charges, Property};
use crate::errors::{LoadError, Result};

/// Default portfolio file
pub const DEFAULT_PORTFOLIO_PATH: &str = "data/properties.csv";

/// Raw CSV row; every cell may be blank
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    purchase_price: Option<f64>,
    #[serde(default)]
    loan_principal: Option<f64>,
    #[serde(default)]
    loan_duration_years: Option<f64>,
    #[serde(default)]
    annual_rate: Option<f64>,
    #[serde(default)]
    annual_rent: Option<f64>,
    #[serde(default)]
    insurance: Option<f64>,
    #[serde(default)]
    property_tax: Option<f64>,
    #[serde(default)]
    condo_fees: Option<f64>,
    #[serde(default)]
    loan_insurance: Option<f64>,
    #[serde(default)]
    other: Option<f64>,
}

/// Blank reads as 0; negative or non-finite amounts are rejected
fn amount(row: usize, field: &'static str, value: Option<f64>) -> Result<f64> {
    let value = value.unwrap_or(0.0);
    if !value.is_finite() {
        return Err(LoadError::InvalidField { row, field, value: value.to_string() });
    }
    if value < 0.0 {
        return Err(LoadError::NegativeAmount { row, field, value });
    }
    Ok(value)
}

impl CsvRow {
    fn to_property(self, row: usize) -> Result<Property> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Property{}", row));

        let annual_rate = self.annual_rate.unwrap_or(0.0);
        if !annual_rate.is_finite() {
            return Err(LoadError::InvalidField {
                row,
                field: "annual_rate",
                value: annual_rate.to_string(),
            });
        }

        // Fractional years are truncated
        let duration = amount(row, "loan_duration_years", self.loan_duration_years)?;
        let loan_duration_years = duration.trunc().min(u32::MAX as f64) as u32;

        let charges = Charges {
            insurance: amount(row, "insurance", self.insurance)?,
            condo_fees: amount(row, "condo_fees", self.condo_fees)?,
            property_tax: amount(row, "property_tax", self.property_tax)?,
            loan_insurance: amount(row, "loan_insurance", self.loan_insurance)?,
            other: amount(row, "other", self.other)?,
        };

        Ok(Property::new(
            name,
            amount(row, "purchase_price", self.purchase_price)?,
            amount(row, "loan_principal", self.loan_principal)?,
            loan_duration_years,
            annual_rate,
            amount(row, "annual_rent", self.annual_rent)?,
            charges,
        ))
    }
}

/// Load all properties from a CSV file
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Vec<Property>> {
    let path = path.as_ref();
    info!("Loading portfolio from {}", path.display());
    let reader = Reader::from_path(path)?;
    collect_properties(reader)
}

/// Load properties from any reader (e.g., string buffer)
pub fn load_properties_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Property>> {
    collect_properties(Reader::from_reader(reader))
}

fn collect_properties<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Property>> {
    let mut properties = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let property = row.to_property(i + 1)?;
        debug!(
            "Loaded {}: loan {:.2} over {} years, payment {:.2}",
            property.name,
            property.loan_principal,
            property.loan_duration_years,
            property.monthly_payment()
        );
        properties.push(property);
    }

    let mut seen = HashSet::new();
    for property in &properties {
        if !seen.insert(property.name.as_str()) {
            warn!("Duplicate property name {:?}; exported tables may collide", property.name);
        }
    }

    info!("Loaded {} properties", properties.len());
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const HEADER: &str = "name,purchase_price,loan_principal,loan_duration_years,annual_rate,\
        annual_rent,insurance,property_tax,condo_fees,loan_insurance,other\n";

    #[test]
    fn test_load_properties_from_reader() {
        let data = format!(
            "{}T2 Lyon,150000,100000,20,0.03,9600,200,900,600,150,100\n\
             Studio,80000,0,0,0,6000,,,,,\n",
            HEADER
        );
        let properties = load_properties_from_reader(data.as_bytes()).unwrap();

        assert_eq!(properties.len(), 2);

        let lyon = &properties[0];
        assert_eq!(lyon.name, "T2 Lyon");
        assert_eq!(lyon.loan_duration_years, 20);
        assert_eq!(lyon.charges.property_tax, 900.0);
        assert_eq!(lyon.charges.condo_fees, 600.0);
        assert_abs_diff_eq!(lyon.monthly_payment(), 554.60, epsilon = 0.005);

        let studio = &properties[1];
        assert_eq!(studio.charges, Charges::default());
        assert_eq!(studio.monthly_payment(), 0.0);
    }

    #[test]
    fn test_blank_name_gets_positional_default() {
        let data = format!("{},100000,0,0,0,7200,0,0,0,0,0\n", HEADER);
        let properties = load_properties_from_reader(data.as_bytes()).unwrap();
        assert_eq!(properties[0].name, "Property1");
    }

    #[test]
    fn test_fractional_duration_truncated() {
        let data = format!("{}A,100000,50000,15.9,0.02,7200,0,0,0,0,0\n", HEADER);
        let properties = load_properties_from_reader(data.as_bytes()).unwrap();
        assert_eq!(properties[0].loan_duration_years, 15);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let data = format!("{}A,100000,-5,10,0.02,7200,0,0,0,0,0\n", HEADER);
        let err = load_properties_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::NegativeAmount { row: 1, field: "loan_principal", .. }));
    }

    #[test]
    fn test_non_numeric_cell_rejected() {
        let data = format!("{}A,abc,0,0,0,7200,0,0,0,0,0\n", HEADER);
        let err = load_properties_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_empty_portfolio() {
        let properties = load_properties_from_reader(HEADER.as_bytes()).unwrap();
        assert!(properties.is_empty());
    }
}
