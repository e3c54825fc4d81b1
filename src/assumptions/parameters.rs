//! Scenario parameters and the A/B pair

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LoadError;
use crate::property::ChargeCategory;

/// Which of the two scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    A,
    B,
}

impl ScenarioId {
    pub fn other(&self) -> ScenarioId {
        match self {
            ScenarioId::A => ScenarioId::B,
            ScenarioId::B => ScenarioId::A,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::A => "A",
            ScenarioId::B => "B",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(ScenarioId::A),
            "B" | "b" => Ok(ScenarioId::B),
            other => Err(LoadError::UnknownScenario(other.to_string())),
        }
    }
}

/// Economic and tax assumptions for one projection run
///
/// All rates are annual fractions. Instances are plain values: a projection
/// takes them by reference and never keeps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Label used in table headers ("A", "B")
    pub name: String,

    pub rent_indexation: f64,
    pub insurance_indexation: f64,
    pub condo_fees_indexation: f64,
    pub property_tax_indexation: f64,
    pub loan_insurance_indexation: f64,
    pub other_indexation: f64,

    /// Marginal income tax rate applied to positive portfolio taxable income
    pub marginal_tax_rate: f64,

    /// Social levy rate applied to positive portfolio taxable income
    pub social_levy_rate: f64,

    /// Number of projected years
    pub projection_horizon_years: u32,
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self {
            name: "A".to_string(),
            rent_indexation: 0.015,
            insurance_indexation: 0.010,
            condo_fees_indexation: 0.010,
            property_tax_indexation: 0.012,
            loan_insurance_indexation: 0.010,
            other_indexation: 0.010,
            marginal_tax_rate: 0.30,
            social_levy_rate: 0.172,
            projection_horizon_years: 15,
        }
    }
}

impl ScenarioParameters {
    /// Default assumptions under the given label
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Indexation rate for a charge category
    pub fn charge_indexation(&self, category: ChargeCategory) -> f64 {
        match category {
            ChargeCategory::Insurance => self.insurance_indexation,
            ChargeCategory::CondoFees => self.condo_fees_indexation,
            ChargeCategory::PropertyTax => self.property_tax_indexation,
            ChargeCategory::LoanInsurance => self.loan_insurance_indexation,
            ChargeCategory::Other => self.other_indexation,
        }
    }

    /// Projected years, 1-indexed
    pub fn years(&self) -> Vec<u32> {
        (1..=self.projection_horizon_years).collect()
    }

    /// Reject non-finite rates and an empty horizon
    pub fn validate(&self) -> Result<(), LoadError> {
        let rates = [
            ("rent_indexation", self.rent_indexation),
            ("insurance_indexation", self.insurance_indexation),
            ("condo_fees_indexation", self.condo_fees_indexation),
            ("property_tax_indexation", self.property_tax_indexation),
            ("loan_insurance_indexation", self.loan_insurance_indexation),
            ("other_indexation", self.other_indexation),
            ("marginal_tax_rate", self.marginal_tax_rate),
            ("social_levy_rate", self.social_levy_rate),
        ];

        if let Some((field, value)) = rates.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LoadError::InvalidScenario {
                scenario: self.name.clone(),
                reason: format!("{} is not a finite number ({})", field, value),
            });
        }

        if self.projection_horizon_years == 0 {
            return Err(LoadError::InvalidScenario {
                scenario: self.name.clone(),
                reason: "projection horizon must be at least one year".to_string(),
            });
        }

        Ok(())
    }
}

/// The two independently configurable scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub a: ScenarioParameters,
    pub b: ScenarioParameters,
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self {
            a: ScenarioParameters::named("A"),
            b: ScenarioParameters::named("B"),
        }
    }
}

impl ScenarioSet {
    pub fn get(&self, id: ScenarioId) -> &ScenarioParameters {
        match id {
            ScenarioId::A => &self.a,
            ScenarioId::B => &self.b,
        }
    }

    /// Edit one scenario; the other is untouched
    pub fn get_mut(&mut self, id: ScenarioId) -> &mut ScenarioParameters {
        match id {
            ScenarioId::A => &mut self.a,
            ScenarioId::B => &mut self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ScenarioParameters::default();
        assert_eq!(params.rent_indexation, 0.015);
        assert_eq!(params.property_tax_indexation, 0.012);
        assert_eq!(params.social_levy_rate, 0.172);
        assert_eq!(params.projection_horizon_years, 15);
        assert_eq!(params.years(), (1..=15).collect::<Vec<_>>());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_charge_indexation_lookup() {
        let mut params = ScenarioParameters::default();
        params.condo_fees_indexation = 0.04;
        assert_eq!(params.charge_indexation(ChargeCategory::CondoFees), 0.04);
        assert_eq!(params.charge_indexation(ChargeCategory::PropertyTax), 0.012);
    }

    #[test]
    fn test_scenarios_are_independent() {
        let mut set = ScenarioSet::default();
        set.get_mut(ScenarioId::B).rent_indexation = 0.03;

        assert_eq!(set.a.rent_indexation, 0.015);
        assert_eq!(set.b.rent_indexation, 0.03);
        assert_eq!(set.get(ScenarioId::A.other()).name, "B");
    }

    #[test]
    fn test_validate_rejects_zero_horizon() {
        let params = ScenarioParameters {
            projection_horizon_years: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(LoadError::InvalidScenario { .. })));
    }

    #[test]
    fn test_validate_rejects_nan_rate() {
        let params = ScenarioParameters {
            marginal_tax_rate: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_scenario_id_parsing() {
        assert_eq!("A".parse::<ScenarioId>().unwrap(), ScenarioId::A);
        assert_eq!(" b ".parse::<ScenarioId>().unwrap(), ScenarioId::B);
        assert!("C".parse::<ScenarioId>().is_err());
        assert_eq!(ScenarioId::A.other(), ScenarioId::B);
    }
}
