//! CSV-based scenario loader
//!
//! One row per scenario, keyed by the `scenario` column (A or B). Blank
//! cells keep the default assumption; scenarios absent from the file keep
//! their defaults entirely.

use std::path::Path;

use log::{info, warn};

use super::{ScenarioId, ScenarioParameters, ScenarioSet};
use crate::errors::Result;

/// Default path to the scenario table
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    scenario: String,
    #[serde(default)]
    rent_indexation: Option<f64>,
    #[serde(default)]
    insurance_indexation: Option<f64>,
    #[serde(default)]
    condo_fees_indexation: Option<f64>,
    #[serde(default)]
    property_tax_indexation: Option<f64>,
    #[serde(default)]
    loan_insurance_indexation: Option<f64>,
    #[serde(default)]
    other_indexation: Option<f64>,
    #[serde(default)]
    marginal_tax_rate: Option<f64>,
    #[serde(default)]
    social_levy_rate: Option<f64>,
    #[serde(default)]
    projection_horizon_years: Option<u32>,
}

impl CsvRow {
    fn apply_to(self, params: &mut ScenarioParameters) {
        let fields = [
            (self.rent_indexation, &mut params.rent_indexation),
            (self.insurance_indexation, &mut params.insurance_indexation),
            (self.condo_fees_indexation, &mut params.condo_fees_indexation),
            (self.property_tax_indexation, &mut params.property_tax_indexation),
            (self.loan_insurance_indexation, &mut params.loan_insurance_indexation),
            (self.other_indexation, &mut params.other_indexation),
            (self.marginal_tax_rate, &mut params.marginal_tax_rate),
            (self.social_levy_rate, &mut params.social_levy_rate),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(horizon) = self.projection_horizon_years {
            params.projection_horizon_years = horizon;
        }
    }
}

/// Load both scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<ScenarioSet> {
    let path = path.as_ref();
    info!("Loading scenarios from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from the given file, or defaults when it does not exist
pub fn load_scenarios_or_default<P: AsRef<Path>>(path: P) -> Result<ScenarioSet> {
    let path = path.as_ref();
    if path.exists() {
        load_scenarios(path)
    } else {
        info!("No scenario file at {}; using default assumptions", path.display());
        Ok(ScenarioSet::default())
    }
}

/// Load scenarios from any reader
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<ScenarioSet> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut set = ScenarioSet::default();
    let mut seen = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let id: ScenarioId = row.scenario.parse()?;
        if seen.contains(&id) {
            warn!("Scenario {} defined more than once; last row wins", id);
        }
        seen.push(id);
        row.apply_to(set.get_mut(id));
    }

    set.a.validate()?;
    set.b.validate()?;

    info!(
        "Scenarios loaded: A horizon {} years, B horizon {} years",
        set.a.projection_horizon_years, set.b.projection_horizon_years
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LoadError;

    const HEADER: &str = "scenario,rent_indexation,insurance_indexation,condo_fees_indexation,\
        property_tax_indexation,loan_insurance_indexation,other_indexation,\
        marginal_tax_rate,social_levy_rate,projection_horizon_years\n";

    #[test]
    fn test_load_both_scenarios() {
        let data = format!(
            "{}A,0.02,0.01,0.01,0.015,0.01,0.01,0.11,0.172,20\n\
             B,0.0,0.02,0.03,0.03,0.02,0.02,0.41,0.172,10\n",
            HEADER
        );
        let set = load_scenarios_from_reader(data.as_bytes()).unwrap();

        assert_eq!(set.a.name, "A");
        assert_eq!(set.a.rent_indexation, 0.02);
        assert_eq!(set.a.projection_horizon_years, 20);
        assert_eq!(set.b.name, "B");
        assert_eq!(set.b.marginal_tax_rate, 0.41);
        assert_eq!(set.b.condo_fees_indexation, 0.03);
        assert_eq!(set.b.projection_horizon_years, 10);
    }

    #[test]
    fn test_missing_scenario_and_blank_cells_keep_defaults() {
        let data = format!("{}B,0.03,,,,,,,,\n", HEADER);
        let set = load_scenarios_from_reader(data.as_bytes()).unwrap();

        assert_eq!(set.a, ScenarioParameters::named("A"));
        assert_eq!(set.b.rent_indexation, 0.03);
        assert_eq!(set.b.marginal_tax_rate, 0.30);
        assert_eq!(set.b.projection_horizon_years, 15);
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        let data = format!("{}C,0.03,,,,,,,,\n", HEADER);
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownScenario(ref s) if s == "C"));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let data = format!("{}A,,,,,,,,,0\n", HEADER);
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidScenario { .. }));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let set = load_scenarios_or_default("does/not/exist/scenarios.csv").unwrap();
        assert_eq!(set, ScenarioSet::default());
    }
}
