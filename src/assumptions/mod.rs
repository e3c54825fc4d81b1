//! Scenario assumptions: indexation rates, tax rates and projection horizon

mod parameters;
pub mod loader;

pub use parameters::{ScenarioParameters, ScenarioId, ScenarioSet};
pub use loader::{
    load_scenarios, load_scenarios_from_reader, load_scenarios_or_default, DEFAULT_SCENARIOS_PATH,
};
