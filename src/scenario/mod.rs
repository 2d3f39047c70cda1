//! Scenario inputs, validation and loading

mod data;
mod validate;
pub mod loader;

pub use data::{
    ContributionPhase, Escalation, InflationMode, InflationSettings, LumpSumEvent, PhaseOverlap,
    ScenarioInput,
};
pub use validate::{validate_scenario, MAX_HORIZON_YEARS};
pub use loader::{load_lump_sums, load_phases, load_scenario, load_scenario_from_reader};
