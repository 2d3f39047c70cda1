//! Load scenarios from JSON and contribution/lump-sum tables from CSV

use super::{ContributionPhase, Escalation, LumpSumEvent, ScenarioInput};
use crate::error::{ProjectionError, Result};
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row for a contribution phase table
///
/// Headers are accepted in either `StartAge` or `start_age` form.
/// `AnnualIncreasePct` is in percentage points (3 for 3%), unlike the JSON
/// `{"percent": 0.03}` escalation which is a fraction.
#[derive(Debug, serde::Deserialize)]
struct PhaseCsvRow {
    #[serde(rename = "StartAge", alias = "start_age")]
    start_age: u32,
    #[serde(rename = "EndAge", alias = "end_age")]
    end_age: u32,
    #[serde(rename = "MonthlyContribution", alias = "monthly_amount")]
    monthly_contribution: f64,
    #[serde(rename = "AnnualIncreasePct", alias = "annual_increase_pct", default)]
    annual_increase_pct: Option<f64>,
    #[serde(rename = "AnnualIncreaseAmount", alias = "annual_increase_amount", default)]
    annual_increase_amount: Option<f64>,
}

impl PhaseCsvRow {
    fn to_phase(self, line: usize) -> Result<ContributionPhase> {
        let pct = self.annual_increase_pct.filter(|v| *v != 0.0);
        let amount = self.annual_increase_amount.filter(|v| *v != 0.0);

        let escalation = match (pct, amount) {
            (None, None) => Escalation::None,
            (Some(p), None) => Escalation::Percent(p / 100.0),
            (None, Some(a)) => Escalation::Amount(a),
            (Some(_), Some(_)) => {
                return Err(ProjectionError::invalid(
                    format!("phases row {}", line),
                    "only one of AnnualIncreasePct and AnnualIncreaseAmount may be set",
                ))
            }
        };

        Ok(ContributionPhase {
            start_age: self.start_age,
            end_age: self.end_age,
            monthly_amount: self.monthly_contribution,
            escalation,
        })
    }
}

/// Raw CSV row for a lump-sum table
#[derive(Debug, serde::Deserialize)]
struct LumpSumCsvRow {
    #[serde(rename = "Age", alias = "age")]
    age: u32,
    #[serde(rename = "Amount", alias = "amount")]
    amount: f64,
}

/// Load a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioInput> {
    let file = File::open(path)?;
    load_scenario_from_reader(BufReader::new(file))
}

/// Load a scenario from any JSON reader
pub fn load_scenario_from_reader<R: Read>(reader: R) -> Result<ScenarioInput> {
    let scenario: ScenarioInput = serde_json::from_reader(reader)?;
    log::debug!(
        "Loaded scenario: ages {}-{}, {} phases, {} lump sums",
        scenario.current_age,
        scenario.end_age,
        scenario.phases.len(),
        scenario.lump_sums.len()
    );
    Ok(scenario)
}

/// Load contribution phases from a CSV file
pub fn load_phases<P: AsRef<Path>>(path: P) -> Result<Vec<ContributionPhase>> {
    let file = File::open(path)?;
    load_phases_from_reader(file)
}

/// Load contribution phases from any CSV reader
pub fn load_phases_from_reader<R: Read>(reader: R) -> Result<Vec<ContributionPhase>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut phases = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: PhaseCsvRow = result?;
        phases.push(row.to_phase(i + 1)?);
    }

    Ok(phases)
}

/// Load lump-sum events from a CSV file
pub fn load_lump_sums<P: AsRef<Path>>(path: P) -> Result<Vec<LumpSumEvent>> {
    let file = File::open(path)?;
    load_lump_sums_from_reader(file)
}

/// Load lump-sum events from any CSV reader
pub fn load_lump_sums_from_reader<R: Read>(reader: R) -> Result<Vec<LumpSumEvent>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut events = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LumpSumCsvRow = result?;
        events.push(LumpSumEvent::new(row.age, row.amount));
    }

    Ok(events)
}
