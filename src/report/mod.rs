//! Plain-text report and CSV export for a completed projection
//!
//! The report reads the scenario and its result as a snapshot; it never reruns
//! the engine.

mod csv_out;
pub mod format;

pub use csv_out::{write_csv, write_csv_file};

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionResult, FOUR_PERCENT_RULE};
use crate::scenario::{Escalation, InflationMode, PhaseOverlap, ScenarioInput};
use format::{currency, percent};

/// Investment growth report: inputs, summary and a yearly table
pub struct Report<'a> {
    scenario: &'a ScenarioInput,
    result: &'a ProjectionResult,
    config: &'a ProjectionConfig,
}

impl<'a> Report<'a> {
    /// `config` must be the one the result was projected with
    pub fn new(
        scenario: &'a ScenarioInput,
        result: &'a ProjectionResult,
        config: &'a ProjectionConfig,
    ) -> Self {
        Self { scenario, result, config }
    }

    /// Render and write the report to a file
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_string())?;
        log::info!("Wrote report to {}", path.as_ref().display());
        Ok(())
    }

    fn inflation_description(&self) -> String {
        let inflation = &self.scenario.inflation;
        match inflation.mode {
            InflationMode::Annual => format!("{} per year", percent(inflation.rate)),
            InflationMode::TotalOverPeriod => format!(
                "{} total over the investment period of {} years",
                percent(inflation.rate),
                self.scenario.horizon_years()
            ),
        }
    }

    fn write_inputs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.scenario;
        writeln!(f, "Input Parameters")?;
        writeln!(f, "  Initial Investment:      {}", currency(s.initial_amount))?;
        writeln!(f, "  Starting Age:            {}", s.current_age)?;
        writeln!(f, "  End Age:                 {}", s.end_age)?;
        writeln!(f, "  Annual Rate of Return:   {}", percent(s.annual_return))?;
        writeln!(f, "  Compounding:             {}", self.config.compounding.describe())?;
        writeln!(f, "  Inflation:               {}", self.inflation_description())?;
        if self.config.phase_overlap == PhaseOverlap::LatestStartWins {
            writeln!(f, "  Overlapping Phases:      latest-starting phase wins")?;
        }
        writeln!(f)?;

        writeln!(f, "Contribution Phases")?;
        if s.phases.is_empty() {
            writeln!(f, "  No contribution phases defined.")?;
        }
        for (i, phase) in s.phases.iter().enumerate() {
            let increase = match phase.escalation {
                Escalation::None => String::new(),
                Escalation::Percent(rate) => format!(", increasing {} per year", percent(rate)),
                Escalation::Amount(step) => format!(", increasing {} per year", currency(step)),
            };
            writeln!(
                f,
                "  Phase {}: Ages {} to {}, {}/month{}",
                i + 1,
                phase.start_age,
                phase.end_age.saturating_sub(1),
                currency(phase.monthly_amount),
                increase
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Lump Sums")?;
        if s.lump_sums.is_empty() {
            writeln!(f, "  No lump sums.")?;
        }
        for (i, event) in s.lump_sums.iter().enumerate() {
            let kind = if event.is_withdrawal() { "withdrawal" } else { "addition" };
            writeln!(
                f,
                "  Lump Sum {}: At Age {}, {} ({})",
                i + 1,
                event.age,
                currency(event.amount),
                kind
            )?;
        }
        writeln!(f)
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.result.summary();
        let rule = percent(FOUR_PERCENT_RULE);
        writeln!(f, "Results Summary")?;
        writeln!(f, "  Final Nominal Value:              {}", currency(summary.final_nominal))?;
        writeln!(f, "  Final Inflation-Adjusted Value:   {}", currency(summary.final_real))?;
        writeln!(f, "  Total Monthly Contributions:      {}", currency(summary.total_contributed))?;
        writeln!(f, "  Total Lump Sums (net):            {}", currency(summary.total_lump_sums))?;
        writeln!(f, "  Total Invested (initial + all):   {}", currency(summary.total_invested))?;
        writeln!(f, "  Investment Growth:                {}", currency(summary.total_growth))?;
        writeln!(f, "  Annual Income ({} rule, nominal):  {}", rule, currency(summary.income_nominal))?;
        writeln!(f, "  Annual Income ({} rule, real):     {}", rule, currency(summary.income_real))?;
        writeln!(f)
    }

    fn write_yearly_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Year-End Values")?;
        writeln!(
            f,
            "{:>5} {:>5} {:>18} {:>18} {:>18}",
            "Year", "Age", "Nominal", "Inflation-Adj.", "Contributed"
        )?;
        writeln!(f, "{}", "-".repeat(68))?;
        for point in self.result.yearly().into_iter().skip(1) {
            writeln!(
                f,
                "{:>5} {:>5} {:>18} {:>18} {:>18}",
                point.year,
                point.attained_age + 1,
                currency(point.nominal_value),
                currency(point.real_value),
                currency(point.contributed)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Investment Growth Report")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        self.write_inputs(f)?;
        self.write_summary(f)?;
        self.write_yearly_table(f)
    }
}
