//! Running state of a portfolio during projection

use crate::scenario::ScenarioInput;
use super::points::ProjectionPoint;

/// State of the portfolio at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (0 = opening balance, then 1-indexed)
    pub projection_month: u32,

    /// Year of the horizon (1-indexed, 0 before the first month)
    pub year: u32,

    /// Month within the year (1-12, 0 before the first month)
    pub month_in_year: u32,

    /// Attained age
    pub attained_age: u32,

    /// Nominal portfolio value
    pub balance: f64,

    /// Investment growth credited this month
    pub growth: f64,

    /// Contribution applied this month
    pub contribution: f64,

    /// Net lump sum applied this month
    pub lump_sum: f64,

    /// Cumulative monthly contributions (excludes the initial amount and lump sums)
    pub contributed: f64,

    /// Cumulative net lump sums
    pub lump_sums: f64,

    /// Cumulative inflation factor since month 0
    pub inflation_factor: f64,
}

impl ProjectionState {
    /// Initialize state from a scenario at projection start
    pub fn from_scenario(scenario: &ScenarioInput) -> Self {
        Self {
            projection_month: 0,
            year: 0,
            month_in_year: 0,
            attained_age: scenario.current_age,
            balance: scenario.initial_amount,
            growth: 0.0,
            contribution: 0.0,
            lump_sum: 0.0,
            contributed: 0.0,
            lump_sums: 0.0,
            inflation_factor: 1.0,
        }
    }

    /// Advance to next month and clear the per-month flows
    pub fn advance_month(&mut self, scenario: &ScenarioInput) {
        self.projection_month += 1;

        self.year = scenario.year(self.projection_month);
        self.month_in_year = scenario.month_in_year(self.projection_month);
        self.attained_age = scenario.attained_age(self.projection_month);

        self.growth = 0.0;
        self.contribution = 0.0;
        self.lump_sum = 0.0;
    }

    /// Balance in today's money
    pub fn real_balance(&self) -> f64 {
        self.balance / self.inflation_factor
    }

    /// Snapshot the state as an output point
    pub fn to_point(&self) -> ProjectionPoint {
        ProjectionPoint {
            month: self.projection_month,
            year: self.year,
            month_in_year: self.month_in_year,
            attained_age: self.attained_age,
            nominal_value: self.balance,
            real_value: self.real_balance(),
            inflation_factor: self.inflation_factor,
            growth: self.growth,
            contribution: self.contribution,
            lump_sum: self.lump_sum,
            contributed: self.contributed,
            lump_sums: self.lump_sums,
        }
    }
}
