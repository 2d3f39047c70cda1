//! Projection output: the time series and its summary figures

use serde::{Deserialize, Serialize};

/// Share of the final portfolio assumed sustainable as annual income
pub const FOUR_PERCENT_RULE: f64 = 0.04;

/// A single point of the projection series, at the end of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    // Timing
    pub month: u32,
    pub year: u32,
    pub month_in_year: u32,
    pub attained_age: u32,

    // Values
    pub nominal_value: f64,
    pub real_value: f64,
    pub inflation_factor: f64,

    // Flows during this month
    pub growth: f64,
    pub contribution: f64,
    pub lump_sum: f64,

    // Running totals
    pub contributed: f64,
    pub lump_sums: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Opening balance followed by one point per simulated month
    pub points: Vec<ProjectionPoint>,

    pub initial_amount: f64,
    pub final_nominal: f64,
    pub final_real: f64,

    /// Sum of monthly contributions actually applied
    pub total_contributed: f64,

    /// Net of all lump sums applied (withdrawals negative)
    pub total_lump_sums: f64,

    /// 4% rule annual income on the final nominal value
    pub income_nominal: f64,

    /// 4% rule annual income on the final real value
    pub income_real: f64,
}

impl ProjectionResult {
    pub fn new(initial_amount: f64) -> Self {
        Self {
            points: Vec::new(),
            initial_amount,
            final_nominal: initial_amount,
            final_real: initial_amount,
            total_contributed: 0.0,
            total_lump_sums: 0.0,
            income_nominal: initial_amount * FOUR_PERCENT_RULE,
            income_real: initial_amount * FOUR_PERCENT_RULE,
        }
    }

    /// Add a point and roll the final figures forward to it
    pub fn add_point(&mut self, point: ProjectionPoint) {
        self.final_nominal = point.nominal_value;
        self.final_real = point.real_value;
        self.total_contributed = point.contributed;
        self.total_lump_sums = point.lump_sums;
        self.income_nominal = point.nominal_value * FOUR_PERCENT_RULE;
        self.income_real = point.real_value * FOUR_PERCENT_RULE;
        self.points.push(point);
    }

    pub fn final_point(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }

    /// Number of simulated months (excludes the opening point)
    pub fn months(&self) -> u32 {
        self.points.len().saturating_sub(1) as u32
    }

    /// Opening point plus the point at the end of every whole year
    pub fn yearly(&self) -> Vec<&ProjectionPoint> {
        self.points.iter().filter(|p| p.month % 12 == 0).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_growth: f64 = self.points.iter().map(|p| p.growth).sum();
        let total_invested = self.initial_amount + self.total_contributed + self.total_lump_sums;
        let final_inflation_factor = self.final_point().map(|p| p.inflation_factor).unwrap_or(1.0);

        ProjectionSummary {
            total_months: self.months(),
            initial_amount: self.initial_amount,
            total_contributed: self.total_contributed,
            total_lump_sums: self.total_lump_sums,
            total_invested,
            total_growth,
            final_nominal: self.final_nominal,
            final_real: self.final_real,
            final_inflation_factor,
            income_nominal: self.income_nominal,
            income_real: self.income_real,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub initial_amount: f64,
    pub total_contributed: f64,
    pub total_lump_sums: f64,
    /// Initial amount + contributions + net lump sums
    pub total_invested: f64,
    pub total_growth: f64,
    pub final_nominal: f64,
    pub final_real: f64,
    pub final_inflation_factor: f64,
    pub income_nominal: f64,
    pub income_real: f64,
}
