//! Conversion of an annual rate of return to a monthly growth rate

use serde::{Deserialize, Serialize};

/// Method for converting the annual rate of return to monthly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    /// Effective annual: r_monthly = (1 + r_annual)^(1/12) - 1.
    /// Twelve months of growth reproduce exactly one year at the annual rate.
    #[default]
    EffectiveAnnual,
    /// Nominal APR: r_monthly = r_annual / 12.
    /// Twelve months compound to slightly more than the annual rate.
    NominalApr,
}

impl Compounding {
    /// Monthly growth rate for an annual rate of return
    pub fn monthly_rate(&self, annual_rate: f64) -> f64 {
        match self {
            Compounding::EffectiveAnnual => (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0,
            Compounding::NominalApr => annual_rate / 12.0,
        }
    }

    /// Growth factor after a number of months with no cashflows
    pub fn growth_factor(&self, annual_rate: f64, months: u32) -> f64 {
        (1.0 + self.monthly_rate(annual_rate)).powi(months as i32)
    }

    /// Annual rate actually earned under this convention
    pub fn effective_annual_rate(&self, annual_rate: f64) -> f64 {
        self.growth_factor(annual_rate, 12) - 1.0
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Compounding::EffectiveAnnual => "effective annual (monthly = (1 + r)^(1/12) - 1)",
            Compounding::NominalApr => "nominal APR (monthly = r / 12)",
        }
    }
}
