//! Cumulative inflation over the projection horizon

use crate::scenario::{InflationMode, InflationSettings};

/// Cumulative price index by projection month
///
/// Factors are evaluated in closed form per month rather than accumulated, so
/// a whole-year factor in annual mode is `(1 + r)^Y` and the final factor in
/// total-over-period mode is exactly `1 + T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationCurve {
    /// Growth of the price level over `base_months`
    base: f64,

    /// Number of months over which prices grow by `base`
    base_months: u32,
}

impl InflationCurve {
    /// Build the curve for a horizon of `horizon_months`
    pub fn new(settings: &InflationSettings, horizon_months: u32) -> Self {
        match settings.mode {
            InflationMode::Annual => Self {
                base: 1.0 + settings.rate,
                base_months: 12,
            },
            InflationMode::TotalOverPeriod => Self {
                base: 1.0 + settings.rate,
                base_months: horizon_months.max(1),
            },
        }
    }

    /// Cumulative inflation factor after `month` months (1 at month 0)
    pub fn factor(&self, month: u32) -> f64 {
        if month == 0 || self.base == 1.0 {
            return 1.0;
        }
        if month == self.base_months {
            return self.base;
        }
        self.base.powf(month as f64 / self.base_months as f64)
    }

    /// Equivalent constant monthly inflation rate
    pub fn monthly_rate(&self) -> f64 {
        self.base.powf(1.0 / self.base_months as f64) - 1.0
    }

    /// Equivalent constant annual inflation rate
    pub fn annual_rate(&self) -> f64 {
        self.factor(12) - 1.0
    }
}
