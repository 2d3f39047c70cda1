//! Scenario data structures: the immutable input to a projection run

use serde::{Deserialize, Serialize};

/// How the inflation rate value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflationMode {
    /// Rate is an annual rate applied every year of the horizon
    Annual,
    /// Rate is the total inflation over the whole horizon
    TotalOverPeriod,
}

/// Inflation assumption for a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationSettings {
    pub mode: InflationMode,

    /// Annual or total rate as a fraction (0.03 for 3%)
    pub rate: f64,
}

impl InflationSettings {
    pub fn none() -> Self {
        Self {
            mode: InflationMode::Annual,
            rate: 0.0,
        }
    }

    pub fn annual(rate: f64) -> Self {
        Self {
            mode: InflationMode::Annual,
            rate,
        }
    }

    pub fn total_over_period(rate: f64) -> Self {
        Self {
            mode: InflationMode::TotalOverPeriod,
            rate,
        }
    }
}

impl Default for InflationSettings {
    fn default() -> Self {
        Self::none()
    }
}

/// Step-up applied to a phase's monthly contribution at each anniversary of the phase start
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escalation {
    /// Flat contribution for the whole phase
    #[default]
    None,
    /// Compound the contribution by (1 + rate) every year
    Percent(f64),
    /// Add a fixed amount to the contribution every year
    Amount(f64),
}

impl Escalation {
    /// Escalate a base monthly amount by the given number of anniversaries.
    /// Never returns a negative contribution.
    pub fn apply(&self, base: f64, anniversaries: u32) -> f64 {
        let escalated = match *self {
            Escalation::None => base,
            Escalation::Percent(rate) => base * (1.0 + rate).powi(anniversaries as i32),
            Escalation::Amount(step) => base + step * anniversaries as f64,
        };
        escalated.max(0.0)
    }
}

/// A bounded age range with a fixed (optionally escalating) monthly contribution
///
/// Covers every month whose attained age `a` satisfies `start_age <= a < end_age`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionPhase {
    pub start_age: u32,
    pub end_age: u32,
    pub monthly_amount: f64,
    #[serde(default)]
    pub escalation: Escalation,
}

impl ContributionPhase {
    pub fn new(start_age: u32, end_age: u32, monthly_amount: f64) -> Self {
        Self {
            start_age,
            end_age,
            monthly_amount,
            escalation: Escalation::None,
        }
    }

    pub fn with_escalation(mut self, escalation: Escalation) -> Self {
        self.escalation = escalation;
        self
    }

    /// Whether the phase is active at the given attained age
    pub fn covers(&self, age: u32) -> bool {
        self.start_age <= age && age < self.end_age
    }

    /// Whether two phases share at least one age. An empty phase overlaps nothing.
    pub fn overlaps(&self, other: &ContributionPhase) -> bool {
        self.start_age < self.end_age
            && other.start_age < other.end_age
            && self.start_age < other.end_age
            && other.start_age < self.end_age
    }

    /// Monthly contribution at an attained age, after escalation. Zero outside the phase.
    pub fn contribution_at(&self, age: u32) -> f64 {
        if !self.covers(age) {
            return 0.0;
        }
        self.escalation.apply(self.monthly_amount, age - self.start_age)
    }

    pub fn duration_years(&self) -> u32 {
        self.end_age.saturating_sub(self.start_age)
    }
}

/// How to resolve a month covered by more than one contribution phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseOverlap {
    /// Overlapping phases fail validation
    #[default]
    Reject,
    /// The covering phase with the greatest start age wins; ties go to the later-listed phase
    LatestStartWins,
}

/// One-time addition (positive) or withdrawal (negative) at a given age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpSumEvent {
    pub age: u32,
    pub amount: f64,
}

impl LumpSumEvent {
    pub fn new(age: u32, amount: f64) -> Self {
        Self { age, amount }
    }

    pub fn is_withdrawal(&self) -> bool {
        self.amount < 0.0
    }
}

/// Complete description of one projection request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Starting portfolio value
    pub initial_amount: f64,

    /// Annual nominal rate of return as a fraction (0.07 for 7%)
    pub annual_return: f64,

    /// Age at the start of the projection
    pub current_age: u32,

    /// Age at which the projection ends (exclusive: the last simulated month is at end_age - 1)
    pub end_age: u32,

    #[serde(default)]
    pub inflation: InflationSettings,

    #[serde(default)]
    pub phases: Vec<ContributionPhase>,

    #[serde(default)]
    pub lump_sums: Vec<LumpSumEvent>,
}

impl ScenarioInput {
    pub fn new(initial_amount: f64, annual_return: f64, current_age: u32, end_age: u32) -> Self {
        Self {
            initial_amount,
            annual_return,
            current_age,
            end_age,
            inflation: InflationSettings::none(),
            phases: Vec::new(),
            lump_sums: Vec::new(),
        }
    }

    pub fn with_inflation(mut self, inflation: InflationSettings) -> Self {
        self.inflation = inflation;
        self
    }

    pub fn with_phase(mut self, phase: ContributionPhase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn with_lump_sum(mut self, event: LumpSumEvent) -> Self {
        self.lump_sums.push(event);
        self
    }

    /// Number of whole years simulated
    pub fn horizon_years(&self) -> u32 {
        self.end_age.saturating_sub(self.current_age)
    }

    /// Number of monthly periods simulated
    pub fn horizon_months(&self) -> u32 {
        self.horizon_years() * 12
    }

    /// Year of the horizon (1-indexed) containing a projection month
    pub fn year(&self, projection_month: u32) -> u32 {
        projection_month.saturating_sub(1) / 12 + 1
    }

    /// Month within the year (1-12) of a projection month
    pub fn month_in_year(&self, projection_month: u32) -> u32 {
        (projection_month.saturating_sub(1) % 12) + 1
    }

    /// Attained age during a projection month.
    /// Age increments at the start of each year of the horizon (month 13, 25, ...).
    pub fn attained_age(&self, projection_month: u32) -> u32 {
        self.current_age + self.year(projection_month) - 1
    }

    /// Phase supplying the contribution at an attained age, if any
    pub fn active_phase(&self, age: u32, overlap: PhaseOverlap) -> Option<&ContributionPhase> {
        let mut covering = self.phases.iter().filter(|p| p.covers(age));
        match overlap {
            PhaseOverlap::Reject => covering.next(),
            PhaseOverlap::LatestStartWins => {
                covering.fold(None, |best: Option<&ContributionPhase>, p| match best {
                    Some(b) if b.start_age > p.start_age => Some(b),
                    _ => Some(p),
                })
            }
        }
    }
}
