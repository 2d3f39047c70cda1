//! Core projection engine for monthly portfolio growth projections

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::rates::{Compounding, InflationCurve};
use crate::scenario::{validate_scenario, PhaseOverlap, ScenarioInput};
use super::points::ProjectionResult;
use super::state::ProjectionState;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Convention for converting the annual return to a monthly rate
    #[serde(default)]
    pub compounding: Compounding,

    /// Resolution of months covered by more than one contribution phase
    #[serde(default)]
    pub phase_overlap: PhaseOverlap,
}

/// Main projection engine
///
/// Each month is processed in a fixed order: growth on the opening balance,
/// then the contribution of the active phase, then any lump sums due at the
/// attained age (applied in the first month of that age).
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run projection for a single scenario
    pub fn project(&self, scenario: &ScenarioInput) -> Result<ProjectionResult> {
        validate_scenario(scenario, self.config.phase_overlap)?;

        let horizon_months = scenario.horizon_months();
        let monthly_rate = self.config.compounding.monthly_rate(scenario.annual_return);
        let inflation = InflationCurve::new(&scenario.inflation, horizon_months);

        log::debug!(
            "Projecting ages {}-{} ({} months): monthly return {:.6}, monthly inflation {:.6}",
            scenario.current_age,
            scenario.end_age,
            horizon_months,
            monthly_rate,
            inflation.monthly_rate()
        );

        let mut result = ProjectionResult::new(scenario.initial_amount);
        let mut state = ProjectionState::from_scenario(scenario);
        result.add_point(state.to_point());

        for _month in 1..=horizon_months {
            // Advance state to next month
            state.advance_month(scenario);

            self.calculate_month(scenario, monthly_rate, &inflation, &mut state)?;
            result.add_point(state.to_point());
        }

        log::debug!(
            "Projection complete: final nominal {:.2}, final real {:.2}, contributed {:.2}",
            result.final_nominal,
            result.final_real,
            result.total_contributed
        );

        Ok(result)
    }

    /// Apply one month of growth, contribution and lump sums
    fn calculate_month(
        &self,
        scenario: &ScenarioInput,
        monthly_rate: f64,
        inflation: &InflationCurve,
        state: &mut ProjectionState,
    ) -> Result<()> {
        let was_negative = state.balance < 0.0;

        // Growth
        let opening = state.balance;
        state.balance *= 1.0 + monthly_rate;
        state.growth = state.balance - opening;

        // Contribution
        let contribution = scenario
            .active_phase(state.attained_age, self.config.phase_overlap)
            .map(|phase| phase.contribution_at(state.attained_age))
            .unwrap_or(0.0);
        state.contribution = contribution;
        state.balance += contribution;
        state.contributed += contribution;

        // Lump sums land in the first month of their age
        if state.month_in_year == 1 {
            let lump_sum: f64 = scenario
                .lump_sums
                .iter()
                .filter(|ls| ls.age == state.attained_age)
                .map(|ls| ls.amount)
                .sum();
            if lump_sum != 0.0 {
                log::debug!(
                    "Month {}: lump sum of {:.2} at age {}",
                    state.projection_month,
                    lump_sum,
                    state.attained_age
                );
            }
            state.lump_sum = lump_sum;
            state.balance += lump_sum;
            state.lump_sums += lump_sum;
        }

        state.inflation_factor = inflation.factor(state.projection_month);

        if !state.balance.is_finite() || !state.inflation_factor.is_finite() {
            return Err(ProjectionError::Computation(format!(
                "non-finite value at month {} (balance {}, inflation factor {})",
                state.projection_month, state.balance, state.inflation_factor
            )));
        }

        if state.balance < 0.0 && !was_negative {
            log::warn!(
                "Portfolio balance went negative ({:.2}) at month {} (age {})",
                state.balance,
                state.projection_month,
                state.attained_age
            );
        }

        log::trace!(
            "Month {:>4} age {:>3}: growth {:.2} contribution {:.2} balance {:.2}",
            state.projection_month,
            state.attained_age,
            state.growth,
            state.contribution,
            state.balance
        );

        Ok(())
    }
}

/// Project a scenario with the default configuration
pub fn project(scenario: &ScenarioInput) -> Result<ProjectionResult> {
    ProjectionEngine::default().project(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{ContributionPhase, Escalation, InflationSettings, LumpSumEvent};
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn sample_scenario() -> ScenarioInput {
        ScenarioInput::new(80_000.0, 0.07, 22, 65)
            .with_inflation(InflationSettings::annual(0.03))
            .with_phase(ContributionPhase::new(22, 25, 500.0))
            .with_phase(
                ContributionPhase::new(25, 35, 3_000.0).with_escalation(Escalation::Amount(100.0)),
            )
            .with_lump_sum(LumpSumEvent::new(37, 100_000.0))
    }

    #[test]
    fn test_projection_runs() {
        let scenario = sample_scenario();
        let result = project(&scenario).unwrap();

        assert_eq!(result.points.len(), 43 * 12 + 1);
        assert_eq!(result.months(), 516);
        assert_eq!(result.points[0].nominal_value, 80_000.0);
        assert_eq!(result.points[0].month, 0);
        assert!(result.final_nominal > result.final_real);
        assert_eq!(result.income_nominal, result.final_nominal * 0.04);
        assert_eq!(result.income_real, result.final_real * 0.04);
    }

    #[test]
    fn test_points_are_ordered_and_contributed_is_monotonic() {
        let result = project(&sample_scenario()).unwrap();

        for pair in result.points.windows(2) {
            assert_eq!(pair[1].month, pair[0].month + 1);
            assert!(pair[1].attained_age >= pair[0].attained_age);
            assert!(pair[1].contributed >= pair[0].contributed);
        }
    }

    #[test]
    fn test_one_year_at_seven_percent() {
        let scenario = ScenarioInput::new(10_000.0, 0.07, 40, 41);
        let result = project(&scenario).unwrap();

        assert_eq!(result.months(), 12);
        assert_relative_eq!(result.final_nominal, 10_700.0, epsilon = 1e-8);
        assert_eq!(result.final_real, result.final_nominal);
        assert_eq!(result.total_contributed, 0.0);
    }

    #[test]
    fn test_no_cashflows_matches_closed_form() {
        let scenario = ScenarioInput::new(50_000.0, 0.055, 30, 55);
        let result = project(&scenario).unwrap();

        let monthly = Compounding::EffectiveAnnual.monthly_rate(0.055);
        let expected = 50_000.0 * (1.0 + monthly).powi(300);
        assert_relative_eq!(result.final_nominal, expected, max_relative = 1e-12);
        assert_relative_eq!(result.final_nominal, 50_000.0 * 1.055_f64.powi(25), max_relative = 1e-10);
    }

    #[test]
    fn test_nominal_apr_convention() {
        let config = ProjectionConfig {
            compounding: Compounding::NominalApr,
            ..Default::default()
        };
        let scenario = ScenarioInput::new(10_000.0, 0.12, 40, 41);
        let result = ProjectionEngine::new(config).project(&scenario).unwrap();

        assert_relative_eq!(result.final_nominal, 10_000.0 * 1.01_f64.powi(12), max_relative = 1e-12);
    }

    #[test]
    fn test_annual_inflation_factor_by_year() {
        let scenario = ScenarioInput::new(10_000.0, 0.06, 30, 50)
            .with_inflation(InflationSettings::annual(0.025));
        let result = project(&scenario).unwrap();

        for point in result.yearly() {
            let years = point.month / 12;
            assert_relative_eq!(point.inflation_factor, 1.025_f64.powi(years as i32), max_relative = 1e-12);
            assert_relative_eq!(point.real_value, point.nominal_value / point.inflation_factor);
            assert!(point.real_value <= point.nominal_value);
        }
    }

    #[test]
    fn test_total_over_period_inflation_ends_at_total() {
        let scenario = ScenarioInput::new(10_000.0, 0.06, 30, 67)
            .with_inflation(InflationSettings::total_over_period(1.25));
        let result = project(&scenario).unwrap();

        let last = result.final_point().unwrap();
        assert_eq!(last.inflation_factor, 1.0 + 1.25);
        assert_eq!(result.final_real, result.final_nominal / (1.0 + 1.25));
    }

    #[test]
    fn test_escalating_phase_contributed_capital() {
        let scenario = ScenarioInput::new(0.0, 0.06, 30, 65).with_phase(
            ContributionPhase::new(30, 65, 500.0).with_escalation(Escalation::Percent(0.03)),
        );
        let result = project(&scenario).unwrap();

        let expected: f64 = (0..35).map(|y| 12.0 * 500.0 * 1.03_f64.powi(y)).sum();
        assert_relative_eq!(result.total_contributed, expected, max_relative = 1e-12);
        // Geometric series: 6000 * (1.03^35 - 1) / 0.03
        assert_relative_eq!(
            result.total_contributed,
            6_000.0 * (1.03_f64.powi(35) - 1.0) / 0.03,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_contribution_timing() {
        // Contribution lands after growth, so it earns nothing in its own month
        let scenario = ScenarioInput::new(0.0, 0.10, 30, 31).with_phase(ContributionPhase::new(30, 31, 100.0));
        let result = project(&scenario).unwrap();

        assert_eq!(result.points[1].nominal_value, 100.0);
        assert_eq!(result.points[1].growth, 0.0);
        assert!(result.points[2].growth > 0.0);
    }

    #[test]
    fn test_phases_outside_horizon_are_clipped() {
        let scenario = ScenarioInput::new(0.0, 0.0, 40, 45)
            .with_phase(ContributionPhase::new(30, 42, 100.0))
            .with_phase(ContributionPhase::new(44, 70, 200.0));
        let result = project(&scenario).unwrap();

        // Ages 40-41 at 100, age 44 at 200
        assert_relative_eq!(result.total_contributed, 2.0 * 12.0 * 100.0 + 12.0 * 200.0);
        assert_relative_eq!(result.final_nominal, result.total_contributed);
    }

    #[test]
    fn test_escalation_counts_from_phase_start() {
        // Phase began at 30; by age 35 it has five anniversaries behind it
        let scenario = ScenarioInput::new(0.0, 0.0, 35, 36).with_phase(
            ContributionPhase::new(30, 40, 100.0).with_escalation(Escalation::Amount(10.0)),
        );
        let result = project(&scenario).unwrap();

        assert_eq!(result.points[1].contribution, 150.0);
    }

    #[test]
    fn test_lump_sum_withdrawal() {
        let base = ScenarioInput::new(100_000.0, 0.06, 45, 55)
            .with_phase(ContributionPhase::new(45, 55, 1_000.0));
        let with_withdrawal = base.clone().with_lump_sum(LumpSumEvent::new(50, -20_000.0));

        let without = project(&base).unwrap();
        let with = project(&with_withdrawal).unwrap();

        // First month at age 50 is month 61
        let month = 61;
        assert_eq!(with.points[month].attained_age, 50);
        assert_eq!(with.points[month].lump_sum, -20_000.0);
        assert_eq!(with.points[month - 1].nominal_value, without.points[month - 1].nominal_value);
        assert_relative_eq!(
            without.points[month].nominal_value - with.points[month].nominal_value,
            20_000.0,
            max_relative = 1e-9
        );

        // Withdrawal does not touch contributed capital
        assert_eq!(with.total_contributed, without.total_contributed);
        assert_eq!(with.total_lump_sums, -20_000.0);
        assert_eq!(with.summary().total_invested, 100_000.0 + with.total_contributed - 20_000.0);
    }

    #[test]
    fn test_lump_sum_at_current_age_applies_in_first_month() {
        let scenario = ScenarioInput::new(0.0, 0.0, 30, 32).with_lump_sum(LumpSumEvent::new(30, 5_000.0));
        let result = project(&scenario).unwrap();

        assert_eq!(result.points[0].nominal_value, 0.0);
        assert_eq!(result.points[1].nominal_value, 5_000.0);
        assert_eq!(result.final_nominal, 5_000.0);
        assert_eq!(result.total_contributed, 0.0);
    }

    #[test]
    fn test_overlapping_phases() {
        let scenario = ScenarioInput::new(0.0, 0.0, 30, 40)
            .with_phase(ContributionPhase::new(30, 40, 100.0))
            .with_phase(ContributionPhase::new(35, 40, 300.0));

        let err = project(&scenario).unwrap_err();
        assert!(err.is_invalid_input());

        let config = ProjectionConfig {
            phase_overlap: PhaseOverlap::LatestStartWins,
            ..Default::default()
        };
        let result = ProjectionEngine::new(config).project(&scenario).unwrap();
        assert_relative_eq!(result.total_contributed, 5.0 * 12.0 * 100.0 + 5.0 * 12.0 * 300.0);
    }

    #[test]
    fn test_invalid_input_produces_no_result() {
        let scenario = ScenarioInput::new(10_000.0, -1.2, 30, 65);
        assert!(matches!(project(&scenario), Err(ProjectionError::InvalidInput { .. })));

        let inverted = ScenarioInput::new(10_000.0, 0.05, 65, 30);
        assert!(matches!(project(&inverted), Err(ProjectionError::InvalidInput { .. })));
    }

    #[test]
    fn test_overflow_is_computation_error() {
        let scenario = ScenarioInput::new(f64::MAX / 2.0, 1.0e6, 20, 120);
        assert!(matches!(project(&scenario), Err(ProjectionError::Computation(_))));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_projection_is_idempotent(
            initial in 0u32..1_000_000,
            return_bp in -500i32..1500,
            inflation_bp in 0u32..800,
            current_age in 18u32..60,
            span in 1u32..40,
            monthly in 0u32..5_000,
            increase_bp in 0u32..600,
        ) {
            let scenario = ScenarioInput::new(initial as f64, return_bp as f64 / 10_000.0, current_age, current_age + span)
                .with_inflation(InflationSettings::annual(inflation_bp as f64 / 10_000.0))
                .with_phase(
                    ContributionPhase::new(current_age, current_age + span, monthly as f64)
                        .with_escalation(Escalation::Percent(increase_bp as f64 / 10_000.0)),
                );

            let first = project(&scenario).unwrap();
            let second = project(&scenario).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_zero_inflation_real_equals_nominal(
            initial in 0u32..1_000_000,
            return_bp in -500i32..1500,
            span in 1u32..50,
            monthly in 0u32..5_000,
        ) {
            let scenario = ScenarioInput::new(initial as f64, return_bp as f64 / 10_000.0, 30, 30 + span)
                .with_phase(ContributionPhase::new(30, 30 + span, monthly as f64));
            let result = project(&scenario).unwrap();

            for point in &result.points {
                prop_assert_eq!(point.real_value, point.nominal_value);
            }
        }

        #[test]
        fn prop_contributed_is_independent_of_return(
            return_a_bp in -500i32..1500,
            return_b_bp in -500i32..1500,
            span in 1u32..45,
            monthly in 0u32..5_000,
            step in 0u32..200,
        ) {
            let build = |bp: i32| {
                ScenarioInput::new(10_000.0, bp as f64 / 10_000.0, 25, 25 + span)
                    .with_phase(
                        ContributionPhase::new(25, 25 + span, monthly as f64)
                            .with_escalation(Escalation::Amount(step as f64)),
                    )
                    .with_lump_sum(LumpSumEvent::new(25 + span / 2, 1_000.0))
            };

            let a = project(&build(return_a_bp)).unwrap();
            let b = project(&build(return_b_bp)).unwrap();
            prop_assert_eq!(a.total_contributed, b.total_contributed);

            let applied: f64 = a.points.iter().map(|p| p.contribution).sum();
            prop_assert!((applied - a.total_contributed).abs() <= 1e-6 * applied.max(1.0));
        }
    }
}
