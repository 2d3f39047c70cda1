//! Scenario validation
//!
//! Every check runs before the engine simulates a single month: either the whole
//! scenario is accepted or the caller gets an `InvalidInput` error naming the field.

use super::{Escalation, InflationMode, PhaseOverlap, ScenarioInput};
use crate::error::{ProjectionError, Result};

/// Longest horizon the engine accepts
pub const MAX_HORIZON_YEARS: u32 = 150;

fn finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::invalid(field, format!("must be a finite number, got {}", value)))
    }
}

/// Validate a scenario against the given phase-overlap policy
pub fn validate_scenario(scenario: &ScenarioInput, overlap: PhaseOverlap) -> Result<()> {
    finite("initial_amount", scenario.initial_amount)?;
    if scenario.initial_amount < 0.0 {
        return Err(ProjectionError::invalid(
            "initial_amount",
            format!("must not be negative, got {}", scenario.initial_amount),
        ));
    }

    finite("annual_return", scenario.annual_return)?;
    if scenario.annual_return <= -1.0 {
        return Err(ProjectionError::invalid(
            "annual_return",
            format!("must be greater than -100%, got {:.2}%", scenario.annual_return * 100.0),
        ));
    }

    if scenario.end_age <= scenario.current_age {
        return Err(ProjectionError::invalid(
            "end_age",
            format!(
                "must be greater than current_age ({} <= {})",
                scenario.end_age, scenario.current_age
            ),
        ));
    }
    if scenario.horizon_years() > MAX_HORIZON_YEARS {
        return Err(ProjectionError::invalid(
            "end_age",
            format!(
                "horizon of {} years exceeds the maximum of {}",
                scenario.horizon_years(),
                MAX_HORIZON_YEARS
            ),
        ));
    }

    validate_inflation(scenario)?;
    validate_phases(scenario, overlap)?;
    validate_lump_sums(scenario)?;

    Ok(())
}

fn validate_inflation(scenario: &ScenarioInput) -> Result<()> {
    let inflation = &scenario.inflation;
    finite("inflation.rate", inflation.rate)?;
    if inflation.rate <= -1.0 {
        return Err(ProjectionError::invalid(
            "inflation.rate",
            format!("must be greater than -100%, got {:.2}%", inflation.rate * 100.0),
        ));
    }
    if inflation.mode == InflationMode::TotalOverPeriod && scenario.horizon_months() == 0 {
        return Err(ProjectionError::invalid(
            "inflation.mode",
            "total-over-period inflation needs a non-empty horizon",
        ));
    }
    Ok(())
}

fn validate_phases(scenario: &ScenarioInput, overlap: PhaseOverlap) -> Result<()> {
    for (i, phase) in scenario.phases.iter().enumerate() {
        let field = |name: &str| format!("phases[{}].{}", i, name);

        if phase.start_age > phase.end_age {
            return Err(ProjectionError::invalid(
                field("start_age"),
                format!("start age {} is after end age {}", phase.start_age, phase.end_age),
            ));
        }

        finite(&field("monthly_amount"), phase.monthly_amount)?;
        if phase.monthly_amount < 0.0 {
            return Err(ProjectionError::invalid(
                field("monthly_amount"),
                format!("must not be negative, got {}", phase.monthly_amount),
            ));
        }

        match phase.escalation {
            Escalation::None => {}
            Escalation::Percent(rate) => {
                finite(&field("escalation"), rate)?;
                if rate <= -1.0 {
                    return Err(ProjectionError::invalid(
                        field("escalation"),
                        format!("percentage increase must be greater than -100%, got {:.2}%", rate * 100.0),
                    ));
                }
            }
            Escalation::Amount(step) => finite(&field("escalation"), step)?,
        }
    }

    if overlap == PhaseOverlap::Reject {
        for (i, a) in scenario.phases.iter().enumerate() {
            for (j, b) in scenario.phases.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(ProjectionError::invalid(
                        format!("phases[{}]", j),
                        format!(
                            "ages {}-{} overlap phases[{}] ages {}-{}",
                            b.start_age, b.end_age, i, a.start_age, a.end_age
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

fn validate_lump_sums(scenario: &ScenarioInput) -> Result<()> {
    for (i, event) in scenario.lump_sums.iter().enumerate() {
        let field = format!("lump_sums[{}]", i);
        finite(&field, event.amount)?;
        if event.age < scenario.current_age || event.age >= scenario.end_age {
            return Err(ProjectionError::invalid(
                field,
                format!(
                    "age {} is outside the projection ({} to {})",
                    event.age,
                    scenario.current_age,
                    scenario.end_age - 1
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{ContributionPhase, InflationSettings, LumpSumEvent};

    fn base() -> ScenarioInput {
        ScenarioInput::new(10_000.0, 0.07, 30, 65)
    }

    fn rejected_field(scenario: &ScenarioInput, overlap: PhaseOverlap) -> String {
        match validate_scenario(scenario, overlap) {
            Err(ProjectionError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_scenario_passes() {
        let scenario = base()
            .with_inflation(InflationSettings::annual(0.03))
            .with_phase(ContributionPhase::new(30, 40, 500.0))
            .with_phase(ContributionPhase::new(40, 65, 800.0).with_escalation(Escalation::Percent(0.03)))
            .with_lump_sum(LumpSumEvent::new(50, -20_000.0));

        assert!(validate_scenario(&scenario, PhaseOverlap::Reject).is_ok());
    }

    #[test]
    fn test_rejects_bad_top_level_fields() {
        let mut s = base();
        s.initial_amount = -1.0;
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "initial_amount");

        let mut s = base();
        s.annual_return = f64::NAN;
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "annual_return");

        let mut s = base();
        s.annual_return = -1.5;
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "annual_return");

        let mut s = base();
        s.end_age = 30;
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "end_age");

        let mut s = base();
        s.end_age = 20;
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "end_age");

        let mut s = base();
        s.end_age = s.current_age + MAX_HORIZON_YEARS + 1;
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "end_age");

        let s = base().with_inflation(InflationSettings::annual(f64::INFINITY));
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "inflation.rate");
    }

    #[test]
    fn test_rejects_inverted_phase() {
        let s = base().with_phase(ContributionPhase::new(50, 40, 100.0));
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "phases[0].start_age");
    }

    #[test]
    fn test_rejects_negative_contribution() {
        let s = base().with_phase(ContributionPhase::new(30, 40, -100.0));
        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "phases[0].monthly_amount");
    }

    #[test]
    fn test_overlap_policy() {
        let s = base()
            .with_phase(ContributionPhase::new(30, 45, 500.0))
            .with_phase(ContributionPhase::new(40, 65, 800.0));

        assert_eq!(rejected_field(&s, PhaseOverlap::Reject), "phases[1]");
        assert!(validate_scenario(&s, PhaseOverlap::LatestStartWins).is_ok());
    }

    #[test]
    fn test_empty_phase_inside_another_is_not_an_overlap() {
        let s = base()
            .with_phase(ContributionPhase::new(30, 50, 500.0))
            .with_phase(ContributionPhase::new(40, 40, 1_000.0));

        assert!(validate_scenario(&s, PhaseOverlap::Reject).is_ok());

        // Still rejected once the inner phase covers an age
        let widened = base()
            .with_phase(ContributionPhase::new(30, 50, 500.0))
            .with_phase(ContributionPhase::new(40, 41, 1_000.0));
        assert_eq!(rejected_field(&widened, PhaseOverlap::Reject), "phases[1]");
    }

    #[test]
    fn test_lump_sum_must_fall_inside_horizon() {
        let before = base().with_lump_sum(LumpSumEvent::new(29, 1_000.0));
        assert_eq!(rejected_field(&before, PhaseOverlap::Reject), "lump_sums[0]");

        let at_end = base().with_lump_sum(LumpSumEvent::new(65, 1_000.0));
        assert_eq!(rejected_field(&at_end, PhaseOverlap::Reject), "lump_sums[0]");

        let last_year = base().with_lump_sum(LumpSumEvent::new(64, 1_000.0));
        assert!(validate_scenario(&last_year, PhaseOverlap::Reject).is_ok());
    }
}
