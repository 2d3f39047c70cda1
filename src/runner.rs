//! Scenario runner for batch projections
//!
//! Every run is an independent call on an immutable scenario, so batches can be
//! spread across threads and still return results in input order.

use rayon::prelude::*;

use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::scenario::ScenarioInput;

/// Runner holding a base configuration for repeated projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // Same scenario at several rates of return
/// let results = runner.run_rates(&scenario, &[0.05, 0.07, 0.09]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create runner with the default projection config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { base_config: config }
    }

    /// Run a single projection with the base config
    pub fn run(&self, scenario: &ScenarioInput) -> Result<ProjectionResult> {
        ProjectionEngine::new(self.base_config).project(scenario)
    }

    /// Run projections for multiple scenarios with the same config
    pub fn run_batch(&self, scenarios: &[ScenarioInput]) -> Vec<Result<ProjectionResult>> {
        let engine = ProjectionEngine::new(self.base_config);
        log::debug!("Running batch of {} scenarios", scenarios.len());
        scenarios.par_iter().map(|s| engine.project(s)).collect()
    }

    /// Run one scenario under several configs
    pub fn run_configs(
        &self,
        scenario: &ScenarioInput,
        configs: &[ProjectionConfig],
    ) -> Vec<Result<ProjectionResult>> {
        configs
            .par_iter()
            .map(|config| ProjectionEngine::new(*config).project(scenario))
            .collect()
    }

    /// Run one scenario at several annual rates of return
    pub fn run_rates(&self, scenario: &ScenarioInput, rates: &[f64]) -> Vec<Result<ProjectionResult>> {
        let scenarios: Vec<ScenarioInput> = rates
            .iter()
            .map(|&rate| ScenarioInput {
                annual_return: rate,
                ..scenario.clone()
            })
            .collect();
        self.run_batch(&scenarios)
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.base_config
    }

    pub fn config_mut(&mut self) -> &mut ProjectionConfig {
        &mut self.base_config
    }
}
