//! Growth Projection - deterministic investment growth projections
//!
//! This library provides:
//! - Monthly forward simulation of a portfolio from an initial amount
//! - Phased monthly contributions with annual step-ups
//! - One-time lump-sum additions and withdrawals at given ages
//! - Inflation adjustment from an annual rate or a total rate over the horizon
//! - 4% rule income figures, a text report and CSV export

pub mod error;
pub mod scenario;
pub mod rates;
pub mod projection;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use error::ProjectionError;
pub use scenario::{ContributionPhase, Escalation, InflationMode, InflationSettings, LumpSumEvent, ScenarioInput};
pub use projection::{project, ProjectionConfig, ProjectionEngine, ProjectionPoint, ProjectionResult};
pub use report::Report;
pub use runner::ScenarioRunner;
