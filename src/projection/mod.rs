//! Projection engine for monthly portfolio growth projections

mod state;
mod engine;
mod points;

pub use state::ProjectionState;
pub use engine::{project, ProjectionEngine, ProjectionConfig};
pub use points::{ProjectionPoint, ProjectionResult, ProjectionSummary, FOUR_PERCENT_RULE};
pub use crate::rates::Compounding;
pub use crate::scenario::PhaseOverlap;
