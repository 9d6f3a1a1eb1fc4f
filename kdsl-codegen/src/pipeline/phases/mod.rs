//! Built-in pipeline phases.
//!
//! - [`ScanPhase`] - finds builder/target pairs and indexes methods
//! - [`PlanPhase`] - names every unit and applies the collision policy
//! - [`ValidatePhase`] - runs lints over the scan and the plan
//! - [`TransformPhase`] - builds the DSL model

mod plan;
mod scan;
mod transform;
mod validate;

pub use plan::PlanPhase;
pub use scan::ScanPhase;
pub use transform::TransformPhase;
pub use validate::{
    AmbiguousGroupLint, EmptyUnitLint, Lint, LintInput, SharedShortNameLint,
    UnitCollisionLint, ValidatePhase,
};
