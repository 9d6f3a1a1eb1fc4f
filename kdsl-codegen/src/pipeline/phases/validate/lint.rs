//! Lint trait for scan and plan validation.

use kdsl_ir::TypeUniverse;

use crate::{Settings, dsl::UnitPlan, pipeline::Diagnostic, source::SourceModel};

/// Everything a lint can inspect.
#[derive(Clone, Copy)]
pub struct LintInput<'a> {
    pub source: &'a SourceModel,
    pub plan: &'a UnitPlan,
    pub universe: &'a dyn TypeUniverse,
    pub settings: &'a Settings,
}

/// A lint that checks the scanned API surface and the unit plan.
pub trait Lint: Send + Sync {
    /// Kebab-case name, e.g. `unit-collision`.
    fn name(&self) -> &'static str;

    fn check(&self, input: &LintInput<'_>, diagnostics: &mut Vec<Diagnostic>);
}
