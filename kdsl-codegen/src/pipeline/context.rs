//! Compilation context passed through pipeline phases.

use eyre::{Result, eyre};
use kdsl_ir::TypeUniverse;
use kdsl_manifest::DocIndex;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    Settings,
    dsl::{DslModel, UnitPlan},
    source::SourceModel,
};

/// State of one generation run.
///
/// Each phase fills in its result and appends diagnostics; later phases
/// read what earlier ones produced.
pub struct CompilationContext<'u> {
    /// The scanned host library.
    pub universe: &'u dyn TypeUniverse,
    pub settings: Settings,
    pub docs: DocIndex,
    /// Builders and methods (populated by ScanPhase).
    pub source: Option<SourceModel>,
    /// Unit names (populated by PlanPhase).
    pub plan: Option<UnitPlan>,
    /// The units to render (populated by TransformPhase).
    pub dsl: Option<DslModel>,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'u> CompilationContext<'u> {
    pub fn new(universe: &'u dyn TypeUniverse, settings: Settings, docs: DocIndex) -> Self {
        Self {
            universe,
            settings,
            docs,
            source: None,
            plan: None,
            dsl: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the DSL model out of the context.
    ///
    /// Fails if the transform phase has not run.
    pub fn take_dsl(&mut self) -> Result<DslModel> {
        self.dsl
            .take()
            .ok_or_else(|| eyre!("DSL model not set - did the transform phase run?"))
    }
}

impl std::fmt::Debug for CompilationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationContext")
            .field("settings", &self.settings)
            .field("source", &self.source.is_some())
            .field("plan", &self.plan.is_some())
            .field("dsl", &self.dsl.is_some())
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_universe, settings};

    #[test]
    fn test_context_creation() {
        let universe = fixture_universe();
        let ctx = CompilationContext::new(&universe, settings(), DocIndex::empty());

        assert!(ctx.source.is_none());
        assert!(ctx.plan.is_none());
        assert!(ctx.dsl.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let universe = fixture_universe();
        let mut ctx = CompilationContext::new(&universe, settings(), DocIndex::empty());

        ctx.add_error("test", "test error");
        ctx.add_warning("test", "test warning");
        ctx.add_info("test", "test info");

        assert!(ctx.has_errors());
        assert!(ctx.has_warnings());
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.errors().count(), 1);
    }

    #[test]
    fn test_take_dsl_before_transform_fails() {
        let universe = fixture_universe();
        let mut ctx = CompilationContext::new(&universe, settings(), DocIndex::empty());
        assert!(ctx.take_dsl().is_err());
    }
}
