//! Validate phase - runs lints over the scan and the plan.

mod lint;
pub mod lints;

use eyre::{Result, bail, eyre};
pub use lint::{Lint, LintInput};
pub use lints::{AmbiguousGroupLint, EmptyUnitLint, SharedShortNameLint, UnitCollisionLint};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the scan result using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(UnitCollisionLint),
                Box::new(SharedShortNameLint),
                Box::new(AmbiguousGroupLint),
                Box::new(EmptyUnitLint),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let (Some(source), Some(plan)) = (ctx.source.as_ref(), ctx.plan.as_ref()) else {
            return Err(eyre!("validate phase requires a source model and a unit plan"));
        };
        let input = LintInput {
            source,
            plan,
            universe: ctx.universe,
            settings: &ctx.settings,
        };
        for lint in &self.lints {
            lint.check(&input, &mut ctx.diagnostics);
        }

        // Warnings and infos never fail the run
        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}
