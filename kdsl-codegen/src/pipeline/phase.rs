//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the generation pipeline.
///
/// Built-in phases, in order:
/// - `ScanPhase` - finds builders and indexes methods
/// - `PlanPhase` - names every unit and resolves collisions
/// - `ValidatePhase` - runs lints, fails on errors
/// - `TransformPhase` - builds the DSL model
///
/// Custom phases run after the built-in ones.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()>;
}
