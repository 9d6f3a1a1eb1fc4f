//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::{CompilationContext, Diagnostic};

/// A plugin that can hook into the generation pipeline.
///
/// Plugins receive callbacks before and after each phase runs and once for
/// every diagnostic, in the order the diagnostics were recorded.
///
/// # Example
///
/// ```ignore
/// struct StderrPlugin;
///
/// impl Plugin for StderrPlugin {
///     fn name(&self) -> &'static str { "stderr" }
///
///     fn on_diagnostic(&self, diagnostic: &Diagnostic) {
///         if !diagnostic.severity.is_info() {
///             eprintln!("{}", diagnostic);
///         }
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes successfully.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called for each diagnostic a phase recorded, also when the phase failed.
    #[allow(unused_variables)]
    fn on_diagnostic(&self, diagnostic: &Diagnostic) {}
}
