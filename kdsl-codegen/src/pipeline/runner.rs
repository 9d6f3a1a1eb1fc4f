//! Pipeline orchestrator.

use eyre::Result;
use kdsl_ir::TypeUniverse;
use kdsl_manifest::DocIndex;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{PlanPhase, ScanPhase, TransformPhase, ValidatePhase},
};
use crate::Settings;

/// The generation pipeline orchestrator.
///
/// Runs the built-in phases (scan, plan, validate, transform) followed by
/// any user phases, calling plugin hooks around each phase and streaming
/// every new diagnostic to the plugins.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(MyPlugin::new());
/// let mut ctx = pipeline.run(&universe, settings, docs)?;
/// let dsl = ctx.take_dsl()?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every phase against a type universe.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally; diagnostics recorded up
    /// to that point have already been streamed to the plugins.
    pub fn run<'u>(
        &self,
        universe: &'u dyn TypeUniverse,
        settings: Settings,
        docs: DocIndex,
    ) -> Result<CompilationContext<'u>> {
        let mut ctx = CompilationContext::new(universe, settings, docs);

        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(ScanPhase),
            Box::new(PlanPhase),
            Box::new(ValidatePhase::new()),
            Box::new(TransformPhase),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        let seen = ctx.diagnostics.len();
        let result = phase.run(ctx);
        for diagnostic in &ctx.diagnostics[seen..] {
            for plugin in &self.plugins {
                plugin.on_diagnostic(diagnostic);
            }
        }
        result?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use kdsl_manifest::CollisionPolicy;

    use super::*;
    use crate::{
        pipeline::Diagnostic,
        testing::{fixture_universe, settings, universe_from},
    };

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext<'_>) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext<'_>) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct CollectingPlugin(Arc<Mutex<Vec<Diagnostic>>>);

    impl Plugin for CollectingPlugin {
        fn name(&self) -> &'static str {
            "collecting"
        }

        fn on_diagnostic(&self, diagnostic: &Diagnostic) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(diagnostic.clone());
            }
        }
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let universe = fixture_universe();
        let mut ctx = Pipeline::new()
            .run(&universe, settings(), DocIndex::empty())
            .expect("pipeline should succeed");

        assert!(ctx.source.is_some());
        assert!(ctx.plan.is_some());
        assert_eq!(ctx.take_dsl().unwrap().types.len(), 4);
        assert!(!ctx.has_errors());
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let universe = fixture_universe();
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(&universe, settings(), DocIndex::empty())
            .expect("pipeline should succeed");

        assert_eq!(before_count.load(Ordering::SeqCst), 4);
        assert_eq!(after_count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_diagnostics_are_streamed_in_order() {
        let universe = fixture_universe();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let ctx = Pipeline::new()
            .plugin(CollectingPlugin(seen.clone()))
            .run(&universe, settings(), DocIndex::empty())
            .unwrap();

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        let streamed: Vec<String> = seen.iter().map(ToString::to_string).collect();
        let collected: Vec<String> = ctx.diagnostics.iter().map(ToString::to_string).collect();
        assert_eq!(streamed, collected);
        assert!(seen.iter().any(|d| d.message.contains("com.acme.model.Orphan")));
    }

    #[test]
    fn test_collision_fails_after_streaming_errors() {
        let universe = universe_from(
            r#"{
  "types": [
    {
      "name": "com.acme.core.SdkBuilder",
      "kind": "interface",
      "type_params": ["B", "T"]
    },
    {
      "name": "com.acme.model.Widget",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Widget$Builder" }]
    },
    {
      "name": "com.acme.model.Widget$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Widget$Builder, com.acme.model.Widget>"]
    },
    {
      "name": "com.acme.model.Outer$Widget",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Outer$Widget$Builder" }]
    },
    {
      "name": "com.acme.model.Outer$Widget$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Outer$Widget$Builder, com.acme.model.Outer$Widget>"]
    }
  ]
}"#,
        );
        let seen = Arc::new(Mutex::new(Vec::new()));

        let result = Pipeline::new()
            .plugin(CollectingPlugin(seen.clone()))
            .run(&universe, settings(), DocIndex::empty());

        assert!(result.is_err());
        assert!(
            seen.lock()
                .unwrap()
                .iter()
                .any(|d| d.severity.is_error() && d.message.contains("WidgetDSL"))
        );

        let mut ctx = Pipeline::new()
            .run(
                &universe,
                settings().with_collisions(CollisionPolicy::Qualify),
                DocIndex::empty(),
            )
            .expect("qualified names resolve the collision");
        let dsl = ctx.take_dsl().unwrap();
        assert!(dsl.type_unit("OuterWidgetDSL").is_some());
        assert!(dsl.type_unit("WidgetDSL").is_some());
    }
}
