//! Pipeline snapshot plugin for debugging.
//!
//! Captures the pipeline state after each phase so the intermediate models
//! can be inspected as JSON.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use eyre::{Result, WrapErr, eyre};
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::dsl::{DslModel, UnitPlan};

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    /// Builder type by qualified target name (available after "scan").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builders: Option<BTreeMap<String, String>>,

    /// Unit names (available after "plan").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<UnitPlan>,

    /// The DSL model (available after "transform").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsl: Option<DslModel>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

/// A plugin that captures pipeline state after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".kdsl/debug"));
/// let ctx = pipeline.run(&universe, settings, docs)?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    /// Create a snapshot plugin that writes each snapshot as soon as it is taken.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        match self.snapshots.read() {
            Ok(snapshots) => snapshots.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Write all snapshots to `dir`, one `<phase>.json` file each.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for snapshot in self.snapshots() {
            write_snapshot(dir, &snapshot)?;
        }
        Ok(())
    }

    fn capture_snapshot(&self, phase: &str, ctx: &CompilationContext<'_>) -> Result<PhaseSnapshot> {
        let builders = ctx.source.as_ref().map(|source| {
            source
                .builders
                .iter()
                .map(|(target, model)| (target.clone(), model.builder.qualified_name.clone()))
                .collect()
        });
        let snapshot = PhaseSnapshot {
            phase: phase.to_string(),
            builders,
            plan: ctx.plan.clone(),
            dsl: ctx.dsl.clone(),
            diagnostics: ctx.diagnostics.clone(),
        };
        self.snapshots
            .write()
            .map_err(|_| eyre!("snapshot store is poisoned"))?
            .push(snapshot.clone());
        Ok(snapshot)
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let snapshot = self.capture_snapshot(phase, ctx)?;
        if let Some(dir) = &self.output_dir {
            write_snapshot(dir, &snapshot)?;
        }
        Ok(())
    }
}

fn write_snapshot(dir: &Path, snapshot: &PhaseSnapshot) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create snapshot directory '{}'", dir.display()))?;
    let path = dir.join(format!("{}.json", snapshot.phase));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}
