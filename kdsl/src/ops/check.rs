//! Check operation - scan and validate without rendering.

use std::sync::{Arc, Mutex};

use kdsl_codegen::pipeline::{Diagnostic, Pipeline, Plugin, Severity};

use super::Inputs;
use crate::reports::CheckReport;

/// Collects every streamed diagnostic, including those of a failing phase.
#[derive(Clone, Default)]
struct Collector(Arc<Mutex<Vec<Diagnostic>>>);

impl Collector {
    fn take(&self) -> Vec<Diagnostic> {
        match self.0.lock() {
            Ok(mut diagnostics) => std::mem::take(&mut *diagnostics),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Plugin for Collector {
    fn name(&self) -> &'static str {
        "collector"
    }

    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        if let Ok(mut diagnostics) = self.0.lock() {
            diagnostics.push(diagnostic.clone());
        }
    }
}

/// Execute the check operation.
///
/// Runs every pipeline phase; a fatal phase error becomes an error entry of
/// the report next to the diagnostics recorded before it.
pub fn check(inputs: &Inputs) -> CheckReport {
    let collector = Collector::default();
    let result = Pipeline::new().plugin(collector.clone()).run(
        &inputs.universe,
        inputs.settings(),
        inputs.docs.clone(),
    );

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for diag in collector.take() {
        let msg = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let unit_count = match result {
        Ok(mut ctx) => ctx.take_dsl().ok().map(|dsl| dsl.unit_count()),
        Err(err) => {
            if errors.is_empty() {
                errors.push(format!("{:#}", err));
            }
            None
        }
    };

    CheckReport {
        config_path: inputs.toml.path().to_path_buf(),
        errors,
        warnings,
        infos,
        unit_count,
    }
}
