//! Generate operation - scan, transform and render.

use std::path::Path;

use eyre::{Context, Result};
use kdsl_codegen::pipeline::{Pipeline, SnapshotPlugin};
use kdsl_codegen_kotlin::{Generator, LanguageCodegen};

use super::{Inputs, StderrPlugin};
use crate::reports::{
    GenerateReport, GenerationResult, PreviewFile, PreviewResult, UnitCounts, WrittenResult,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output root, cleared before writing.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Where to write per-phase JSON snapshots, if anywhere.
    pub snapshot_dir: Option<&'a Path>,
}

/// Execute the generate operation.
///
/// Diagnostics are printed to stderr while the pipeline runs.
pub fn generate(inputs: &Inputs, opts: GenerateOptions) -> Result<GenerateReport> {
    let mut pipeline = Pipeline::new().plugin(StderrPlugin);
    if let Some(dir) = opts.snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }
    let mut ctx = pipeline
        .run(&inputs.universe, inputs.settings(), inputs.docs.clone())
        .wrap_err("Pipeline failed")?;
    let warning_count = ctx.warning_count();

    let generator = Generator::from_context(&mut ctx)?;
    let model = generator.model();
    let units = UnitCounts {
        collections: model.collections.len(),
        maps: model.maps.len(),
        types: model.types.len(),
    };

    let result = if opts.dry_run {
        let files = generator
            .preview()
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(PreviewResult { files })
    } else {
        let written = generator
            .generate(opts.output_dir)
            .wrap_err_with(|| format!("Failed to generate into '{}'", opts.output_dir.display()))?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files: written.files.len(),
            bytes: written.bytes,
            snapshot_dir: opts.snapshot_dir.map(Path::to_path_buf),
        })
    };

    let manifest = inputs.toml.manifest();
    Ok(GenerateReport {
        source_namespace: manifest.source.namespace.clone(),
        target_namespace: manifest.target.namespace.clone(),
        marker: model.marker.name.qualified(),
        units,
        warning_count,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::{write_colliding_universe, write_project};

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = Inputs::load(write_project(dir.path(), "")).unwrap();
        let output_dir = inputs.toml.output_dir();

        let report = generate(
            &inputs,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: true,
                snapshot_dir: None,
            },
        )
        .unwrap();

        assert!(!output_dir.exists());
        assert_eq!(report.marker, "com.acme.kotlin.dsl.AcmeDSL");
        assert_eq!(report.units.total(), 7);
        match report.result {
            GenerationResult::Preview(preview) => {
                assert_eq!(preview.files.len(), 7);
                assert!(preview.files[0].path.ends_with("AcmeDSL.kt"));
            }
            GenerationResult::Written(_) => panic!("dry run wrote files"),
        }
    }

    #[test]
    fn test_generate_writes_units_and_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = Inputs::load(write_project(dir.path(), "")).unwrap();
        let output_dir = dir.path().join("out");
        let snapshot_dir = dir.path().join("snapshots");

        let report = generate(
            &inputs,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: false,
                snapshot_dir: Some(&snapshot_dir),
            },
        )
        .unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected written result");
        };
        assert_eq!(written.files, 7);
        assert!(written.bytes > 0);
        assert!(snapshot_dir.join("transform.json").is_file());

        let widget = std::fs::read_to_string(
            output_dir.join("com/acme/kotlin/dsl/model/WidgetDSL.kt"),
        )
        .unwrap();
        assert!(widget.contains(" * Builds instances of type Widget:\n * A widget.\n"));
    }

    #[test]
    fn test_collisions_abort_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_project(dir.path(), "");
        write_colliding_universe(dir.path());
        let inputs = Inputs::load(config).unwrap();
        let output_dir = dir.path().join("out");

        let result = generate(
            &inputs,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: false,
                snapshot_dir: None,
            },
        );

        assert!(result.is_err());
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_qualify_policy_resolves_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_project(dir.path(), "\n[scan]\ncollisions = \"qualify\"\n");
        write_colliding_universe(dir.path());
        let inputs = Inputs::load(config).unwrap();
        let output_dir = dir.path().join("out");

        let report = generate(
            &inputs,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: false,
                snapshot_dir: None,
            },
        )
        .unwrap();

        assert_eq!(report.units.types, 5);
        assert!(output_dir.join("com/acme/kotlin/dsl/model/OuterWidgetDSL.kt").is_file());
        assert!(output_dir.join("com/acme/kotlin/dsl/model/WidgetDSL.kt").is_file());
    }
}
