//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub source_namespace: String,
    pub target_namespace: String,
    /// Qualified name of the marker annotation.
    pub marker: String,
    pub units: UnitCounts,
    /// Warnings recorded by the pipeline (already printed while it ran).
    pub warning_count: usize,
    pub result: GenerationResult,
}

/// Units per category, the marker excluded.
#[derive(Debug, Clone, Copy)]
pub struct UnitCounts {
    pub collections: usize,
    pub maps: usize,
    pub types: usize,
}

impl UnitCounts {
    /// Every unit, the marker included.
    pub fn total(&self) -> usize {
        1 + self.collections + self.maps + self.types
    }
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Output root.
    pub output_dir: PathBuf,
    /// Number of files written.
    pub files: usize,
    /// Total bytes written.
    pub bytes: usize,
    /// Path to phase snapshots, if requested.
    pub snapshot_dir: Option<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the output root.
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(dir) = &written.snapshot_dir {
            out.key_value("Pipeline snapshots written to", &dir.display().to_string());
            out.newline();
        }

        out.preformatted(&format!("{} -> {}", self.source_namespace, self.target_namespace));
        out.newline();

        self.render_units(out);
        out.newline();

        out.key_value(
            "Generated",
            &format!(
                "{} ({} files, {} bytes)",
                written.output_dir.display(),
                written.files,
                written.bytes
            ),
        );
        if self.warning_count > 0 {
            out.key_value("Warnings", &self.warning_count.to_string());
        }
    }

    fn render_units(&self, out: &mut dyn Output) {
        out.section(&format!("Units ({})", self.units.total()));
        out.list_item(&format!("marker {}", self.marker));
        out.list_item(&plural(self.units.collections, "collection unit"));
        out.list_item(&plural(self.units.maps, "map unit"));
        out.list_item(&plural(self.units.types, "type unit"));
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}
