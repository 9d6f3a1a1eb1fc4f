//! Kotlin renderer entry points.

use std::path::Path;

use eyre::Result;
use kdsl_codegen::{
    Settings,
    dsl::DslModel,
    generation::{FileCategory, FileEntry, FileRegistry},
    pipeline::{CompilationContext, Pipeline},
};
use kdsl_core::{GenerateResult, LanguageCodegen, PreviewFile, clear_dir};
use kdsl_ir::TypeUniverse;
use kdsl_manifest::DocIndex;

use crate::files::{CollectionDslKt, MapDslKt, MarkerKt, TypeDslKt};

/// Renders a [`DslModel`] into Kotlin files.
///
/// Files are rendered once, on construction; `preview` and `generate`
/// hand out the same content.
#[derive(Debug)]
pub struct Generator {
    model: DslModel,
    registry: FileRegistry,
}

impl Generator {
    /// Render every unit of `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if two units map to the same file.
    pub fn new(model: DslModel) -> Result<Self> {
        let mut registry = FileRegistry::new();
        registry.register(FileEntry::from_generated(
            &MarkerKt::new(&model.marker),
            FileCategory::Marker,
        ))?;
        for unit in &model.collections {
            registry.register(FileEntry::from_generated(
                &CollectionDslKt::new(unit),
                FileCategory::Collection,
            ))?;
        }
        for unit in &model.maps {
            registry.register(FileEntry::from_generated(&MapDslKt::new(unit), FileCategory::Map))?;
        }
        for unit in &model.types {
            registry.register(FileEntry::from_generated(&TypeDslKt::new(unit), FileCategory::Type))?;
        }
        Ok(Self { model, registry })
    }

    /// Take the DSL model out of a finished pipeline run.
    pub fn from_context(ctx: &mut CompilationContext<'_>) -> Result<Self> {
        Self::new(ctx.take_dsl()?)
    }

    pub fn model(&self) -> &DslModel {
        &self.model
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn preview(&self) -> Vec<PreviewFile> {
        self.registry.preview()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        clear_dir(output_dir)?;
        let stats = self.registry.write_all(output_dir)?;
        Ok(GenerateResult {
            files: stats.written_paths,
            bytes: stats.bytes,
        })
    }
}

/// Scan `universe` for builders below `source_namespace` and write the
/// Kotlin DSL for them below `output_root`, under `target_namespace`.
///
/// The output root is cleared first.
pub fn generate(
    universe: &dyn TypeUniverse,
    source_namespace: &str,
    target_namespace: &str,
    docs: &DocIndex,
    output_root: &Path,
) -> Result<GenerateResult> {
    let settings = Settings::new(source_namespace, target_namespace);
    generate_with(universe, &settings, docs, output_root)
}

/// [`generate`] with full control over the scan settings.
pub fn generate_with(
    universe: &dyn TypeUniverse,
    settings: &Settings,
    docs: &DocIndex,
    output_root: &Path,
) -> Result<GenerateResult> {
    let mut ctx = Pipeline::new().run(universe, settings.clone(), docs.clone())?;
    Generator::from_context(&mut ctx)?.generate(output_root)
}
