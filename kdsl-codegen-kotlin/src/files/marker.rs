use std::path::{Path, PathBuf};

use kdsl_codegen::dsl::MarkerUnit;
use kdsl_core::GeneratedFile;

use super::{GENERATED_HEADER, unit_path};
use crate::{KotlinFile, RawCode};

/// The `@DslMarker` annotation class scoping every unit of a run.
pub struct MarkerKt<'a> {
    unit: &'a MarkerUnit,
}

impl<'a> MarkerKt<'a> {
    pub fn new(unit: &'a MarkerUnit) -> Self {
        Self { unit }
    }
}

impl GeneratedFile for MarkerKt<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        unit_path(base, &self.unit.name)
    }

    fn render(&self) -> String {
        KotlinFile::new(self.unit.name.package.as_str())
            .add(RawCode::new(format!(
                "@DslMarker\nannotation class {}",
                self.unit.name.name
            )))
            .render_with_header(GENERATED_HEADER)
    }
}
