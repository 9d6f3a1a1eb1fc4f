use std::path::{Path, PathBuf};

use kdsl_codegen::dsl::TypeUnit;
use kdsl_core::GeneratedFile;

use super::{GENERATED_HEADER, entry_point, link_argument, unit_doc, unit_path};
use crate::{
    KotlinFile,
    ast::{Class, Fun, Param, Val, WriteOnlyVar, identifier},
};

const BUILDER_DEPRECATION: &str = "Deprecated(\"Usage of the builder field is not recommended. It might vanish in any new release!\", level = WARNING)";

/// `XDSL`: wraps one builder instance.
///
/// Member order is properties, secondaries, functions, sub-unit links;
/// each list arrives sorted by name. Extension links follow the entry point
/// at top level.
pub struct TypeDslKt<'a> {
    unit: &'a TypeUnit,
}

impl<'a> TypeDslKt<'a> {
    pub fn new(unit: &'a TypeUnit) -> Self {
        Self { unit }
    }

    fn class(&self) -> Class {
        let unit = self.unit;
        let class = Class::new(&unit.name.name)
            .doc(unit_doc("Builds instances of type", &unit.target_type, &unit.comment))
            .annotation(&unit.marker)
            .group(&[
                &Val::new("builder", format!("{}.{}()", unit.target_type, unit.factory))
                    .ty(&unit.builder_type)
                    .annotation(BUILDER_DEPRECATION),
                &Fun::new("build")
                    .internal()
                    .returns(&unit.target_type)
                    .inline("builder.build()"),
            ]);

        let properties = unit.properties.iter().map(|p| {
            WriteOnlyVar::new(
                &p.name,
                &p.kotlin_type,
                format!("builder.{}(value)", identifier(&p.name)),
            )
                .doc_if_present(&p.comment)
        });
        let secondaries = unit.secondaries.iter().map(|p| {
            Fun::new(&p.name)
                .doc_if_present(&p.comment)
                .param(Param::new("value", &p.kotlin_type))
                .body_line(format!("builder.{}(value)", identifier(&p.name)))
        });
        let functions = unit.functions.iter().map(|f| {
            Fun::new(&f.name)
                .doc_if_present(&f.comment)
                .body_line(format!("builder.{}()", identifier(&f.name)))
        });
        let sub_links = unit.sub_links.iter().map(|link| {
            Fun::new(&link.name)
                .doc_if_present(&link.comment)
                .param(Param::dsl_block(&link.target_dsl))
                .body_line(format!(
                    "builder.{}({})",
                    identifier(&link.name),
                    link_argument(link.kind, &link.target_dsl, &link.target_entry_point)
                ))
        });

        class
            .members(properties)
            .members(secondaries)
            .members(functions)
            .members(sub_links)
    }

    fn extensions(&self) -> impl Iterator<Item = Fun> + '_ {
        self.unit.extensions.iter().map(|ext| {
            Fun::new(&ext.name)
                .doc_if_present(&ext.comment)
                .receiver(&ext.receiver_type)
                .param(Param::dsl_block(&ext.target_dsl))
                .expression(format!(
                    "this.{}({})",
                    identifier(&ext.name),
                    link_argument(ext.kind, &ext.target_dsl, &ext.target_entry_point)
                ))
        })
    }

    fn imports(&self) -> Vec<String> {
        let mut imports = self.unit.imports.clone();
        imports.push("kotlin.DeprecationLevel.WARNING".to_string());
        if !self.unit.properties.is_empty() {
            imports.push("kotlin.DeprecationLevel.HIDDEN".to_string());
        }
        imports
    }
}

impl GeneratedFile for TypeDslKt<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        unit_path(base, &self.unit.name)
    }

    fn render(&self) -> String {
        let unit = self.unit;
        KotlinFile::new(unit.name.package.as_str())
            .file_annotation("Suppress(\"DEPRECATION\")")
            .imports(self.imports())
            .add(self.class())
            .add(entry_point(
                &unit.name,
                unit_doc("Builds instances of type", &unit.target_type, &unit.comment),
            ))
            .add_all(self.extensions())
            .render_with_header(GENERATED_HEADER)
    }
}
