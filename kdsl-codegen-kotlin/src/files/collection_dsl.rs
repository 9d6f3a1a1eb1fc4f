use std::path::{Path, PathBuf};

use kdsl_codegen::dsl::CollectionUnit;
use kdsl_core::GeneratedFile;

use super::{GENERATED_HEADER, entry_point, unit_doc, unit_path};
use crate::{
    KotlinFile,
    ast::{Class, Fun, Param, Val},
};

/// `XCollectionDSL`: collects built or ready-made elements into a list.
pub struct CollectionDslKt<'a> {
    unit: &'a CollectionUnit,
}

impl<'a> CollectionDslKt<'a> {
    pub fn new(unit: &'a CollectionUnit) -> Self {
        Self { unit }
    }

    fn class(&self) -> Class {
        let unit = self.unit;
        let t = &unit.target_type;

        Class::new(&unit.name.name)
            .doc(unit_doc("Builds a collection of type", t, &unit.comment))
            .annotation(&unit.marker)
            .group(&[
                &Val::new("list", format!("ArrayList<{}>()", t)).private(),
                &Fun::new("build")
                    .internal()
                    .returns(format!("List<{}>", t))
                    .inline("list"),
            ])
            .member(
                Fun::new("o")
                    .doc(format!(
                        "Builds an object of type {} from\nthe given DSL in 'dslBlock' and adds it to the collection",
                        t
                    ))
                    .param(Param::dsl_block(&unit.target_dsl))
                    .body_line(format!("list.add({}(dslBlock))", unit.target_entry_point)),
            )
            .member(
                Fun::new("unaryPlus")
                    .doc(format!("Adds a {} to the collection built by this DSL", t))
                    .operator()
                    .receiver(t)
                    .body_line("list.add(this)"),
            )
            .members(["Collection", "Array"].map(|container| {
                Fun::new("unaryPlus")
                    .doc(format!(
                        "Adds all given {} instances to the collection built by this DSL",
                        t
                    ))
                    .operator()
                    .receiver(format!("{}<{}>", container, t))
                    .body_line("list.addAll(this)")
            }))
    }
}

impl GeneratedFile for CollectionDslKt<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        unit_path(base, &self.unit.name)
    }

    fn render(&self) -> String {
        let unit = self.unit;
        KotlinFile::new(unit.name.package.as_str())
            .imports(unit.imports.iter().cloned())
            .add(self.class())
            .add(entry_point(
                &unit.name,
                unit_doc("Builds a collection of type", &unit.target_type, &unit.comment),
            ))
            .render_with_header(GENERATED_HEADER)
    }
}
