use std::path::{Path, PathBuf};

use kdsl_codegen::dsl::MapUnit;
use kdsl_core::GeneratedFile;

use super::{GENERATED_HEADER, entry_point, unit_doc, unit_path};
use crate::{
    KotlinFile,
    ast::{Class, Fun, Param, Val},
};

/// `XMapDSL`: collects built or ready-made values under keys.
pub struct MapDslKt<'a> {
    unit: &'a MapUnit,
}

impl<'a> MapDslKt<'a> {
    pub fn new(unit: &'a MapUnit) -> Self {
        Self { unit }
    }

    fn class(&self) -> Class {
        let unit = self.unit;
        let (k, t) = (&unit.key_type, &unit.target_type);
        let pair = format!("Pair<{}, {}>", k, t);

        Class::new(&unit.name.name)
            .doc(unit_doc("Builds a map of type", t, &unit.comment))
            .annotation(&unit.marker)
            .group(&[
                &Val::new("map", format!("mutableMapOf<{}, {}>()", k, t)).private(),
                &Fun::new("build")
                    .internal()
                    .returns(format!("Map<{}, {}>", k, t))
                    .inline("map"),
            ])
            .member(
                Fun::new("o")
                    .doc(format!(
                        "Builds an object of type {} from\nthe given DSL in 'dslBlock' and adds it to the map at 'key'",
                        t
                    ))
                    .param(Param::new("key", k))
                    .param(Param::dsl_block(&unit.target_dsl))
                    .body_line(format!("map[key] = {}(dslBlock)", unit.target_entry_point)),
            )
            .member(
                Fun::new("unaryPlus")
                    .doc(format!("Adds a pair of {} -> {} to the map", k, t))
                    .operator()
                    .receiver(&pair)
                    .body_line("map[this.first] = this.second"),
            )
            .members(["Collection", "Array"].map(|container| {
                Fun::new("unaryPlus")
                    .doc(format!("Adds all given {} -> {} pairs to the map", k, t))
                    .operator()
                    .receiver(format!("{}<{}>", container, pair))
                    .body_line("this.forEach { map[it.first] = it.second }")
            }))
            .member(
                Fun::new("unaryPlus")
                    .doc(format!("Adds all entries in the given map of {} -> {}", k, t))
                    .operator()
                    .receiver(format!("Map<{}, {}>", k, t))
                    .body_line("map.putAll(this)"),
            )
    }
}

impl GeneratedFile for MapDslKt<'_> {
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
                unit_doc("Builds a map of type", &unit.target_type, &unit.comment),
            ))
            .render_with_header(GENERATED_HEADER)
    }
}
