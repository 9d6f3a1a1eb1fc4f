//! Core operations.
//!
//! This module contains the business logic for kdsl commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

use std::path::Path;

use kdsl_codegen::{
    Settings,
    pipeline::{Diagnostic, Plugin},
};
use kdsl_ir::Universe;
use kdsl_manifest::{DocIndex, KdslToml, load_universe};

pub use check::check;
pub use generate::{GenerateOptions, generate};

/// Everything a run reads: the manifest, the universe snapshot and the
/// documentation export it points to.
pub struct Inputs {
    pub toml: KdslToml,
    pub universe: Universe,
    pub docs: DocIndex,
}

impl Inputs {
    /// Load a kdsl.toml and the files it names.
    ///
    /// A manifest without `source.docs` runs with an empty documentation index.
    pub fn load(config: impl AsRef<Path>) -> kdsl_manifest::Result<Self> {
        let toml = KdslToml::open(config)?;
        let universe = load_universe(toml.universe_path())?;
        let docs = match toml.docs_path() {
            Some(path) => DocIndex::load(path)?,
            None => DocIndex::empty(),
        };
        Ok(Self {
            toml,
            universe,
            docs,
        })
    }

    pub fn settings(&self) -> Settings {
        Settings::from_manifest(self.toml.manifest())
    }
}

/// Prints warnings and errors to stderr as soon as a phase records them.
pub struct StderrPlugin;

impl Plugin for StderrPlugin {
    fn name(&self) -> &'static str {
        "stderr"
    }

    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        if !diagnostic.severity.is_info() {
            eprintln!("{}", diagnostic);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    use kdsl_codegen::testing::{FIXTURE, SOURCE_NAMESPACE, SUPERTYPE, TARGET_NAMESPACE};

    /// Write a kdsl.toml over the fixture library into `dir` and return its path.
    pub fn write_project(dir: &Path, extra: &str) -> PathBuf {
        std::fs::write(dir.join("universe.json"), FIXTURE).unwrap();
        std::fs::write(
            dir.join("docs.json"),
            r#"{ "types": [{ "name": "com.acme.model.Widget", "comment": "<p>A widget.</p>" }] }"#,
        )
        .unwrap();
        let manifest = format!(
            "[source]\nnamespace = \"{}\"\nsupertype = \"{}\"\nuniverse = \"universe.json\"\ndocs = \"docs.json\"\n\n\
             [target]\nnamespace = \"{}\"\noutput = \"generated\"\n{}",
            SOURCE_NAMESPACE, SUPERTYPE, TARGET_NAMESPACE, extra
        );
        let path = dir.join("kdsl.toml");
        std::fs::write(&path, manifest).unwrap();
        path
    }

    /// Replace the project's universe with the fixture plus a nested
    /// `Outer$Widget` whose unit name clashes with `Widget`'s.
    pub fn write_colliding_universe(dir: &Path) {
        let anchor = "{\n      \"name\": \"com.acme.model.Hidden\"";
        let nested = r#"{ "name": "com.acme.model.Outer$Widget", "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Outer$Widget$Builder" }] },
    { "name": "com.acme.model.Outer$Widget$Builder", "kind": "interface", "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Outer$Widget$Builder, com.acme.model.Outer$Widget>"] },
    "#;
        assert!(FIXTURE.contains(anchor));
        let universe = FIXTURE.replacen(anchor, &format!("{}{}", nested, anchor), 1);
        std::fs::write(dir.join("universe.json"), universe).unwrap();
    }
}
