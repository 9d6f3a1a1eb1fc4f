//! Test utilities for the scanner, transformer and renderers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{collections::BTreeMap, path::Path};

use eyre::{Result, WrapErr};
use kdsl_ir::Universe;
use kdsl_manifest::parse_universe;

use crate::Settings;

/// Root namespace of the fixture library.
pub const SOURCE_NAMESPACE: &str = "com.acme";

/// Root namespace the fixture DSL is generated into.
pub const TARGET_NAMESPACE: &str = "com.acme.kotlin.dsl";

/// Builder supertype of the fixture library.
pub const SUPERTYPE: &str = "com.acme.core.SdkBuilder";

/// A small builder-pattern library.
///
/// - `Widget` exercises every property role, sub-unit links of each kind
///   and a generic return inherited through `Named<B>`
/// - `Gadget` lives in a sub-package and links back to `Widget`
/// - `Part` inherits `label` from two interfaces at the same depth
/// - `Blank` has no qualifying groups, `Empty` only excluded ones
/// - `Orphan` has no static factory
/// - `AcmeClient` is a plain service taking buildable parameters
/// - `Hidden` and `Widget$BuilderImpl` must never be scanned
pub const FIXTURE: &str = r#"{
  "types": [
    {
      "name": "com.acme.core.SdkBuilder",
      "kind": "interface",
      "type_params": ["B", "T"],
      "methods": [{ "name": "build", "returns": "T" }]
    },
    {
      "name": "com.acme.core.CopyableBuilder",
      "kind": "interface",
      "type_params": ["B", "T"],
      "supertypes": ["com.acme.core.SdkBuilder<B, T>"],
      "methods": [
        { "name": "applyMutation", "params": ["java.util.function.Consumer<B>"], "returns": "B" },
        { "name": "copy", "params": ["java.util.function.Consumer<B>"], "returns": "B" }
      ]
    },
    {
      "name": "com.acme.core.Named",
      "kind": "interface",
      "type_params": ["B"],
      "methods": [{ "name": "label", "params": ["java.lang.String"], "returns": "B" }]
    },
    {
      "name": "com.acme.core.Labeled",
      "kind": "interface",
      "methods": [{ "name": "label", "params": ["java.lang.String"], "returns": "com.acme.core.Labeled" }]
    },
    {
      "name": "com.acme.model.Color",
      "kind": "enum"
    },
    {
      "name": "com.acme.model.Widget",
      "methods": [
        { "name": "builder", "static": true, "returns": "com.acme.model.Widget$Builder" },
        { "name": "toBuilder", "returns": "com.acme.model.Widget$Builder" },
        { "name": "size", "returns": "int" }
      ]
    },
    {
      "name": "com.acme.model.Widget$Builder",
      "kind": "interface",
      "supertypes": [
        "com.acme.core.CopyableBuilder<com.acme.model.Widget$Builder, com.acme.model.Widget>",
        "com.acme.core.Named<com.acme.model.Widget$Builder>"
      ],
      "methods": [
        { "name": "size", "params": ["int"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "color", "params": ["com.acme.model.Color"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "color", "params": ["java.lang.String"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "gadget", "params": ["com.acme.model.gadget.Gadget"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "gadget", "params": ["java.util.function.Consumer<com.acme.model.gadget.Gadget$Builder>"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "spare", "params": ["com.acme.model.gadget.Gadget$Builder"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "parts", "params": ["java.util.Collection<com.acme.model.Part>"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "parts", "params": ["com.acme.model.Part[]"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "attributes", "params": ["java.util.Map<java.lang.String, com.acme.model.Part>"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "enabled", "params": ["java.lang.Boolean"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "tags", "params": ["java.lang.String[]"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "onDone", "params": ["java.util.function.Consumer<java.lang.String>"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "reset", "returns": "com.acme.model.Widget$Builder" },
        { "name": "metadata", "params": ["java.lang.String", "java.lang.String"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "sdkFields", "returns": "java.util.List<java.lang.String>" },
        { "name": "lambda$0", "synthetic": true, "returns": "com.acme.model.Widget$Builder" }
      ]
    },
    {
      "name": "com.acme.model.Widget$BuilderImpl",
      "supertypes": ["com.acme.model.Widget$Builder"],
      "methods": [{ "name": "size", "params": ["int"], "returns": "com.acme.model.Widget$Builder" }]
    },
    {
      "name": "com.acme.model.gadget.Gadget",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.gadget.Gadget$Builder" }]
    },
    {
      "name": "com.acme.model.gadget.Gadget$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.CopyableBuilder<com.acme.model.gadget.Gadget$Builder, com.acme.model.gadget.Gadget>"],
      "methods": [
        { "name": "name", "params": ["java.lang.String"], "returns": "com.acme.model.gadget.Gadget$Builder" },
        { "name": "owner", "params": ["com.acme.model.Widget"], "returns": "com.acme.model.gadget.Gadget$Builder" }
      ]
    },
    {
      "name": "com.acme.model.Part",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Part$Builder" }]
    },
    {
      "name": "com.acme.model.Part$Builder",
      "kind": "interface",
      "supertypes": [
        "com.acme.core.CopyableBuilder<com.acme.model.Part$Builder, com.acme.model.Part>",
        "com.acme.core.Labeled",
        "com.acme.core.Named<com.acme.model.Part$Builder>"
      ],
      "methods": [{ "name": "weight", "params": ["double"], "returns": "com.acme.model.Part$Builder" }]
    },
    {
      "name": "com.acme.model.Blank",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Blank$Builder" }]
    },
    {
      "name": "com.acme.model.Blank$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Blank$Builder, com.acme.model.Blank>"]
    },
    {
      "name": "com.acme.model.Empty",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Empty$Builder" }]
    },
    {
      "name": "com.acme.model.Empty$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.CopyableBuilder<com.acme.model.Empty$Builder, com.acme.model.Empty>"]
    },
    {
      "name": "com.acme.model.Orphan"
    },
    {
      "name": "com.acme.model.Orphan$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.CopyableBuilder<com.acme.model.Orphan$Builder, com.acme.model.Orphan>"],
      "methods": [{ "name": "name", "params": ["java.lang.String"], "returns": "com.acme.model.Orphan$Builder" }]
    },
    {
      "name": "com.acme.model.Hidden",
      "annotations": ["SdkInternalApi"],
      "methods": [{ "name": "secret", "params": ["com.acme.model.Widget"] }]
    },
    {
      "name": "com.acme.service.AcmeClient",
      "kind": "interface",
      "methods": [
        { "name": "putWidget", "params": ["com.acme.model.Widget"] },
        { "name": "putWidget", "params": ["java.util.function.Consumer<com.acme.model.Widget$Builder>"] },
        { "name": "putParts", "params": ["java.util.List<? extends com.acme.model.Part>"] },
        { "name": "close" }
      ]
    }
  ]
}"#;

/// The fixture library as a type universe.
pub fn fixture_universe() -> Universe {
    universe_from(FIXTURE)
}

/// Parse a snapshot, panicking with the rendered error on failure.
pub fn universe_from(snapshot: &str) -> Universe {
    match parse_universe(snapshot, "fixture.json") {
        Ok(universe) => universe,
        Err(err) => panic!("invalid fixture snapshot: {}", err),
    }
}

/// Default settings for the fixture namespaces.
pub fn settings() -> Settings {
    Settings::new(SOURCE_NAMESPACE, TARGET_NAMESPACE).with_supertype(SUPERTYPE)
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {}\n", exp));
                diff.push_str(&format!("  actual:   {}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate into a temporary directory and return it.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Every file below `root`, keyed by `/`-separated relative path.
pub fn read_tree(root: &Path) -> Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();
    collect_files(root, root, &mut files)?;
    Ok(files)
}

fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<String, String>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).wrap_err_with(|| format!("failed to list '{}'", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else {
            let relative = path
                .strip_prefix(root)?
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let content = std::fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
            files.insert(relative, content);
        }
    }
    Ok(())
}
