//! End-to-end generation properties: determinism, clearing, collisions
//! and documentation independence.

use std::collections::BTreeMap;

use kdsl_codegen::source::Scanner;
use kdsl_codegen::testing::{
    FIXTURE, SOURCE_NAMESPACE, SUPERTYPE, TARGET_NAMESPACE, fixture_universe, generate_to_temp,
    read_tree, settings, universe_from,
};
use kdsl_codegen_kotlin::{generate, generate_with};
use kdsl_ir::TypeRef;
use kdsl_manifest::{CollisionPolicy, DocIndex};

fn generate_fixture(docs: &DocIndex) -> BTreeMap<String, String> {
    let universe = fixture_universe();
    let dir = generate_to_temp(|out| {
        generate_with(&universe, &settings(), docs, &out.join("kotlin"))?;
        Ok(())
    })
    .unwrap();
    read_tree(&dir.path().join("kotlin")).unwrap()
}

/// Lines that are not part of a KDoc block.
fn code_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter(|line| {
            let line = line.trim_start();
            !(line.starts_with("/**") || line.starts_with('*'))
        })
        .collect()
}

#[test]
fn test_output_is_idempotent() {
    assert_eq!(
        generate_fixture(&DocIndex::empty()),
        generate_fixture(&DocIndex::empty())
    );
}

#[test]
fn test_snapshot_order_does_not_matter() {
    let mut document: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    document["types"].as_array_mut().unwrap().reverse();
    for ty in document["types"].as_array_mut().unwrap() {
        if let Some(methods) = ty.get_mut("methods").and_then(|m| m.as_array_mut()) {
            methods.reverse();
        }
    }
    let reversed = universe_from(&document.to_string());

    let dir = generate_to_temp(|out| {
        generate_with(&reversed, &settings(), &DocIndex::empty(), out)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(read_tree(dir.path()).unwrap(), generate_fixture(&DocIndex::empty()));
}

#[test]
fn test_one_file_per_unit() {
    let files = generate_fixture(&DocIndex::empty());
    let paths: Vec<&str> = files.keys().map(String::as_str).collect();

    assert_eq!(
        paths,
        vec![
            "com/acme/kotlin/dsl/AcmeDSL.kt",
            "com/acme/kotlin/dsl/model/BlankDSL.kt",
            "com/acme/kotlin/dsl/model/PartCollectionDSL.kt",
            "com/acme/kotlin/dsl/model/PartDSL.kt",
            "com/acme/kotlin/dsl/model/PartMapDSL.kt",
            "com/acme/kotlin/dsl/model/WidgetDSL.kt",
            "com/acme/kotlin/dsl/model/gadget/GadgetDSL.kt",
        ]
    );
    assert!(files.values().all(|c| c.starts_with(kdsl_core::GENERATED_HEADER)));
}

#[test]
fn test_overloads_collapse_to_one_member() {
    let files = generate_fixture(&DocIndex::empty());
    let widget = &files["com/acme/kotlin/dsl/model/WidgetDSL.kt"];

    assert_eq!(widget.matches("  var parts: ").count(), 1);
    assert_eq!(widget.matches("  var gadget: ").count(), 1);
    assert_eq!(widget.matches("  fun color(").count(), 1);
    assert!(!widget.contains("metadata"));
    assert!(!widget.contains("applyMutation"));
    assert!(!widget.contains("sdkFields"));
}

#[test]
fn test_shared_collection_unit_is_generated_once() {
    let files = generate_fixture(&DocIndex::empty());

    let collection_units = files.keys().filter(|p| p.ends_with("CollectionDSL.kt")).count();
    assert_eq!(collection_units, 1);
    // Widget.parts and AcmeClient.putParts both build through it
    assert!(files["com/acme/kotlin/dsl/model/WidgetDSL.kt"].contains("buildPartCollection(dslBlock)"));
    assert!(files["com/acme/kotlin/dsl/model/PartDSL.kt"].contains("buildPartCollection(dslBlock)"));
}

#[test]
fn test_internal_types_are_never_exposed() {
    let files = generate_fixture(&DocIndex::empty());
    for content in files.values() {
        assert!(!content.contains("Hidden"));
        assert!(!content.contains("secret"));
        assert!(!content.contains("Orphan"));
        assert!(!content.contains("BuilderImpl"));
    }
}

#[test]
fn test_documentation_only_changes_comments() {
    let mut docs = DocIndex::empty();
    docs.insert_type("com.acme.model.Widget", "A widget.");
    docs.insert_method("com.acme.model.Widget$Builder.size(int)", "Size in mm.");
    docs.insert_method("com.acme.model.Widget$Builder.reset()", "Starts over.");

    let documented = generate_fixture(&docs);
    let bare = generate_fixture(&DocIndex::empty());

    assert_eq!(documented.keys().collect::<Vec<_>>(), bare.keys().collect::<Vec<_>>());
    for (path, content) in &documented {
        assert_eq!(code_lines(content), code_lines(&bare[path]), "{}", path);
    }
    assert!(documented["com/acme/kotlin/dsl/model/WidgetDSL.kt"].contains("   * Size in mm.\n"));
}

#[test]
fn test_output_root_is_cleared() {
    let universe = fixture_universe();
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("generated");
    std::fs::create_dir_all(out.join("com/acme/kotlin/dsl/model")).unwrap();
    std::fs::write(out.join("com/acme/kotlin/dsl/model/GoneDSL.kt"), "stale").unwrap();

    generate_with(&universe, &settings(), &DocIndex::empty(), &out).unwrap();

    let files = read_tree(&out).unwrap();
    assert!(!files.contains_key("com/acme/kotlin/dsl/model/GoneDSL.kt"));
    assert_eq!(files.len(), 7);
}

#[test]
fn test_generate_uses_default_supertype() {
    // The fixture's builders implement a custom supertype, so the defaults find nothing.
    let universe = fixture_universe();
    let dir = tempfile::TempDir::new().unwrap();

    let result = generate(
        &universe,
        SOURCE_NAMESPACE,
        TARGET_NAMESPACE,
        &DocIndex::empty(),
        dir.path(),
    )
    .unwrap();

    assert_eq!(result.files.len(), 1);
    assert!(dir.path().join("com/acme/kotlin/dsl/AcmeDSL.kt").is_file());
    assert_ne!(SUPERTYPE, kdsl_manifest::DEFAULT_SUPERTYPE);
}

const COLLIDING: &str = r#"{
  "types": [
    {
      "name": "com.acme.core.SdkBuilder",
      "kind": "interface",
      "type_params": ["B", "T"]
    },
    {
      "name": "com.acme.model.Widget",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Widget$Builder" }]
    },
    {
      "name": "com.acme.model.Widget$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Widget$Builder, com.acme.model.Widget>"]
    },
    {
      "name": "com.acme.model.Outer$Widget",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Outer$Widget$Builder" }]
    },
    {
      "name": "com.acme.model.Outer$Widget$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Outer$Widget$Builder, com.acme.model.Outer$Widget>"]
    }
  ]
}"#;

#[test]
fn test_collisions_fail_by_default() {
    let universe = universe_from(COLLIDING);
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("out");

    let err = generate_with(&universe, &settings(), &DocIndex::empty(), &out).unwrap_err();

    assert!(err.to_string().contains("validation failed"));
    assert!(!out.exists());
}

#[test]
fn test_qualified_collisions_import_outer_class() {
    let universe = universe_from(COLLIDING);
    let settings = settings().with_collisions(CollisionPolicy::Qualify);
    let dir = tempfile::TempDir::new().unwrap();

    generate_with(&universe, &settings, &DocIndex::empty(), dir.path()).unwrap();

    let files = read_tree(dir.path()).unwrap();
    let outer = &files["com/acme/kotlin/dsl/model/OuterWidgetDSL.kt"];
    assert!(outer.contains("import com.acme.model.Outer\n"));
    assert!(outer.contains("  val builder: Outer.Widget.Builder = Outer.Widget.builder()\n"));
    assert!(outer.contains("fun buildOuterWidget(dslBlock: OuterWidgetDSL.() -> Unit) =\n"));
    assert!(files.contains_key("com/acme/kotlin/dsl/model/WidgetDSL.kt"));
}

const METER: &str = r#"{
  "types": [
    {
      "name": "com.acme.core.SdkBuilder",
      "kind": "interface",
      "type_params": ["B", "T"],
      "methods": [{ "name": "build", "returns": "T" }]
    },
    {
      "name": "com.acme.core.Counting",
      "kind": "interface",
      "methods": [
        { "name": "count", "params": ["int"], "returns": "com.acme.core.Counting" },
        { "name": "count", "params": ["java.lang.Integer"], "returns": "com.acme.core.Counting" }
      ]
    },
    {
      "name": "com.acme.model.Meter",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Meter$Builder" }]
    },
    {
      "name": "com.acme.model.Meter$Builder",
      "kind": "interface",
      "supertypes": [
        "com.acme.core.SdkBuilder<com.acme.model.Meter$Builder, com.acme.model.Meter>",
        "com.acme.core.Counting"
      ],
      "methods": [
        { "name": "count", "params": ["java.lang.Integer"], "returns": "com.acme.model.Meter$Builder" },
        { "name": "count", "params": ["int"], "returns": "com.acme.model.Meter$Builder" }
      ]
    }
  ]
}"#;

#[test]
fn test_covariant_primitive_and_boxed_overloads() {
    let universe = universe_from(METER);
    let settings = settings();
    let docs = DocIndex::empty();

    let model = Scanner::new(&universe, &settings, &docs).scan(&mut Vec::new());
    let counts = &model.builder_for("com.acme.model.Meter").unwrap().groups["count"].methods;
    assert_eq!(counts.len(), 2);
    for method in counts {
        assert_eq!(method.returns, TypeRef::class("com.acme.model.Meter$Builder"));
        assert_eq!(method.declaring, "com.acme.model.Meter$Builder");
    }

    let dir = tempfile::TempDir::new().unwrap();
    generate_with(&universe, &settings, &docs, dir.path()).unwrap();

    let files = read_tree(dir.path()).unwrap();
    let meter = &files["com/acme/kotlin/dsl/model/MeterDSL.kt"];
    assert_eq!(meter.matches("  var count: Int\n").count(), 1);
    assert_eq!(meter.matches("  fun count(value: Int?) {\n").count(), 1);
    assert_eq!(meter.matches("builder.count(value)").count(), 2);
}
