//! Documentation index.
//!
//! Maps qualified type names and qualified method signatures
//! (`com.acme.Widget$Builder.name(java.lang.String)`) to plain-text comments.

use std::{collections::HashMap, path::Path, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result, error::SourceContext};

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid markup pattern"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\s*[\r\n])+").expect("valid blank line pattern"));

#[derive(Debug, Deserialize)]
struct TypeEntry {
    name: String,
    #[serde(default)]
    comment: String,
}

#[derive(Debug, Deserialize)]
struct MethodEntry {
    signature: String,
    #[serde(default)]
    comment: String,
}

/// Comments keyed by qualified type name and method signature.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    types: HashMap<String, String>,
    methods: HashMap<String, String>,
    warnings: Vec<String>,
}

impl DocIndex {
    /// An index without any entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a documentation export.
    ///
    /// A missing file yields an empty index with a warning; a file that is
    /// not valid JSON is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let mut index = Self::empty();
            index.warnings.push(format!(
                "documentation export '{}' not found, comments will be empty",
                path.display()
            ));
            return Ok(index);
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse a documentation export with the given filename for error reporting.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let document: Value = serde_json::from_str(content)
            .map_err(|e| ctx.json_error("documentation export", e))?;
        let Value::Object(mut sections) = document else {
            return Err(ctx.validation_error("documentation export must be a JSON object", None));
        };

        let mut index = Self::empty();
        for (i, entry) in take_entries(&mut sections, "types", &mut index.warnings) {
            match serde_json::from_value::<TypeEntry>(entry) {
                Ok(entry) => {
                    index.types.insert(entry.name, strip_markup(&entry.comment));
                }
                Err(err) => index
                    .warnings
                    .push(format!("skipping malformed type entry #{}: {}", i, err)),
            }
        }
        for (i, entry) in take_entries(&mut sections, "methods", &mut index.warnings) {
            match serde_json::from_value::<MethodEntry>(entry) {
                Ok(entry) => {
                    index.methods.insert(entry.signature, strip_markup(&entry.comment));
                }
                Err(err) => index
                    .warnings
                    .push(format!("skipping malformed method entry #{}: {}", i, err)),
            }
        }
        Ok(index)
    }

    /// Add a type comment, replacing any existing one.
    pub fn insert_type(&mut self, name: impl Into<String>, comment: &str) {
        self.types.insert(name.into(), strip_markup(comment));
    }

    /// Add a method comment, replacing any existing one.
    pub fn insert_method(&mut self, signature: impl Into<String>, comment: &str) {
        self.methods.insert(signature.into(), strip_markup(comment));
    }

    pub fn type_comment(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }

    pub fn method_comment(&self, signature: &str) -> Option<&str> {
        self.methods.get(signature).map(String::as_str)
    }

    /// Problems found while loading that did not prevent loading.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.methods.is_empty()
    }
}

fn take_entries(
    sections: &mut serde_json::Map<String, Value>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Vec<(usize, Value)> {
    match sections.remove(key) {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries.into_iter().enumerate().collect(),
        Some(_) => {
            warnings.push(format!("ignoring '{}': expected an array", key));
            Vec::new()
        }
    }
}

/// Remove markup tags, collapse runs of blank lines and trim.
pub fn strip_markup(text: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(text, "");
    BLANK_LINES
        .replace_all(&without_tags, "\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<p>A <b>widget</b>.</p>\n\n\n  \n<p>Second.</p>  "),
            "A widget.\n\nSecond."
        );
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_parse_index() {
        let index = DocIndex::parse(
            r#"{
              "types": [{ "name": "com.acme.Widget", "comment": "<p>A widget.</p>" }],
              "methods": [{ "signature": "com.acme.Widget$Builder.size(int)", "comment": "Size." }]
            }"#,
            "docs.json",
        )
        .unwrap();

        assert_eq!(index.type_comment("com.acme.Widget"), Some("A widget."));
        assert_eq!(
            index.method_comment("com.acme.Widget$Builder.size(int)"),
            Some("Size.")
        );
        assert_eq!(index.type_comment("com.acme.Gadget"), None);
        assert!(index.warnings().is_empty());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let index = DocIndex::parse(
            r#"{
              "types": [{ "comment": "no name" }, { "name": "com.acme.Widget" }],
              "methods": 42
            }"#,
            "docs.json",
        )
        .unwrap();

        assert_eq!(index.type_comment("com.acme.Widget"), Some(""));
        assert_eq!(index.warnings().len(), 2);
    }

    #[test]
    fn test_unparseable_document_is_fatal() {
        assert!(DocIndex::parse("<html>", "docs.json").is_err());
        assert!(DocIndex::parse("[]", "docs.json").is_err());
    }

    #[test]
    fn test_missing_file_yields_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = DocIndex::load(dir.path().join("missing.json")).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.warnings().len(), 1);
    }
}
