//! Generation settings shared by every phase.

use std::collections::BTreeMap;

use kdsl_core::{capitalize, last_segment};
use kdsl_ir::package_of;
use kdsl_manifest::{
    CollisionPolicy, DEFAULT_SUPERTYPE, Manifest, default_builder_suffixes,
    default_excluded_methods, default_implicit_imports,
};

/// What to scan and where the generated units go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root namespace of the scanned library.
    pub source_namespace: String,
    /// Root namespace of the generated units.
    pub target_namespace: String,
    /// Generic supertype whose arguments are (builder, target).
    pub supertype: String,
    /// Method names that never become DSL members.
    pub excluded_methods: Vec<String>,
    /// Return type name suffixes that mark a builder-shaped return.
    pub builder_suffixes: Vec<String>,
    /// Packages whose direct members never need an import.
    pub implicit_imports: Vec<String>,
    /// Qualified host type to rendered Kotlin type.
    pub type_mapping: BTreeMap<String, String>,
    pub collisions: CollisionPolicy,
}

impl Settings {
    /// Settings with every option at its default.
    pub fn new(source_namespace: impl Into<String>, target_namespace: impl Into<String>) -> Self {
        Self {
            source_namespace: source_namespace.into(),
            target_namespace: target_namespace.into(),
            supertype: DEFAULT_SUPERTYPE.to_string(),
            excluded_methods: default_excluded_methods(),
            builder_suffixes: default_builder_suffixes(),
            implicit_imports: default_implicit_imports(),
            type_mapping: BTreeMap::new(),
            collisions: CollisionPolicy::default(),
        }
    }

    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            source_namespace: manifest.source.namespace.clone(),
            target_namespace: manifest.target.namespace.clone(),
            supertype: manifest.source.supertype.clone(),
            excluded_methods: manifest.scan.excluded_methods.clone(),
            builder_suffixes: manifest.scan.builder_suffixes.clone(),
            implicit_imports: manifest.scan.implicit_imports.clone(),
            type_mapping: manifest.target.type_mapping.clone(),
            collisions: manifest.scan.collisions,
        }
    }

    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertype = supertype.into();
        self
    }

    pub fn with_collisions(mut self, collisions: CollisionPolicy) -> Self {
        self.collisions = collisions;
        self
    }

    pub fn with_type_mapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.type_mapping.insert(from.into(), to.into());
        self
    }

    /// Name of the marker annotation (`DynamodbDSL` for `...services.dynamodb`).
    pub fn marker_name(&self) -> String {
        format!("{}DSL", capitalize(last_segment(&self.source_namespace)))
    }

    /// Map a scanned package into the target namespace.
    ///
    /// Sub-packages of the source root keep their relative path; anything
    /// outside the source root lands in the target root.
    pub fn target_package(&self, package: &str) -> String {
        let source = self.source_namespace.as_str();
        match package.strip_prefix(source) {
            Some("") => self.target_namespace.clone(),
            Some(rest) if rest.starts_with('.') => format!("{}{}", self.target_namespace, rest),
            _ => self.target_namespace.clone(),
        }
    }

    pub fn is_excluded_method(&self, name: &str) -> bool {
        self.excluded_methods.iter().any(|m| m == name)
    }

    /// Returns true if `name` is declared directly in a namespace that needs
    /// no import. Sub-packages are not covered.
    pub fn is_implicit_import(&self, name: &str) -> bool {
        let package = package_of(name);
        self.implicit_imports.iter().any(|ns| ns == package)
    }

    pub fn has_builder_suffix(&self, name: &str) -> bool {
        self.builder_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}
