//! Import collection for generated units.

use std::collections::BTreeSet;

use kdsl_ir::{TypeRef, package_of};

use crate::Settings;

/// Collects the qualified names a unit refers to and keeps the ones that
/// need an import statement.
///
/// Nested names (`Outer$Inner`) import their outermost class, since units
/// refer to them as `Outer.Inner`. Names declared directly in an implicitly
/// imported namespace (not its sub-packages), in the unit's own package,
/// names without a package and names with a type mapping are dropped on
/// insertion. Iteration is sorted.
///
/// # Example
///
/// ```
/// use kdsl_codegen::{Settings, generation::ImportCollector};
///
/// let settings = Settings::new("com.acme", "com.acme.kotlin.dsl");
/// let mut imports = ImportCollector::new(&settings, "com.acme.kotlin.dsl.model");
/// imports.add("com.acme.model.Widget");
/// imports.add("com.acme.model.Widget$Builder");
/// imports.add("java.lang.String");
/// imports.add("com.acme.kotlin.dsl.model.WidgetDSL");
///
/// assert_eq!(imports.into_sorted(), vec!["com.acme.model.Widget"]);
/// ```
#[derive(Debug, Clone)]
pub struct ImportCollector<'s> {
    settings: &'s Settings,
    package: String,
    names: BTreeSet<String>,
}

impl<'s> ImportCollector<'s> {
    /// An empty collector for a unit in `package`.
    pub fn new(settings: &'s Settings, package: impl Into<String>) -> Self {
        Self {
            settings,
            package: package.into(),
            names: BTreeSet::new(),
        }
    }

    /// Add a qualified name, unless it needs no import.
    pub fn add(&mut self, name: &str) {
        if self.settings.type_mapping.contains_key(name) {
            return;
        }
        let name = outermost_class(name);
        if self.needs_import(name) {
            self.names.insert(name.to_string());
        }
    }

    /// Add every qualified name.
    pub fn add_all<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.add(name.as_ref());
        }
    }

    /// Add every class a type refers to.
    pub fn add_type(&mut self, ty: &TypeRef) {
        let mut classes = Vec::new();
        ty.collect_classes(&mut classes);
        self.add_all(classes);
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector<'_>) {
        self.add_all(&other.names);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The collected imports in lexical order.
    pub fn into_sorted(self) -> Vec<String> {
        self.names.into_iter().collect()
    }

    fn needs_import(&self, name: &str) -> bool {
        let package = package_of(name);
        !package.is_empty()
            && package != self.package
            && !self.settings.is_implicit_import(name)
            && !self.settings.type_mapping.contains_key(name)
    }
}

fn outermost_class(name: &str) -> &str {
    name.split('$').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::new("com.acme", "com.acme.kotlin.dsl")
            .with_type_mapping("java.time.Instant", "java.time.Instant")
    }

    #[test]
    fn test_filters() {
        let settings = settings();
        let mut imports = ImportCollector::new(&settings, "com.acme.kotlin.dsl.model");
        imports.add_all([
            "com.acme.kotlin.dsl.AcmeDSL",
            "com.acme.kotlin.dsl.model.PartDSL",
            "com.acme.model.Widget$Builder",
            "java.util.function.Consumer",
            "java.lang.String",
            "java.time.Instant",
            "int",
        ]);

        assert_eq!(
            imports.into_sorted(),
            vec![
                "com.acme.kotlin.dsl.AcmeDSL",
                "com.acme.model.Widget",
                "java.util.function.Consumer",
            ]
        );
    }

    #[test]
    fn test_nested_names_import_outermost_class() {
        let settings = settings();
        let mut imports = ImportCollector::new(&settings, "com.acme.kotlin.dsl.model");
        imports.add("com.acme.model.Outer$Widget$Builder");
        imports.add("java.util.Map$Entry");

        assert_eq!(imports.into_sorted(), vec!["com.acme.model.Outer"]);
    }

    #[test]
    fn test_add_type_collects_arguments() {
        let settings = settings();
        let mut imports = ImportCollector::new(&settings, "com.acme.kotlin.dsl.model");
        imports.add_type(&TypeRef::parameterized(
            "java.util.Map",
            vec![
                TypeRef::class("java.time.Duration"),
                TypeRef::extends(TypeRef::class("com.acme.model.Part")),
            ],
        ));

        assert_eq!(
            imports.into_sorted(),
            vec!["com.acme.model.Part", "java.time.Duration"]
        );
    }

    #[test]
    fn test_merge_keeps_sorted_unique() {
        let settings = settings();
        let mut a = ImportCollector::new(&settings, "com.acme.kotlin.dsl");
        a.add("com.acme.model.Widget");
        let mut b = ImportCollector::new(&settings, "com.acme.kotlin.dsl");
        b.add("com.acme.model.Widget");
        b.add("com.acme.model.Color");

        a.merge(&b);

        assert_eq!(a.len(), 2);
        assert!(a.contains("com.acme.model.Color"));
        assert_eq!(
            a.into_sorted(),
            vec!["com.acme.model.Color", "com.acme.model.Widget"]
        );
    }
}
