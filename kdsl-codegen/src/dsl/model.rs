//! The generated DSL, one unit per output file.

use kdsl_core::qualify;
use serde::Serialize;

use crate::classify::Role;

/// Package and simple name of a generated unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnitName {
    pub package: String,
    pub name: String,
}

impl UnitName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn qualified(&self) -> String {
        qualify(&self.package, &self.name)
    }

    /// Top-level builder function of the unit (`buildWidget` for `WidgetDSL`).
    pub fn entry_point(&self) -> String {
        let stem = self.name.strip_suffix("DSL").unwrap_or(&self.name);
        format!("build{}", stem)
    }

    /// Qualified name of [`Self::entry_point`].
    pub fn qualified_entry_point(&self) -> String {
        UnitName::new(self.package.clone(), self.entry_point()).qualified()
    }
}

impl std::fmt::Display for UnitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Everything to render, every list sorted by unit name.
#[derive(Debug, Clone, Serialize)]
pub struct DslModel {
    pub marker: MarkerUnit,
    pub collections: Vec<CollectionUnit>,
    pub maps: Vec<MapUnit>,
    pub types: Vec<TypeUnit>,
}

impl DslModel {
    /// Number of units, the marker included.
    pub fn unit_count(&self) -> usize {
        1 + self.collections.len() + self.maps.len() + self.types.len()
    }

    pub fn type_unit(&self, name: &str) -> Option<&TypeUnit> {
        self.types.iter().find(|unit| unit.name.name == name)
    }

    pub fn collection_unit(&self, name: &str) -> Option<&CollectionUnit> {
        self.collections.iter().find(|unit| unit.name.name == name)
    }

    pub fn map_unit(&self, name: &str) -> Option<&MapUnit> {
        self.maps.iter().find(|unit| unit.name.name == name)
    }
}

/// The `@DslMarker` annotation scoping every other unit.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerUnit {
    pub name: UnitName,
}

/// Builds a list of one buildable target.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionUnit {
    pub name: UnitName,
    pub imports: Vec<String>,
    /// Documentation of the element type.
    pub comment: String,
    /// Simple name of the marker annotation.
    pub marker: String,
    pub entry_point: String,
    /// Rendered element type.
    pub target_type: String,
    /// Type unit building one element.
    pub target_dsl: String,
    pub target_entry_point: String,
}

/// Builds a map valued by one buildable target.
#[derive(Debug, Clone, Serialize)]
pub struct MapUnit {
    pub name: UnitName,
    pub imports: Vec<String>,
    pub comment: String,
    pub marker: String,
    pub entry_point: String,
    /// Rendered key type.
    pub key_type: String,
    pub target_type: String,
    pub target_dsl: String,
    pub target_entry_point: String,
}

/// Wraps the builder of one target type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeUnit {
    pub name: UnitName,
    pub imports: Vec<String>,
    pub comment: String,
    pub marker: String,
    pub entry_point: String,
    /// Rendered builder type (`Widget.Builder`).
    pub builder_type: String,
    /// Rendered target type.
    pub target_type: String,
    /// Static factory on the target returning a fresh builder.
    pub factory: String,
    pub properties: Vec<Property>,
    /// Primitive overloads offered next to a richer property.
    pub secondaries: Vec<Property>,
    pub functions: Vec<Function>,
    pub sub_links: Vec<SubLink>,
    /// Builder blocks attached to non-builder types that accept this target.
    pub extensions: Vec<ExtensionLink>,
}

impl TypeUnit {
    /// Returns true if the unit has no member besides the builder itself.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.secondaries.is_empty()
            && self.functions.is_empty()
            && self.sub_links.is_empty()
    }
}

/// A write-only property backed by a one-argument builder method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub comment: String,
    /// Rendered parameter type with nullable marker.
    pub kotlin_type: String,
    #[serde(serialize_with = "serialize_role")]
    pub role: Role,
}

fn serialize_role<S: serde::Serializer>(role: &Role, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(role.as_str())
}

/// A zero-argument builder method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub comment: String,
}

/// How a linked unit's result reaches the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// The method takes the built target.
    Direct,
    /// The method takes the target's builder.
    Builder,
    /// The method takes a collection of targets.
    Collection,
    /// The method takes a map valued by targets.
    Map,
}

/// A nested block building a method argument with another unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubLink {
    pub name: String,
    pub comment: String,
    pub kind: LinkKind,
    /// Rendered target type.
    pub target_type: String,
    /// Simple name of the linked unit.
    pub target_dsl: String,
    pub target_entry_point: String,
}

/// A builder block added to a non-builder type as an extension function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionLink {
    /// Rendered type the extension is declared on.
    pub receiver_type: String,
    pub name: String,
    pub comment: String,
    pub kind: LinkKind,
    pub target_dsl: String,
    pub target_entry_point: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_name() {
        let name = UnitName::new("com.acme.kotlin.dsl.model", "WidgetDSL");
        assert_eq!(name.qualified(), "com.acme.kotlin.dsl.model.WidgetDSL");
        assert_eq!(name.entry_point(), "buildWidget");
        assert_eq!(
            name.qualified_entry_point(),
            "com.acme.kotlin.dsl.model.buildWidget"
        );
        assert_eq!(
            UnitName::new("p", "PartCollectionDSL").entry_point(),
            "buildPartCollection"
        );
        assert_eq!(UnitName::new("", "Odd").qualified(), "Odd");
        assert_eq!(UnitName::new("", "Odd").entry_point(), "buildOdd");
    }

    #[test]
    fn test_unit_names_order_by_package_first() {
        let mut names = vec![
            UnitName::new("b", "ADSL"),
            UnitName::new("a", "ZDSL"),
            UnitName::new("a", "BDSL"),
        ];
        names.sort();
        let qualified: Vec<_> = names.iter().map(UnitName::qualified).collect();
        assert_eq!(qualified, vec!["a.BDSL", "a.ZDSL", "b.ADSL"]);
    }
}
