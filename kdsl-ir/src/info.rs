//! Type and method declarations of the host type universe.

use serde::Serialize;

use crate::TypeRef;

/// The kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

/// A type declared in the host type universe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeInfo {
    /// Binary qualified name, nested types separated by `$`.
    pub name: String,
    pub kind: TypeKind,
    pub is_public: bool,
    pub is_abstract: bool,
    pub is_synthetic: bool,
    /// Simple names of the annotations present on the type.
    pub annotations: Vec<String>,
    /// Names of the declared type parameters, in order.
    pub type_params: Vec<String>,
    /// Direct supertypes (superclass and interfaces).
    pub supertypes: Vec<TypeRef>,
    /// Methods declared directly on this type.
    pub methods: Vec<MethodInfo>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            is_public: true,
            is_abstract: false,
            is_synthetic: false,
            annotations: Vec::new(),
            type_params: Vec::new(),
            supertypes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// The package the type lives in (`com.acme` for `com.acme.Outer$Inner`).
    pub fn package(&self) -> &str {
        package_of(&self.name)
    }

    /// The simple name (`Inner` for `com.acme.Outer$Inner`).
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    /// The name relative to the package with nested types dotted (`Outer.Inner`).
    pub fn nested_name(&self) -> String {
        nested_name_of(&self.name)
    }

    /// Returns true if the type is nested in another type.
    pub fn is_nested(&self) -> bool {
        self.name.contains('$')
    }

    /// Zero-argument static methods declared on this type.
    pub fn static_factories(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods
            .iter()
            .filter(|m| m.is_static && m.is_public && m.params.is_empty())
    }
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub returns: TypeRef,
    pub is_public: bool,
    pub is_static: bool,
    pub is_synthetic: bool,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns,
            is_public: true,
            is_static: false,
            is_synthetic: false,
        }
    }

    /// The call signature: name and parameter type names.
    ///
    /// Overloads that only differ in their return type share a signature.
    pub fn call_signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, params)
    }
}

/// Package part of a binary type name.
pub fn package_of(name: &str) -> &str {
    let outer = name.split('$').next().unwrap_or(name);
    outer.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
}

/// Simple name of a binary type name.
pub fn simple_name_of(name: &str) -> &str {
    name.rsplit(['.', '$']).next().unwrap_or(name)
}

/// Package-relative name of a binary type name, nested types dotted.
pub fn nested_name_of(name: &str) -> String {
    let package = package_of(name);
    let relative = if package.is_empty() {
        name
    } else {
        &name[package.len() + 1..]
    };
    relative.replace('$', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_parts() {
        let info = TypeInfo::new("com.acme.model.Widget$Builder");
        assert_eq!(info.package(), "com.acme.model");
        assert_eq!(info.simple_name(), "Builder");
        assert_eq!(info.nested_name(), "Widget.Builder");
        assert!(info.is_nested());
    }

    #[test]
    fn test_name_parts_without_package() {
        assert_eq!(package_of("Widget"), "");
        assert_eq!(simple_name_of("Widget"), "Widget");
        assert_eq!(nested_name_of("Widget$Builder"), "Widget.Builder");
    }

    #[test]
    fn test_call_signature() {
        let mut method = MethodInfo::new("items", TypeRef::class("com.acme.Widget$Builder"));
        method.params.push(TypeRef::parameterized(
            "java.util.Collection",
            vec![TypeRef::class("com.acme.Item")],
        ));
        assert_eq!(
            method.call_signature(),
            "items(java.util.Collection<com.acme.Item>)"
        );
    }

    #[test]
    fn test_static_factories() {
        let mut info = TypeInfo::new("com.acme.Widget");
        let mut builder = MethodInfo::new("builder", TypeRef::class("com.acme.Widget$Builder"));
        builder.is_static = true;
        info.methods.push(builder);
        info.methods
            .push(MethodInfo::new("toBuilder", TypeRef::class("com.acme.Widget$Builder")));

        let names: Vec<_> = info.static_factories().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["builder"]);
    }
}
