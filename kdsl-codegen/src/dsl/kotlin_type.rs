//! Rendering host types as Kotlin type names.

use std::collections::BTreeMap;

use kdsl_core::capitalize;
use kdsl_ir::{TypeRef, nested_name_of, simple_name_of};

/// Host types with a Kotlin name of their own.
const BUILTIN: &[(&str, &str)] = &[
    ("java.lang.Object", "Any"),
    ("java.lang.Integer", "Int"),
    ("java.lang.Character", "Char"),
    ("java.lang.Boolean", "Boolean"),
    ("java.lang.Byte", "Byte"),
    ("java.lang.Short", "Short"),
    ("java.lang.Long", "Long"),
    ("java.lang.Float", "Float"),
    ("java.lang.Double", "Double"),
    ("java.lang.String", "String"),
    ("java.lang.Void", "Unit"),
];

/// Renders [`TypeRef`]s as Kotlin source, honoring a type override table.
#[derive(Debug, Clone, Copy)]
pub struct KotlinTypes<'m> {
    mapping: &'m BTreeMap<String, String>,
}

impl<'m> KotlinTypes<'m> {
    pub fn new(mapping: &'m BTreeMap<String, String>) -> Self {
        Self { mapping }
    }

    /// The Kotlin spelling of a type.
    ///
    /// Classes render by their package-relative name, parameterized types
    /// recursively, wildcards as their bound and type variables as a star
    /// projection of their declaring type. Method type variables erase to `Any`.
    pub fn render(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive { name } => primitive(name),
            TypeRef::Class { name } => self.class_name(name),
            TypeRef::Parameterized { raw, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.render(arg))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>", self.class_name(raw), args)
            }
            TypeRef::Wildcard { .. } => match ty.unwrap_wildcard() {
                Some(bound) => self.render(bound),
                None => "Any".to_string(),
            },
            TypeRef::Variable { declared_by, .. } if declared_by.contains('#') => {
                "Any".to_string()
            }
            TypeRef::Variable { declared_by, .. } => {
                format!("{}<*>", simple_name_of(declared_by))
            }
            TypeRef::Array { component } => match component.as_ref() {
                TypeRef::Primitive { name } => format!("{}Array", primitive(name)),
                other => format!("Array<{}>", self.render(other)),
            },
        }
    }

    /// [`Self::render`] followed by the nullable marker.
    pub fn render_nullable(&self, ty: &TypeRef) -> String {
        format!("{}{}", self.render(ty), nullable_marker(ty))
    }

    fn class_name(&self, name: &str) -> String {
        if let Some(mapped) = self.mapping.get(name) {
            return mapped.clone();
        }
        BUILTIN
            .iter()
            .find(|(java, _)| *java == name)
            .map(|(_, kotlin)| kotlin.to_string())
            .unwrap_or_else(|| nested_name_of(name))
    }
}

fn primitive(name: &str) -> String {
    match name {
        "void" => "Unit".to_string(),
        other => capitalize(other),
    }
}

/// `?` for every type that can hold null, empty for primitives.
pub fn nullable_marker(ty: &TypeRef) -> &'static str {
    if ty.is_primitive() { "" } else { "?" }
}
