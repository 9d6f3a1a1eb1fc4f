//! Language-agnostic type references.

use std::{collections::HashMap, fmt};

use serde::Serialize;

/// Erasure of every type that has no class of its own (variables, wildcards).
pub const OBJECT: &str = "java.lang.Object";

/// Names of the primitive types of the host language.
pub const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// A reference to a type as it appears in a method signature or supertype list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A primitive type such as `int` or `boolean`.
    Primitive { name: String },
    /// A non-generic use of a class, by binary name (`com.acme.Outer$Inner`).
    Class { name: String },
    /// A generic class applied to type arguments.
    Parameterized { raw: String, args: Vec<TypeRef> },
    /// A wildcard argument (`?`, `? extends X`, `? super X`).
    Wildcard {
        upper: Option<Box<TypeRef>>,
        lower: Option<Box<TypeRef>>,
    },
    /// A type variable declared by a generic type, or by a generic method
    /// (`declared_by` is then `Owner#method`).
    Variable { name: String, declared_by: String },
    /// An array of the component type.
    Array { component: Box<TypeRef> },
}

impl TypeRef {
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive { name: name.into() }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::Class { name: name.into() }
    }

    pub fn parameterized(raw: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Parameterized {
            raw: raw.into(),
            args,
        }
    }

    pub fn variable(name: impl Into<String>, declared_by: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            declared_by: declared_by.into(),
        }
    }

    pub fn array(component: TypeRef) -> Self {
        Self::Array {
            component: Box::new(component),
        }
    }

    pub fn unbounded_wildcard() -> Self {
        Self::Wildcard {
            upper: None,
            lower: None,
        }
    }

    pub fn extends(bound: TypeRef) -> Self {
        Self::Wildcard {
            upper: Some(Box::new(bound)),
            lower: None,
        }
    }

    pub fn super_of(bound: TypeRef) -> Self {
        Self::Wildcard {
            upper: None,
            lower: Some(Box::new(bound)),
        }
    }

    /// Returns true for primitive types.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive { .. })
    }

    /// Returns true for array types.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// Returns true if the type still mentions a type variable.
    pub fn has_variables(&self) -> bool {
        match self {
            Self::Variable { .. } => true,
            Self::Parameterized { args, .. } => args.iter().any(TypeRef::has_variables),
            Self::Wildcard { upper, lower } => upper
                .iter()
                .chain(lower.iter())
                .any(|bound| bound.has_variables()),
            Self::Array { component } => component.has_variables(),
            Self::Primitive { .. } | Self::Class { .. } => false,
        }
    }

    /// The erased class name of this type.
    ///
    /// Classes and parameterized types erase to their class, primitives to
    /// themselves, arrays to `component[]` and everything else to `Object`.
    pub fn raw_class(&self) -> String {
        match self {
            Self::Primitive { name } | Self::Class { name } => name.clone(),
            Self::Parameterized { raw, .. } => raw.clone(),
            Self::Array { component } => format!("{}[]", component.raw_class()),
            Self::Wildcard { .. } | Self::Variable { .. } => OBJECT.to_string(),
        }
    }

    /// Type arguments of a parameterized type, empty otherwise.
    pub fn args(&self) -> &[TypeRef] {
        match self {
            Self::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// Strip a wildcard down to its bound, preferring the lower bound.
    ///
    /// Returns `None` for an unbounded wildcard.
    pub fn unwrap_wildcard(&self) -> Option<&TypeRef> {
        match self {
            Self::Wildcard { upper, lower } => lower.as_deref().or(upper.as_deref()),
            other => Some(other),
        }
    }

    /// Replace type variables with their bindings.
    pub fn substitute(&self, bindings: &HashMap<String, TypeRef>) -> TypeRef {
        match self {
            Self::Variable { name, .. } => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::Parameterized { raw, args } => Self::Parameterized {
                raw: raw.clone(),
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            },
            Self::Wildcard { upper, lower } => Self::Wildcard {
                upper: upper.as_ref().map(|b| Box::new(b.substitute(bindings))),
                lower: lower.as_ref().map(|b| Box::new(b.substitute(bindings))),
            },
            Self::Array { component } => Self::Array {
                component: Box::new(component.substitute(bindings)),
            },
            Self::Primitive { .. } | Self::Class { .. } => self.clone(),
        }
    }

    /// Collect every class name reachable from this type.
    ///
    /// Raw types, type arguments, wildcard bounds and array components are
    /// followed; primitives and type variables contribute nothing.
    pub fn collect_classes(&self, out: &mut impl Extend<String>) {
        match self {
            Self::Class { name } => out.extend(Some(name.clone())),
            Self::Parameterized { raw, args } => {
                out.extend(Some(raw.clone()));
                for arg in args {
                    arg.collect_classes(out);
                }
            }
            Self::Wildcard { upper, lower } => {
                for bound in lower.iter().chain(upper.iter()) {
                    bound.collect_classes(out);
                }
            }
            Self::Array { component } => component.collect_classes(out),
            Self::Primitive { .. } | Self::Variable { .. } => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive { name } | Self::Class { name } => write!(f, "{}", name),
            Self::Parameterized { raw, args } => {
                write!(f, "{}<", raw)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            Self::Wildcard { upper, lower } => match (lower, upper) {
                (Some(bound), _) => write!(f, "? super {}", bound),
                (None, Some(bound)) => write!(f, "? extends {}", bound),
                (None, None) => write!(f, "?"),
            },
            Self::Variable { name, .. } => write!(f, "{}", name),
            Self::Array { component } => write!(f, "{}[]", component),
        }
    }
}

/// Returns true if the name is one of the host language's primitive types.
pub fn is_primitive_name(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}
