//! Structural roles of builder methods.
//!
//! Each one-argument method is matched against an ordered list of
//! parameter shapes; the first match decides its [`Role`].

use kdsl_ir::{TypeRef, TypeUniverse, jdk};

use crate::source::{MethodGroupModel, MethodModel};

/// What a one-argument builder method sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// A plain object that is neither boxed, an array, a collection nor a callback.
    TypedProperty,
    /// A collection.
    CollectionProperty,
    /// An array.
    ArrayProperty,
    /// A primitive or a type of the language package.
    PrimitiveProperty,
    /// A single-argument callback.
    CallbackProperty,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::TypedProperty => "typed",
            Role::CollectionProperty => "collection",
            Role::ArrayProperty => "array",
            Role::PrimitiveProperty => "primitive",
            Role::CallbackProperty => "callback",
        }
    }
}

struct Matcher {
    role: Role,
    matches: fn(&dyn TypeUniverse, &TypeRef) -> bool,
}

const MATCHERS: &[Matcher] = &[
    Matcher {
        role: Role::TypedProperty,
        matches: is_plain_object,
    },
    Matcher {
        role: Role::CollectionProperty,
        matches: is_collection,
    },
    Matcher {
        role: Role::ArrayProperty,
        matches: |_, param| param.is_array(),
    },
    Matcher {
        role: Role::PrimitiveProperty,
        matches: |_, param| counts_as_primitive(param),
    },
    Matcher {
        role: Role::CallbackProperty,
        matches: is_callback,
    },
];

fn is_plain_object(universe: &dyn TypeUniverse, param: &TypeRef) -> bool {
    !counts_as_primitive(param)
        && !param.is_array()
        && !is_collection(universe, param)
        && !is_callback(universe, param)
}

fn is_collection(universe: &dyn TypeUniverse, param: &TypeRef) -> bool {
    universe.is_assignable(jdk::COLLECTION, &param.raw_class())
}

fn is_callback(universe: &dyn TypeUniverse, param: &TypeRef) -> bool {
    universe.is_assignable(jdk::CONSUMER, &param.raw_class())
}

/// Primitives and anything erasing into the language package (boxed types,
/// strings, unbound type variables).
pub fn counts_as_primitive(param: &TypeRef) -> bool {
    param.is_primitive() || jdk::is_lang_type(&param.raw_class())
}

/// DSL surface chosen for one method group.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classification<'m> {
    /// The property setter, if any overload qualifies.
    pub primary: Option<(Role, &'m MethodModel)>,
    /// A primitive-parameter overload exposed next to the primary.
    pub secondary: Option<&'m MethodModel>,
    /// A zero-argument overload.
    pub function: Option<&'m MethodModel>,
}

impl Classification<'_> {
    /// Returns true if the group gets no DSL member at all.
    pub fn is_ambiguous(&self) -> bool {
        self.primary.is_none() && self.function.is_none()
    }
}

/// Assigns roles to builder methods.
#[derive(Clone, Copy)]
pub struct Classifier<'u> {
    universe: &'u dyn TypeUniverse,
}

impl<'u> Classifier<'u> {
    pub fn new(universe: &'u dyn TypeUniverse) -> Self {
        Self { universe }
    }

    /// Role of a one-argument method, `None` for other arities or unmatched shapes.
    pub fn role_of(&self, method: &MethodModel) -> Option<Role> {
        let param = method.single_param()?;
        MATCHERS
            .iter()
            .find(|matcher| (matcher.matches)(self.universe, param))
            .map(|matcher| matcher.role)
    }

    /// Pick the primary, secondary and function members of a group.
    ///
    /// Roles are tried in priority order and the first overload with the
    /// best role wins.
    pub fn classify<'m>(&self, group: &'m MethodGroupModel) -> Classification<'m> {
        let roles: Vec<(Option<Role>, &MethodModel)> = group
            .methods
            .iter()
            .map(|method| (self.role_of(method), method.as_ref()))
            .collect();

        let primary = MATCHERS.iter().find_map(|matcher| {
            roles
                .iter()
                .find(|(role, _)| *role == Some(matcher.role))
                .map(|(_, method)| (matcher.role, *method))
        });

        let secondary = if group.methods.len() > 1 {
            roles
                .iter()
                .find(|(role, method)| {
                    *role == Some(Role::PrimitiveProperty)
                        && primary.is_none_or(|(_, primary)| !std::ptr::eq(*method, primary))
                })
                .map(|(_, method)| *method)
        } else {
            None
        };

        let function = group
            .methods
            .iter()
            .find(|method| method.is_nullary())
            .map(|method| method.as_ref());

        Classification {
            primary,
            secondary,
            function,
        }
    }
}

#[cfg(test)]
mod tests {
    use kdsl_manifest::DocIndex;

    use super::*;
    use crate::{
        source::{Scanner, SourceModel},
        testing::{fixture_universe, settings, universe_from},
    };

    fn scan() -> (kdsl_ir::Universe, SourceModel) {
        let universe = fixture_universe();
        let settings = settings();
        let docs = DocIndex::empty();
        let model = Scanner::new(&universe, &settings, &docs).scan(&mut Vec::new());
        (universe, model)
    }

    fn classify_widget(name: &str) -> (Option<(Role, String)>, Option<String>, Option<String>) {
        let (universe, model) = scan();
        let widget = model.builder_for("com.acme.model.Widget").unwrap();
        let result = Classifier::new(&universe).classify(&widget.groups[name]);
        (
            result.primary.map(|(role, m)| (role, m.key.clone())),
            result.secondary.map(|m| m.key.clone()),
            result.function.map(|m| m.key.clone()),
        )
    }

    #[test]
    fn test_role_priority() {
        let key = |s: &str| format!("com.acme.model.Widget$Builder.{}", s);

        let (primary, secondary, _) = classify_widget("size");
        assert_eq!(primary, Some((Role::PrimitiveProperty, key("size(int)"))));
        assert_eq!(secondary, None);

        let (primary, _, _) = classify_widget("parts");
        assert_eq!(
            primary,
            Some((
                Role::CollectionProperty,
                key("parts(java.util.Collection<com.acme.model.Part>)")
            ))
        );

        let (primary, _, _) = classify_widget("tags");
        assert_eq!(
            primary.map(|(role, _)| role),
            Some(Role::ArrayProperty)
        );

        let (primary, _, _) = classify_widget("onDone");
        assert_eq!(
            primary.map(|(role, _)| role),
            Some(Role::CallbackProperty)
        );

        let (primary, _, _) = classify_widget("attributes");
        assert_eq!(primary.map(|(role, _)| role), Some(Role::TypedProperty));
    }

    #[test]
    fn test_typed_property_beats_callback_overload() {
        let (primary, secondary, _) = classify_widget("gadget");
        assert_eq!(
            primary,
            Some((
                Role::TypedProperty,
                "com.acme.model.Widget$Builder.gadget(com.acme.model.gadget.Gadget)".to_string()
            ))
        );
        assert_eq!(secondary, None);
    }

    #[test]
    fn test_secondary_primitive_overload() {
        let (primary, secondary, _) = classify_widget("color");
        assert_eq!(primary.map(|(role, _)| role), Some(Role::TypedProperty));
        assert_eq!(
            secondary.as_deref(),
            Some("com.acme.model.Widget$Builder.color(java.lang.String)")
        );
    }

    #[test]
    fn test_boxed_overload_is_secondary_to_primitive() {
        let universe = universe_from(
            r#"{
  "types": [
    {
      "name": "com.acme.core.SdkBuilder",
      "kind": "interface",
      "type_params": ["B", "T"],
      "methods": [{ "name": "build", "returns": "T" }]
    },
    {
      "name": "com.acme.model.Meter",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.model.Meter$Builder" }]
    },
    {
      "name": "com.acme.model.Meter$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Meter$Builder, com.acme.model.Meter>"],
      "methods": [
        { "name": "count", "params": ["int"], "returns": "com.acme.model.Meter$Builder" },
        { "name": "count", "params": ["java.lang.Integer"], "returns": "com.acme.model.Meter$Builder" }
      ]
    }
  ]
}"#,
        );
        let settings = settings();
        let docs = DocIndex::empty();
        let model = Scanner::new(&universe, &settings, &docs).scan(&mut Vec::new());
        let meter = model.builder_for("com.acme.model.Meter").unwrap();

        let result = Classifier::new(&universe).classify(&meter.groups["count"]);
        let key = |s: &str| format!("com.acme.model.Meter$Builder.{}", s);
        assert_eq!(
            result.primary.map(|(role, m)| (role, m.key.clone())),
            Some((Role::PrimitiveProperty, key("count(int)")))
        );
        assert_eq!(
            result.secondary.map(|m| m.key.clone()),
            Some(key("count(java.lang.Integer)"))
        );
    }

    #[test]
    fn test_zero_argument_function() {
        let (primary, _, function) = classify_widget("reset");
        assert_eq!(primary, None);
        assert_eq!(
            function.as_deref(),
            Some("com.acme.model.Widget$Builder.reset()")
        );
    }

    #[test]
    fn test_ambiguous_group() {
        let (universe, model) = scan();
        let widget = model.builder_for("com.acme.model.Widget").unwrap();
        let result = Classifier::new(&universe).classify(&widget.groups["metadata"]);
        assert!(result.is_ambiguous());
        assert!(result.secondary.is_none());
    }

    #[test]
    fn test_counts_as_primitive() {
        assert!(counts_as_primitive(&TypeRef::primitive("int")));
        assert!(counts_as_primitive(&TypeRef::class("java.lang.Boolean")));
        assert!(counts_as_primitive(&TypeRef::variable("T", "com.acme.X")));
        assert!(!counts_as_primitive(&TypeRef::class("java.time.Instant")));
    }
}
