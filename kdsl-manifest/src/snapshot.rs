//! Universe snapshot loading.
//!
//! A snapshot is a JSON dump of the host library: every type with its
//! supertypes and declared methods, type strings in Java syntax.

use std::path::Path;

use kdsl_ir::{MethodInfo, TypeInfo, TypeKind, TypeRef, TypeUniverse, Universe};
use miette::SourceSpan;
use serde::Deserialize;

use crate::{
    Error, Result,
    error::{SourceContext, find_quoted_span},
    java_type::{Scope, parse_type},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSnapshot {
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Class,
    Interface,
    Enum,
}

impl From<RawKind> for TypeKind {
    fn from(kind: RawKind) -> Self {
        match kind {
            RawKind::Class => TypeKind::Class,
            RawKind::Interface => TypeKind::Interface,
            RawKind::Enum => TypeKind::Enum,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawType {
    name: String,
    #[serde(default = "default_kind")]
    kind: RawKind,
    #[serde(default = "default_true")]
    public: bool,
    #[serde(default, rename = "abstract")]
    is_abstract: bool,
    #[serde(default)]
    synthetic: bool,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    type_params: Vec<String>,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    methods: Vec<RawMethod>,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    name: String,
    #[serde(default)]
    params: Vec<String>,
    #[serde(default = "default_returns")]
    returns: String,
    #[serde(default = "default_true")]
    public: bool,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    synthetic: bool,
    #[serde(default)]
    type_params: Vec<String>,
}

fn default_kind() -> RawKind {
    RawKind::Class
}

fn default_true() -> bool {
    true
}

fn default_returns() -> String {
    "void".to_string()
}

/// Load a universe snapshot from a file.
pub fn load_universe(path: impl AsRef<Path>) -> Result<Universe> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_universe(&content, &path.display().to_string())
}

/// Parse a universe snapshot with the given filename for error reporting.
pub fn parse_universe(content: &str, filename: &str) -> Result<Universe> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawSnapshot =
        serde_json::from_str(content).map_err(|e| ctx.json_error("universe snapshot", e))?;

    let mut universe = Universe::new();
    for raw_type in raw.types {
        if universe.type_info(&raw_type.name).is_some() {
            return Err(ctx.validation_error(
                format!("type '{}' is declared twice", raw_type.name),
                find_quoted_span(content, &raw_type.name),
            ));
        }
        universe.insert(lower_type(raw_type, &ctx)?);
    }
    Ok(universe)
}

fn lower_type(raw: RawType, ctx: &SourceContext) -> Result<TypeInfo> {
    if raw.name.is_empty() || raw.name.contains(['<', '>', ' ']) {
        return Err(ctx.validation_error(
            format!("'{}' is not a binary type name", raw.name),
            find_quoted_span(ctx.src(), &raw.name),
        ));
    }

    let scope = Scope::new(&raw.name, &raw.type_params);
    let supertypes = raw
        .supertypes
        .iter()
        .map(|ty| lower_type_string(ty, scope, ctx))
        .collect::<Result<Vec<_>>>()?;

    let methods = raw
        .methods
        .into_iter()
        .map(|method| {
            let scope = scope.with_method(&method.name, &method.type_params);
            let params = method
                .params
                .iter()
                .map(|ty| lower_type_string(ty, scope, ctx))
                .collect::<Result<Vec<_>>>()?;
            let returns = lower_type_string(&method.returns, scope, ctx)?;
            Ok(MethodInfo {
                returns,
                name: method.name,
                params,
                is_public: method.public,
                is_static: method.is_static,
                is_synthetic: method.synthetic,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TypeInfo {
        kind: raw.kind.into(),
        is_public: raw.public,
        is_abstract: raw.is_abstract,
        is_synthetic: raw.synthetic,
        annotations: raw.annotations,
        supertypes,
        methods,
        type_params: raw.type_params,
        name: raw.name,
    })
}

fn lower_type_string(text: &str, scope: Scope<'_>, ctx: &SourceContext) -> Result<TypeRef> {
    parse_type(text, scope).map_err(|err| {
        let span = find_quoted_span(ctx.src(), text)
            .map(|span| SourceSpan::from((span.offset() + err.offset.min(text.len()), 1)));
        ctx.type_syntax_error(text, err.reason, span)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
  "types": [
    {
      "name": "com.acme.core.SdkBuilder",
      "kind": "interface",
      "type_params": ["B", "T"],
      "methods": [{ "name": "build", "returns": "T" }]
    },
    {
      "name": "com.acme.model.Widget",
      "methods": [
        { "name": "builder", "static": true, "returns": "com.acme.model.Widget$Builder" }
      ]
    },
    {
      "name": "com.acme.model.Widget$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.model.Widget$Builder, com.acme.model.Widget>"],
      "methods": [
        { "name": "size", "params": ["int"], "returns": "com.acme.model.Widget$Builder" },
        { "name": "tags", "params": ["java.util.Collection<java.lang.String>"], "returns": "com.acme.model.Widget$Builder" }
      ]
    }
  ]
}"#;

    #[test]
    fn test_parse_universe() {
        let universe = parse_universe(SNAPSHOT, "universe.json").unwrap();
        assert_eq!(universe.len(), 3);

        let base = universe.type_info("com.acme.core.SdkBuilder").unwrap();
        assert_eq!(base.kind, TypeKind::Interface);
        assert_eq!(
            base.methods[0].returns,
            TypeRef::variable("T", "com.acme.core.SdkBuilder")
        );

        let widget = universe.type_info("com.acme.model.Widget").unwrap();
        assert_eq!(widget.static_factories().count(), 1);

        let builder = universe.type_info("com.acme.model.Widget$Builder").unwrap();
        assert_eq!(builder.methods[1].params[0].raw_class(), "java.util.Collection");
        assert_eq!(builder.methods[0].params[0], TypeRef::primitive("int"));
    }

    #[test]
    fn test_method_type_params_are_variables() {
        let src = r#"{"types": [{
            "name": "com.acme.model.Widget$Builder",
            "kind": "interface",
            "methods": [
                { "name": "attr", "type_params": ["T"], "params": ["T"], "returns": "com.acme.model.Widget$Builder" },
                { "name": "other", "params": ["T"], "returns": "com.acme.model.Widget$Builder" }
            ]
        }]}"#;
        let universe = parse_universe(src, "universe.json").unwrap();
        let builder = universe.type_info("com.acme.model.Widget$Builder").unwrap();

        assert_eq!(
            builder.methods[0].params[0],
            TypeRef::variable("T", "com.acme.model.Widget$Builder#attr")
        );
        assert_eq!(builder.methods[1].params[0], TypeRef::class("T"));
    }

    #[test]
    fn test_type_syntax_error_points_into_snapshot() {
        let src = r#"{"types": [{"name": "a.B", "supertypes": ["a.C<a.D"]}]}"#;
        let err = parse_universe(src, "universe.json").unwrap_err();
        match *err {
            Error::TypeSyntax { ty, span, .. } => {
                assert_eq!(ty, "a.C<a.D");
                let span = span.unwrap();
                assert_eq!(&src[span.offset()..span.offset() + 1], "\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let src = r#"{"types": [{"name": "a.B"}, {"name": "a.B"}]}"#;
        let err = parse_universe(src, "universe.json").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let err = parse_universe("{\"types\": [", "universe.json").unwrap_err();
        assert!(matches!(*err, Error::Json { .. }));
    }
}
