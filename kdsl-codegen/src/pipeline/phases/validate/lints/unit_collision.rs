//! Lint for units generated at the same path.

use kdsl_manifest::CollisionPolicy;

use super::super::{Lint, LintInput};
use crate::pipeline::Diagnostic;

/// Lint that errors on every collision the plan could not resolve.
pub struct UnitCollisionLint;

impl Lint for UnitCollisionLint {
    fn name(&self) -> &'static str {
        "unit-collision"
    }

    fn check(&self, input: &LintInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for collision in &input.plan.collisions {
            let sources: Vec<String> = collision.sources.iter().map(ToString::to_string).collect();
            let mut message = format!(
                "unit '{}' would be generated for {}",
                collision.unit,
                sources.join(" and ")
            );
            if input.settings.collisions == CollisionPolicy::Fail {
                message.push_str("; set `collisions = \"qualify\"` in [scan] to rename them");
            }
            diagnostics.push(Diagnostic::error("validate", message).at(collision.unit.qualified()));
        }
    }
}

#[cfg(test)]
mod tests {
    use kdsl_manifest::DocIndex;

    use super::*;
    use crate::{
        dsl::UnitPlan,
        source::Scanner,
        testing::{fixture_universe, settings, universe_from},
    };

    const CLASHING: &str = r#"{
  "types": [
    { "name": "com.acme.core.SdkBuilder", "kind": "interface", "type_params": ["B", "T"] },
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

    fn check(universe: &kdsl_ir::Universe, settings: crate::Settings) -> Vec<Diagnostic> {
        let docs = DocIndex::empty();
        let source = Scanner::new(universe, &settings, &docs).scan(&mut Vec::new());
        let plan = UnitPlan::new(&source, universe, &settings);
        let input = LintInput {
            source: &source,
            plan: &plan,
            universe,
            settings: &settings,
        };
        let mut diagnostics = Vec::new();
        UnitCollisionLint.check(&input, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_no_collisions() {
        assert!(check(&fixture_universe(), settings()).is_empty());
    }

    #[test]
    fn test_collision_is_error() {
        let diagnostics = check(&universe_from(CLASHING), settings());

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert!(diagnostic.severity.is_error());
        assert!(diagnostic.message.contains("type 'com.acme.model.Outer$Widget'"));
        assert!(diagnostic.message.contains("type 'com.acme.model.Widget'"));
        assert!(diagnostic.message.contains("qualify"));
        assert_eq!(
            diagnostic.location.as_deref(),
            Some("com.acme.kotlin.dsl.model.WidgetDSL")
        );
    }

    #[test]
    fn test_qualified_collisions_resolve() {
        let settings = settings().with_collisions(CollisionPolicy::Qualify);
        assert!(check(&universe_from(CLASHING), settings).is_empty());
    }
}
