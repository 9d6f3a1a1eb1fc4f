//! Lint for targets sharing a short name across packages.

use super::super::{Lint, LintInput};
use crate::pipeline::Diagnostic;

/// Lint that warns when targets in different packages share a short name.
///
/// The units land in different packages and do not collide, but a unit
/// referring to both imports two types under one simple name.
pub struct SharedShortNameLint;

impl Lint for SharedShortNameLint {
    fn name(&self) -> &'static str {
        "shared-short-name"
    }

    fn check(&self, input: &LintInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for (short, targets) in &input.plan.shared_short_names {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!(
                        "short name '{}' is used by {}; units referring to more than one of them \
                         get conflicting imports",
                        short,
                        targets.join(", ")
                    ),
                )
                .at(short.clone()),
            );
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
        testing::{settings, universe_from},
    };

    #[test]
    fn test_shared_short_name_warns() {
        let universe = universe_from(
            r#"{
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
      "name": "com.acme.other.Widget",
      "methods": [{ "name": "builder", "static": true, "returns": "com.acme.other.Widget$Builder" }]
    },
    {
      "name": "com.acme.other.Widget$Builder",
      "kind": "interface",
      "supertypes": ["com.acme.core.SdkBuilder<com.acme.other.Widget$Builder, com.acme.other.Widget>"]
    }
  ]
}"#,
        );
        let settings = settings();
        let docs = DocIndex::empty();
        let source = Scanner::new(&universe, &settings, &docs).scan(&mut Vec::new());
        let plan = UnitPlan::new(&source, &universe, &settings);

        let mut diagnostics = Vec::new();
        let input = LintInput {
            source: &source,
            plan: &plan,
            universe: &universe,
            settings: &settings,
        };
        SharedShortNameLint.check(&input, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_warning());
        assert!(diagnostics[0].message.contains("com.acme.model.Widget, com.acme.other.Widget"));
    }
}
