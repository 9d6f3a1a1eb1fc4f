//! Lint for method groups without any DSL surface.

use super::super::{Lint, LintInput};
use crate::{classify::Classifier, pipeline::Diagnostic};

/// Lint that reports builder method groups no overload of which becomes a
/// property or a function.
pub struct AmbiguousGroupLint;

impl Lint for AmbiguousGroupLint {
    fn name(&self) -> &'static str {
        "ambiguous-group"
    }

    fn check(&self, input: &LintInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let classifier = Classifier::new(input.universe);
        for model in input.source.builders.values() {
            for group in model.groups.values() {
                if !classifier.classify(group).is_ambiguous() {
                    continue;
                }
                let signatures: Vec<String> = group
                    .methods
                    .iter()
                    .map(|method| method.key.clone())
                    .collect();
                diagnostics.push(
                    Diagnostic::info(
                        "validate",
                        format!(
                            "no DSL member for '{}': no overload matches a property shape ({})",
                            group.name,
                            signatures.join("; ")
                        ),
                    )
                    .at(group.qualified_name.clone()),
                );
            }
        }
    }
}
