//! Lint for builders without any DSL member.

use super::super::{Lint, LintInput};
use crate::{classify::Classifier, pipeline::Diagnostic};

/// Lint that reports type units rendering nothing but the builder itself.
pub struct EmptyUnitLint;

impl Lint for EmptyUnitLint {
    fn name(&self) -> &'static str {
        "empty-unit"
    }

    fn check(&self, input: &LintInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let classifier = Classifier::new(input.universe);
        for (target, model) in &input.source.builders {
            let empty = model
                .groups
                .values()
                .all(|group| classifier.classify(group).is_ambiguous());
            if empty {
                diagnostics.push(
                    Diagnostic::info(
                        "validate",
                        format!("'{}' has no builder members, its unit is empty", target),
                    )
                    .at(target.clone()),
                );
            }
        }
    }
}
