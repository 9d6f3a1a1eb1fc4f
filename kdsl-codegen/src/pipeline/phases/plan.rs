//! Plan phase - names every unit.

use eyre::{Result, eyre};

use crate::{
    dsl::UnitPlan,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that derives unit names and applies the collision policy.
///
/// Collisions left over are only recorded here; the validate phase turns
/// them into errors.
pub struct PlanPhase;

impl Phase for PlanPhase {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let source = ctx
            .source
            .as_ref()
            .ok_or_else(|| eyre!("plan phase requires a scanned source model"))?;
        let plan = UnitPlan::new(source, ctx.universe, &ctx.settings);

        for renamed in &plan.renamed {
            ctx.diagnostics.push(
                Diagnostic::info(
                    self.name(),
                    format!(
                        "renamed unit for {} from '{}' to '{}'",
                        renamed.source, renamed.from.name, renamed.to.name
                    ),
                )
                .at(renamed.to.qualified()),
            );
        }

        ctx.plan = Some(plan);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kdsl_manifest::DocIndex;

    use super::*;
    use crate::{
        pipeline::phases::ScanPhase,
        testing::{fixture_universe, settings},
    };

    #[test]
    fn test_requires_source() {
        let universe = fixture_universe();
        let mut ctx = CompilationContext::new(&universe, settings(), DocIndex::empty());
        assert!(PlanPhase.run(&mut ctx).is_err());
    }

    #[test]
    fn test_plan_fixture() {
        let universe = fixture_universe();
        let mut ctx = CompilationContext::new(&universe, settings(), DocIndex::empty());
        ScanPhase.run(&mut ctx).unwrap();

        PlanPhase.run(&mut ctx).unwrap();

        let plan = ctx.plan.as_ref().unwrap();
        assert_eq!(plan.marker.name, "AcmeDSL");
        assert_eq!(
            plan.type_unit("com.acme.model.Widget").unwrap().qualified(),
            "com.acme.kotlin.dsl.model.WidgetDSL"
        );
        assert!(plan.collisions.is_empty());
        assert!(plan.renamed.is_empty());
    }
}
