//! Transform phase - builds the DSL model.

use eyre::{Result, eyre};

use crate::{
    dsl::transform,
    pipeline::{CompilationContext, Phase},
};

/// Phase that turns the scanned source and the unit plan into a [`crate::dsl::DslModel`].
pub struct TransformPhase;

impl Phase for TransformPhase {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let (Some(source), Some(plan)) = (ctx.source.as_ref(), ctx.plan.as_ref()) else {
            return Err(eyre!("transform phase requires a source model and a unit plan"));
        };
        let dsl = transform(source, plan, ctx.universe, &ctx.settings);
        ctx.add_info(self.name(), format!("{} units in the DSL model", dsl.unit_count()));
        ctx.dsl = Some(dsl);
        Ok(())
    }
}
