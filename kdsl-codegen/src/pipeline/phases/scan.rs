//! Scan phase - discovers builders in the source namespace.

use eyre::Result;

use crate::{
    pipeline::{CompilationContext, Diagnostic, Phase},
    source::Scanner,
};

/// Phase that scans the type universe into a [`crate::source::SourceModel`].
pub struct ScanPhase;

impl Phase for ScanPhase {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        for warning in ctx.docs.warnings() {
            ctx.diagnostics.push(Diagnostic::warning(self.name(), warning.clone()));
        }

        let source =
            Scanner::new(ctx.universe, &ctx.settings, &ctx.docs).scan(&mut ctx.diagnostics);
        if source.builders.is_empty() {
            ctx.add_warning(
                self.name(),
                format!(
                    "no builders implementing '{}' found under '{}'",
                    ctx.settings.supertype, ctx.settings.source_namespace
                ),
            );
        }

        ctx.source = Some(source);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kdsl_manifest::DocIndex;

    use super::*;
    use crate::{
        Settings,
        testing::{fixture_universe, settings},
    };

    #[test]
    fn test_scan_fixture() {
        let universe = fixture_universe();
        let mut ctx = CompilationContext::new(&universe, settings(), DocIndex::empty());

        ScanPhase.run(&mut ctx).unwrap();

        let source = ctx.source.as_ref().unwrap();
        let targets: Vec<&str> = source.builders.keys().map(String::as_str).collect();
        assert_eq!(
            targets,
            vec![
                "com.acme.model.Blank",
                "com.acme.model.Part",
                "com.acme.model.Widget",
                "com.acme.model.gadget.Gadget",
            ]
        );
        assert!(!ctx.has_warnings());
    }

    #[test]
    fn test_doc_warnings_are_forwarded() {
        let universe = fixture_universe();
        let docs = DocIndex::parse(r#"{"types": 1}"#, "docs.json").unwrap();
        let mut ctx = CompilationContext::new(&universe, settings(), docs);

        ScanPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.warnings().next().unwrap().phase, "scan");
    }

    #[test]
    fn test_empty_namespace_warns() {
        let universe = fixture_universe();
        let settings = Settings::new("org.nowhere", "org.nowhere.dsl")
            .with_supertype(crate::testing::SUPERTYPE);
        let mut ctx = CompilationContext::new(&universe, settings, DocIndex::empty());

        ScanPhase.run(&mut ctx).unwrap();

        assert!(ctx.source.as_ref().unwrap().builders.is_empty());
        assert!(ctx.warnings().any(|d| d.message.contains("org.nowhere")));
    }
}
