//! Analyze phase - builds the resolvers shared by every generated file.

use eyre::Result;

use crate::{
    pipeline::{CompilationContext, Phase},
    resolvers::Resolvers,
};

/// Phase that indexes the IR for lookups during generation.
///
/// Runs after validation so that every reference is known to resolve.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        if ctx.has_errors() {
            eyre::bail!("cannot analyze an IR with {} error(s)", ctx.error_count());
        }
        let resolvers = Resolvers::new(ctx.ir.clone());
        tracing::debug!(
            types = resolvers.types.declarations().len(),
            errors = resolvers.errors.declarations().len(),
            services = resolvers.services.declarations().len(),
            "indexed IR"
        );
        ctx.resolvers = Some(resolvers);
        Ok(())
    }
}
