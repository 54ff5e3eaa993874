use eyre::Result;

use super::CompilationContext;

/// One step of the [`Pipeline`](super::Pipeline).
///
/// A phase reads the shared IR and records what it learns on the context.
/// Problems that should not stop the run go into `ctx.diagnostics`; an
/// `Err` aborts the remaining phases.
pub trait Phase: Send + Sync {
    /// Short name, recorded on the phase's tracing span.
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;
}
