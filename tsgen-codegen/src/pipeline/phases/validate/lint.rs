use std::sync::Arc;

use tsgen_ir::IntermediateRepresentation;

use crate::pipeline::Diagnostic;

/// A single consistency check over the whole IR.
///
/// Lints never fail; they report what they find as diagnostics and the
/// validate phase decides whether the run can continue.
pub trait Lint: Send + Sync {
    /// Kebab-case identifier, e.g. `unresolved-type`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>);
}

impl<L: Lint + ?Sized> Lint for Arc<L> {
    fn name(&self) -> &'static str {
        L::name(self)
    }

    fn description(&self) -> &'static str {
        L::description(self)
    }

    fn check(&self, ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>) {
        L::check(self, ir, diagnostics)
    }
}
