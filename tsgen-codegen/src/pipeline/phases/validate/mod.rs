//! Lints run before generation, and the phase that runs them.

mod lint;
pub mod lints;

use eyre::{Result, bail};
use tsgen_ir::IntermediateRepresentation;
pub use lint::Lint;
pub use lints::{
    DuplicateDiscriminantLint, FailingExampleLint, UnresolvedErrorLint, UnresolvedTypeLint,
};

use crate::{
    GeneratorOptions,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that validates the IR using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a validate phase with the default lints, checking examples
    /// with strict schema options.
    pub fn new() -> Self {
        Self::for_options(&GeneratorOptions::default())
    }

    /// Default lints, checking examples with the run's schema options.
    pub fn for_options(options: &GeneratorOptions) -> Self {
        Self {
            lints: vec![
                Box::new(UnresolvedTypeLint),
                Box::new(UnresolvedErrorLint),
                Box::new(DuplicateDiscriminantLint),
                Box::new(FailingExampleLint::new(options.schema)),
            ],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Run every lint and return what they report, without failing on
    /// errors.
    pub fn collect(&self, ir: &IntermediateRepresentation) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            let before = diagnostics.len();
            lint.check(ir, &mut diagnostics);
            tracing::trace!(
                lint = lint.name(),
                about = lint.description(),
                reported = diagnostics.len() - before,
                "ran lint"
            );
        }
        diagnostics
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let found = self.collect(&ctx.ir);
        ctx.diagnostics.extend(found);

        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysErrorLint;

    impl Lint for AlwaysErrorLint {
        fn name(&self) -> &'static str {
            "always-error"
        }

        fn description(&self) -> &'static str {
            "Always produces an error"
        }

        fn check(&self, _ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>) {
            diagnostics.push(Diagnostic::error("test", "forced error"));
        }
    }

    fn context() -> CompilationContext {
        CompilationContext::new(
            IntermediateRepresentation::new("acme"),
            GeneratorOptions::default(),
        )
    }

    #[test]
    fn test_default_lints() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            vec![
                "unresolved-type",
                "unresolved-error",
                "duplicate-discriminant",
                "failing-example"
            ]
        );
    }

    #[test]
    fn test_with_errors() {
        let mut ctx = context();

        let result = ValidatePhase::empty().with_lint(AlwaysErrorLint).run(&mut ctx);

        assert_eq!(
            result.unwrap_err().to_string(),
            "Validation failed with 1 error(s)"
        );
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_collect_keeps_errors() {
        let phase = ValidatePhase::new().with_lint(AlwaysErrorLint);
        let diagnostics = phase.collect(&IntermediateRepresentation::new("acme"));
        assert_eq!(diagnostics, vec![Diagnostic::error("test", "forced error")]);
    }

    #[test]
    fn test_clean_ir_passes() {
        let mut ctx = context();
        ValidatePhase::new().run(&mut ctx).unwrap();
        assert!(ctx.diagnostics.is_empty());
    }
}
