use std::sync::Arc;

use eyre::Result;
use tsgen_ir::IntermediateRepresentation;

use super::{
    CompilationContext, Phase,
    phases::{AnalyzePhase, Lint, ValidatePhase},
};
use crate::GeneratorOptions;

/// Runs validation, then analysis, then any extra phases, stopping at the
/// first phase that fails.
///
/// ```ignore
/// let ctx = Pipeline::new()
///     .lint(DuplicateFilePathLint::new("Acme"))
///     .run(ir, options)?;
/// let resolvers = ctx.resolvers()?;
/// ```
#[derive(Default)]
pub struct Pipeline {
    lints: Vec<Arc<dyn Lint>>,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lint to the validate phase, after the built-in lints.
    pub fn lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Arc::new(lint));
        self
    }

    /// Add a phase to run once the resolvers are built.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// # Errors
    ///
    /// Fails when validation reports an error diagnostic, or when any
    /// phase fails.
    pub fn run(
        &self,
        ir: impl Into<Arc<IntermediateRepresentation>>,
        options: GeneratorOptions,
    ) -> Result<CompilationContext> {
        let validate = self
            .lints
            .iter()
            .fold(ValidatePhase::for_options(&options), |phase, lint| {
                phase.with_lint(Arc::clone(lint))
            });
        let mut ctx = CompilationContext::new(ir, options);

        let builtin: [&dyn Phase; 2] = [&validate, &AnalyzePhase];
        let extra = self.phases.iter().map(|phase| phase.as_ref());
        for phase in builtin.into_iter().chain(extra) {
            let _span = tracing::debug_span!("phase", name = phase.name()).entered();
            phase.run(&mut ctx)?;
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use tsgen_ir::{
        DeclaredTypeName, NameAndWireValue, ObjectProperty, TypeDeclaration, TypeReference,
        TypeShape,
    };

    use super::*;

    #[test]
    fn test_pipeline_builds_resolvers() {
        let ctx = Pipeline::new()
            .run(IntermediateRepresentation::new("acme"), GeneratorOptions::default())
            .unwrap();

        assert!(ctx.resolvers.is_some());
        assert!(ctx.diagnostics.is_empty());
    }

    struct CountTypes(Arc<AtomicUsize>);

    impl Phase for CountTypes {
        fn name(&self) -> &'static str {
            "count-types"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            let resolvers = ctx.resolvers()?;
            self.0.store(resolvers.types.declarations().len(), Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_extra_phase_sees_resolvers() {
        let count = Arc::new(AtomicUsize::new(usize::MAX));
        let mut ir = IntermediateRepresentation::new("acme");
        ir.types.push(TypeDeclaration::new(
            DeclaredTypeName::new(&["imdb"], "MovieId"),
            TypeShape::Alias {
                alias_of: TypeReference::string(),
            },
        ));

        Pipeline::new()
            .phase(CountTypes(count.clone()))
            .run(ir, GeneratorOptions::default())
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    struct ForbidEmptyApiLint;

    impl Lint for ForbidEmptyApiLint {
        fn name(&self) -> &'static str {
            "forbid-empty-api"
        }

        fn description(&self) -> &'static str {
            "Reject documents without services"
        }

        fn check(
            &self,
            ir: &IntermediateRepresentation,
            diagnostics: &mut Vec<crate::pipeline::Diagnostic>,
        ) {
            if ir.services.is_empty() {
                diagnostics.push(crate::pipeline::Diagnostic::error("validate", "no services"));
            }
        }
    }

    #[test]
    fn test_pipeline_runs_extra_lints() {
        let err = Pipeline::new()
            .lint(ForbidEmptyApiLint)
            .run(IntermediateRepresentation::new("acme"), GeneratorOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed with 1 error(s)");
    }

    #[test]
    fn test_pipeline_stops_on_unresolved_reference() {
        let mut ir = IntermediateRepresentation::new("acme");
        ir.types.push(TypeDeclaration::new(
            DeclaredTypeName::new(&["imdb"], "Movie"),
            TypeShape::Object {
                extends: Vec::new(),
                properties: vec![ObjectProperty::new(
                    NameAndWireValue::new("director"),
                    TypeReference::named(DeclaredTypeName::new(&["imdb"], "Person")),
                )],
            },
        ));

        let err = Pipeline::new()
            .run(ir, GeneratorOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed with 1 error(s)");
    }
}
