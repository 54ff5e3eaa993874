//! Compilation context passed through pipeline phases.

use std::sync::Arc;

use eyre::Result;
use tsgen_ir::IntermediateRepresentation;

use super::diagnostic::Diagnostic;
use crate::{GeneratorOptions, resolvers::Resolvers};

/// Context passed through all pipeline phases.
#[derive(Debug)]
pub struct CompilationContext {
    /// The IR being compiled. Never mutated.
    pub ir: Arc<IntermediateRepresentation>,
    pub options: GeneratorOptions,
    /// Shared lookups (populated by AnalyzePhase).
    pub resolvers: Option<Resolvers>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(ir: impl Into<Arc<IntermediateRepresentation>>, options: GeneratorOptions) -> Self {
        Self {
            ir: ir.into(),
            options,
            resolvers: None,
            diagnostics: Vec::new(),
        }
    }

    /// Whether any lint reported an error.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// The resolvers built by AnalyzePhase.
    pub fn resolvers(&self) -> Result<&Resolvers> {
        self.resolvers
            .as_ref()
            .ok_or_else(|| eyre::eyre!("resolvers not built - did AnalyzePhase run?"))
    }
}
