//! `tsgen check`: lint an IR document without generating anything.

use std::path::Path;

use tsgen_codegen::{
    GeneratorOptions,
    pipeline::{Diagnostic, phases::ValidatePhase},
};
use tsgen_ir::IntermediateRepresentation;
use tsgen_typescript::DuplicateFilePathLint;

use crate::reports::{CheckReport, IrSummary};

/// The validate phase used by every command: the built-in lints plus the
/// checks specific to the TypeScript layout.
fn validate_phase(options: &GeneratorOptions) -> ValidatePhase {
    ValidatePhase::for_options(options)
        .with_lint(DuplicateFilePathLint::new(&options.namespace_export))
}

/// Every diagnostic the validate phase reports, errors included.
pub fn diagnostics(ir: &IntermediateRepresentation, options: &GeneratorOptions) -> Vec<Diagnostic> {
    let diagnostics = validate_phase(options).collect(ir);
    tracing::debug!(count = diagnostics.len(), "validated IR");
    diagnostics
}

/// Render a diagnostic with its location on a second line.
pub fn format_diagnostic(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}

/// Lint an IR document; the report is valid when no error was found.
pub fn check(
    ir: IntermediateRepresentation,
    options: GeneratorOptions,
    ir_path: &Path,
) -> CheckReport {
    let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics(&ir, &options)
        .into_iter()
        .partition(|d| d.severity.is_error());

    CheckReport {
        ir_path: ir_path.to_path_buf(),
        summary: IrSummary::of(&ir),
        errors: errors.iter().map(format_diagnostic).collect(),
        warnings: warnings.iter().map(format_diagnostic).collect(),
    }
}
