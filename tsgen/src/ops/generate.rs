//! Generate operation - SDK generation from an IR document.

use std::{path::Path, sync::Arc};

use eyre::{Context, Result};
use tsgen_codegen::{
    GeneratorOptions,
    pipeline::Pipeline,
};
use tsgen_ir::IntermediateRepresentation;
use tsgen_typescript::{DuplicateFilePathLint, Generator, LanguageCodegen};

use super::check::{diagnostics, format_diagnostic};
use crate::reports::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory the package is published to.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Validates the document first; nothing is generated when validation
/// reports errors.
pub fn generate(
    ir: IntermediateRepresentation,
    options: GeneratorOptions,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let ir = Arc::new(ir);
    let package_name = options.package_name.clone();

    let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics(&ir, &options)
        .into_iter()
        .partition(|d| d.severity.is_error());
    let warnings = warnings.iter().map(format_diagnostic).collect();
    if !errors.is_empty() {
        return Ok(GenerateReport {
            package_name,
            warnings,
            result: GenerationResult::Invalid(errors.iter().map(format_diagnostic).collect()),
        });
    }

    let ctx = Pipeline::new()
        .lint(DuplicateFilePathLint::new(&options.namespace_export))
        .run(ir, options)
        .wrap_err("Pipeline failed")?;
    let generator = Generator::from_context(&ctx)?;

    let result = if opts.dry_run {
        let files = generator
            .preview()?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let generated = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files: generated.files.len(),
            skipped: generated.skipped,
        })
    };

    Ok(GenerateReport {
        package_name,
        warnings,
        result,
    })
}
