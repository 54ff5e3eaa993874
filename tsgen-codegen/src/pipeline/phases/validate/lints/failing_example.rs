//! Lint for type examples that their own schema rejects.

use tsgen_ir::IntermediateRepresentation;
use tsgen_schema::{Schema, SchemaOptions};

use super::type_location;
use crate::{pipeline::Diagnostic, pipeline::phases::Lint, runtime::RuntimeSchemas};

/// Lint that parses every type example against the runtime schema built
/// for its declaration. Failures are warnings: the example only feeds docs.
pub struct FailingExampleLint {
    options: SchemaOptions,
}

impl FailingExampleLint {
    pub fn new(options: SchemaOptions) -> Self {
        Self { options }
    }
}

impl Default for FailingExampleLint {
    fn default() -> Self {
        Self::new(SchemaOptions::default())
    }
}

impl Lint for FailingExampleLint {
    fn name(&self) -> &'static str {
        "failing-example"
    }

    fn description(&self) -> &'static str {
        "Check type examples parse with the type's schema"
    }

    fn check(&self, ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>) {
        if ir.types.iter().all(|t| t.examples.is_empty()) {
            return;
        }
        // Unresolved references are reported by their own lint.
        let Ok(schemas) = RuntimeSchemas::from_ir(ir) else {
            return;
        };

        for declaration in &ir.types {
            let Some(schema) = schemas.schema(&declaration.name) else {
                continue;
            };
            for (index, example) in declaration.examples.iter().enumerate() {
                if let Err(err) = schema.parse(example, &self.options) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "example {} of '{}' does not match its schema: {err}",
                                index + 1,
                                declaration.name.name.original_name
                            ),
                        )
                        .at(type_location(&declaration.name)),
                    );
                }
            }
        }
    }
}
