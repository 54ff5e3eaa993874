//! Lint for endpoints that declare undeclared errors.

use std::collections::HashSet;

use tsgen_ir::IntermediateRepresentation;

use super::location;
use crate::{GenerationError, pipeline::Diagnostic, pipeline::phases::Lint};

pub struct UnresolvedErrorLint;

impl Lint for UnresolvedErrorLint {
    fn name(&self) -> &'static str {
        "unresolved-error"
    }

    fn description(&self) -> &'static str {
        "Check every error an endpoint can return is declared"
    }

    fn check(&self, ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>) {
        let declared: HashSet<_> = ir.errors.iter().map(|e| e.name.error_id.as_str()).collect();

        for service in &ir.services {
            for endpoint in &service.endpoints {
                for response_error in &endpoint.errors {
                    if declared.contains(response_error.error.error_id.as_str()) {
                        continue;
                    }
                    let err = GenerationError::UnresolvedError {
                        error_id: response_error.error.error_id.clone(),
                    };
                    diagnostics.push(
                        Diagnostic::error("validate", err.to_string()).at(location(
                            "services",
                            &service.name.package,
                            &endpoint.name.original_name,
                        )),
                    );
                }
            }
        }
    }
}
