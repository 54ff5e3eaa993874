//! Lint for references to undeclared types.

use std::collections::HashSet;

use tsgen_ir::{DeclaredTypeName, IntermediateRepresentation, TypeReference};

use super::{error_location, location, type_location};
use crate::{
    GenerationError, pipeline::Diagnostic, pipeline::phases::Lint,
    resolvers::declaration_references,
};

/// Lint that reports named type references with no matching declaration.
pub struct UnresolvedTypeLint;

impl Lint for UnresolvedTypeLint {
    fn name(&self) -> &'static str {
        "unresolved-type"
    }

    fn description(&self) -> &'static str {
        "Check every named type reference has a declaration"
    }

    fn check(&self, ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>) {
        let declared: HashSet<_> = ir.types.iter().map(|t| t.name.type_id.as_str()).collect();

        for (at, name) in named_references(ir) {
            if !declared.contains(name.type_id.as_str()) {
                let err = GenerationError::UnresolvedType {
                    type_id: name.type_id.clone(),
                };
                diagnostics.push(Diagnostic::error("validate", err.to_string()).at(at));
            }
        }
    }
}

/// Every named reference in the IR with the location it appears at.
fn named_references(ir: &IntermediateRepresentation) -> Vec<(String, &DeclaredTypeName)> {
    let mut out = Vec::new();

    for header in &ir.headers {
        push(&mut out, "headers", &header.value_type);
    }
    for error in &ir.errors {
        if let Some(body) = &error.type_ {
            push(&mut out, &error_location(&error.name), body);
        }
    }
    for service in &ir.services {
        let service_at = location("services", &service.name.package, "");
        for header in &service.headers {
            push(&mut out, &service_at, &header.value_type);
        }
        for endpoint in &service.endpoints {
            let at = format!("{service_at}.{}", endpoint.name.original_name);
            for parameter in &endpoint.path_parameters {
                push(&mut out, &at, &parameter.value_type);
            }
            for parameter in &endpoint.query_parameters {
                push(&mut out, &at, &parameter.value_type);
            }
            for header in &endpoint.headers {
                push(&mut out, &at, &header.value_type);
            }
            if let Some(body) = &endpoint.request_body {
                push(&mut out, &at, &body.request_body_type);
            }
            if let Some(response) = &endpoint.response {
                push(&mut out, &at, &response.response_body_type);
            }
        }
    }

    for declaration in &ir.types {
        let at = type_location(&declaration.name);
        for name in declaration_references(declaration) {
            out.push((at.clone(), name));
        }
    }
    out
}

fn push<'a>(out: &mut Vec<(String, &'a DeclaredTypeName)>, at: &str, reference: &'a TypeReference) {
    for name in reference.named_references() {
        out.push((at.to_string(), name));
    }
}
