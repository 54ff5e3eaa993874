//! Lint for unions and enums that repeat a wire value.

use std::collections::HashSet;

use tsgen_ir::{IntermediateRepresentation, TypeShape};

use super::type_location;
use crate::{pipeline::Diagnostic, pipeline::phases::Lint};

/// Lint that rejects duplicate discriminant values in a union and duplicate
/// wire values in an enum. Either makes parsing ambiguous.
pub struct DuplicateDiscriminantLint;

impl Lint for DuplicateDiscriminantLint {
    fn name(&self) -> &'static str {
        "duplicate-discriminant"
    }

    fn description(&self) -> &'static str {
        "Check union discriminants and enum values are unique"
    }

    fn check(&self, ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>) {
        for declaration in &ir.types {
            let wire_values: Vec<&str> = match &declaration.shape {
                TypeShape::Union { types, .. } => types
                    .iter()
                    .map(|member| member.discriminant_value.wire_value.as_str())
                    .collect(),
                TypeShape::Enum { values } => values
                    .iter()
                    .map(|value| value.name.wire_value.as_str())
                    .collect(),
                _ => continue,
            };

            let mut seen = HashSet::new();
            for wire_value in wire_values {
                if !seen.insert(wire_value) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "'{}' declares the value '{wire_value}' more than once",
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
