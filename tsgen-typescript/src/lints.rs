//! Lints specific to the TypeScript layout.

use std::collections::HashMap;

use tsgen_codegen::{
    GenerationError,
    pipeline::{Diagnostic, phases::Lint},
};
use tsgen_ir::{IntermediateRepresentation, PackagePath};

use crate::declaration_referencer::{EndpointName, Referencer, Referencers, WrapperName};

/// Rejects documents in which two declarations map to the same file.
///
/// Paths are compared case-insensitively: `Movie.ts` and `movie.ts` cannot
/// coexist on every file system the package may be checked out on.
pub struct DuplicateFilePathLint {
    namespace_export: String,
}

impl DuplicateFilePathLint {
    pub fn new(namespace_export: impl Into<String>) -> Self {
        Self {
            namespace_export: namespace_export.into(),
        }
    }
}

impl Lint for DuplicateFilePathLint {
    fn name(&self) -> &'static str {
        "duplicate-file-path"
    }

    fn description(&self) -> &'static str {
        "Check that no two declarations are generated into the same file"
    }

    fn check(&self, ir: &IntermediateRepresentation, diagnostics: &mut Vec<Diagnostic>) {
        let referencers = Referencers::new(&ir.api_name, &self.namespace_export);
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut claim = |path: String, location: String| {
            match seen.get(&path.to_lowercase()) {
                Some(first) => {
                    let err = GenerationError::DuplicateFile { path };
                    diagnostics.push(
                        Diagnostic::error("validate", format!("{err} (first by {first})"))
                            .at(location),
                    );
                }
                None => {
                    seen.insert(path.to_lowercase(), location);
                }
            }
        };

        for declaration in &ir.types {
            let name = &declaration.name;
            claim(
                referencers.types.exported_filepath(name).path(),
                location("types", &name.package, &name.name.original_name),
            );
        }
        for declaration in &ir.errors {
            let name = &declaration.name;
            claim(
                referencers.errors.exported_filepath(name).path(),
                location("errors", &name.package, &name.name.original_name),
            );
        }
        for service in &ir.services {
            let package = &service.name.package;
            if !package.is_root() {
                claim(
                    referencers.services.exported_filepath(&service.name).path(),
                    location("services", package, ""),
                );
            }
            for endpoint in &service.endpoints {
                let name = EndpointName::new(&service.name, endpoint);
                claim(
                    referencers.endpoint_errors.exported_filepath(&name).path(),
                    location("services", package, &endpoint.name.original_name),
                );
            }
        }
        for package in ir.service_packages() {
            if package.is_root() || ir.subpackages_of(&package).is_empty() {
                continue;
            }
            let at = location("packages", &package, "");
            claim(
                referencers
                    .wrappers
                    .exported_filepath(&WrapperName::new(package))
                    .path(),
                at,
            );
        }
    }
}

fn location(kind: &str, package: &PackagePath, name: &str) -> String {
    std::iter::once(kind)
        .chain(package.segments().iter().map(|s| s.original_name.as_str()))
        .chain((!name.is_empty()).then_some(name))
        .collect::<Vec<_>>()
        .join(".")
}
