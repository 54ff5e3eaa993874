//! Per-file generation context.
//!
//! A [`FileContext`] is created for every generated file. It owns the file's
//! [`ImportsManager`] and borrows the run-wide referencers, resolvers and
//! options. Generators only see the capabilities they need through the
//! narrow traits below, all implemented by [`FileContext`].

use tsgen_codegen::{
    GenerationError, GeneratorOptions, generation::ImportsManager, resolvers::Resolvers,
};
use tsgen_ir::{
    DeclaredErrorName, DeclaredServiceName, DeclaredTypeName, PackagePath, ResolvedTypeReference,
    TypeReference,
};

use crate::{
    code_file::CodeFile,
    declaration_referencer::{
        EndpointName, ImportStrategy, Reference, Referencer, Referencers, SERIALIZATION_DIRECTORY,
        SERIALIZERS_IMPORT, WrapperName,
    },
};

/// Local name of the runtime library import.
pub const CORE_IMPORT: &str = "core";

/// Module specifier and local name of the server framework import.
pub const EXPRESS_IMPORT: &str = "express";

/// Referring to type declarations of the api tree.
pub trait TypeReferencing {
    fn reference_to_type(&mut self, name: &DeclaredTypeName) -> Reference;

    fn resolve_type(
        &self,
        reference: &TypeReference,
    ) -> Result<ResolvedTypeReference, GenerationError>;
}

/// Referring to runtime schemas of the serialization tree.
pub trait SchemaReferencing: TypeReferencing {
    fn reference_to_schema(&mut self, name: &DeclaredTypeName) -> Reference;

    /// Local name of the runtime library (`core`).
    fn core(&mut self) -> String;

    /// Whether a schema of `from` must defer its reference to `to`.
    fn is_cyclic(&self, from: &DeclaredTypeName, to: &DeclaredTypeName) -> bool;
}

/// Referring to error declarations and their schemas.
pub trait ErrorReferencing {
    /// Body type of an error, `None` for errors without a body.
    fn error_body(&self, name: &DeclaredErrorName)
    -> Result<Option<TypeReference>, GenerationError>;

    fn reference_to_error(&mut self, name: &DeclaredErrorName) -> Reference;

    /// The error's own body schema, if one is generated for it.
    fn reference_to_error_schema(
        &mut self,
        name: &DeclaredErrorName,
    ) -> Result<Option<Reference>, GenerationError>;
}

/// Referring to clients and the declarations they use.
pub trait ServiceReferencing {
    /// The service class declared in `package`, aliased by package path.
    fn reference_to_service(&mut self, package: &PackagePath) -> Reference;

    /// The service class declared in `package`, imported as `alias`.
    fn reference_to_service_as(&mut self, package: &PackagePath, alias: &str) -> Reference;

    /// The client of a non-root package: its wrapper when it has
    /// subpackages, its service class otherwise.
    fn reference_to_client(&mut self, package: &PackagePath) -> Reference;

    fn reference_to_endpoint_error(&mut self, name: &EndpointName) -> Reference;

    fn reference_to_endpoint_error_schema(&mut self, name: &EndpointName) -> Reference;

    fn reference_to_environments(&mut self) -> Reference;
}

/// Referring to server routers and the errors they send.
pub trait ExpressReferencing {
    /// Local name of the server framework (`express`).
    fn express(&mut self) -> String;

    fn reference_to_express_service(&mut self, name: &DeclaredServiceName) -> Reference;

    /// The base class of every generated error.
    fn reference_to_api_error(&mut self) -> Reference;
}

/// Whether an error body gets a schema of its own.
///
/// Named bodies reuse the named type's schema and unknown bodies need none.
pub fn error_has_schema(body: &TypeReference) -> bool {
    matches!(
        body,
        TypeReference::Primitive { .. } | TypeReference::Container { .. }
    )
}

/// The context of one generated file.
pub struct FileContext<'a> {
    path: String,
    imports: ImportsManager,
    referencers: &'a Referencers,
    resolvers: &'a Resolvers,
    options: &'a GeneratorOptions,
}

impl<'a> FileContext<'a> {
    pub fn new(
        path: impl Into<String>,
        referencers: &'a Referencers,
        resolvers: &'a Resolvers,
        options: &'a GeneratorOptions,
    ) -> Self {
        Self {
            path: path.into(),
            imports: ImportsManager::new(),
            referencers,
            resolvers,
            options,
        }
    }

    /// Path of the file being generated, relative to the package root.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn options(&self) -> &'a GeneratorOptions {
        self.options
    }

    pub fn resolvers(&self) -> &'a Resolvers {
        self.resolvers
    }

    pub fn referencers(&self) -> &'a Referencers {
        self.referencers
    }

    /// Claim a name the file declares itself.
    pub fn reserve(&mut self, local: &str) {
        self.imports.reserve(local);
    }

    pub fn imports(&self) -> &ImportsManager {
        &self.imports
    }

    /// Whether the file imports the runtime library.
    pub fn uses_core(&self) -> bool {
        self.imports.has_module(&self.options.core_package)
    }

    /// Whether the file imports the server framework.
    pub fn uses_express(&self) -> bool {
        self.imports.has_module(EXPRESS_IMPORT)
    }

    /// Start the file: every import recorded so far, no body yet.
    pub fn code_file(&self) -> CodeFile {
        CodeFile::new().imports_from(&self.imports)
    }

    /// Schemas referenced at module scope of the serialization tree are
    /// imported from their own files; elsewhere through the tree's barrel.
    fn schema_strategy(&self) -> ImportStrategy {
        if self.path.split('/').next() == Some(SERIALIZATION_DIRECTORY) {
            ImportStrategy::direct()
        } else {
            ImportStrategy::from_root(SERIALIZERS_IMPORT)
        }
    }

    fn client_alias(package: &PackagePath) -> String {
        let prefix: String = package
            .segments()
            .iter()
            .map(|segment| segment.pascal_case.as_str())
            .collect();
        format!("{prefix}Client")
    }
}

impl TypeReferencing for FileContext<'_> {
    fn reference_to_type(&mut self, name: &DeclaredTypeName) -> Reference {
        self.referencers.types.reference_to(
            name,
            &ImportStrategy::from_root(&self.options.namespace_export),
            &self.path,
            &mut self.imports,
        )
    }

    fn resolve_type(
        &self,
        reference: &TypeReference,
    ) -> Result<ResolvedTypeReference, GenerationError> {
        self.resolvers.types.resolve_type_reference(reference)
    }
}

impl SchemaReferencing for FileContext<'_> {
    fn reference_to_schema(&mut self, name: &DeclaredTypeName) -> Reference {
        self.referencers.type_schemas.reference_to(
            name,
            &self.schema_strategy(),
            &self.path,
            &mut self.imports,
        )
    }

    fn core(&mut self) -> String {
        self.imports
            .add_namespace(&self.options.core_package, CORE_IMPORT)
    }

    fn is_cyclic(&self, from: &DeclaredTypeName, to: &DeclaredTypeName) -> bool {
        self.resolvers.types.references_cycle(from, to)
    }
}

impl ErrorReferencing for FileContext<'_> {
    fn error_body(
        &self,
        name: &DeclaredErrorName,
    ) -> Result<Option<TypeReference>, GenerationError> {
        Ok(self
            .resolvers
            .errors
            .get_error_declaration_from_name(name)?
            .type_
            .clone())
    }

    fn reference_to_error(&mut self, name: &DeclaredErrorName) -> Reference {
        self.referencers.errors.reference_to(
            name,
            &ImportStrategy::from_root(&self.options.namespace_export),
            &self.path,
            &mut self.imports,
        )
    }

    fn reference_to_error_schema(
        &mut self,
        name: &DeclaredErrorName,
    ) -> Result<Option<Reference>, GenerationError> {
        match self.error_body(name)? {
            Some(body) if error_has_schema(&body) => {
                Ok(Some(self.referencers.error_schemas.reference_to(
                    name,
                    &self.schema_strategy(),
                    &self.path,
                    &mut self.imports,
                )))
            }
            _ => Ok(None),
        }
    }
}

impl ServiceReferencing for FileContext<'_> {
    fn reference_to_service(&mut self, package: &PackagePath) -> Reference {
        self.reference_to_service_as(package, &Self::client_alias(package))
    }

    fn reference_to_service_as(&mut self, package: &PackagePath, alias: &str) -> Reference {
        self.referencers.services.reference_to(
            &DeclaredServiceName {
                package: package.clone(),
            },
            &ImportStrategy::aliased(alias),
            &self.path,
            &mut self.imports,
        )
    }

    fn reference_to_client(&mut self, package: &PackagePath) -> Reference {
        if self.resolvers.services.subpackages_of(package).is_empty() {
            self.reference_to_service(package)
        } else {
            self.referencers.wrappers.reference_to(
                &WrapperName::new(package.clone()),
                &ImportStrategy::direct(),
                &self.path,
                &mut self.imports,
            )
        }
    }

    fn reference_to_endpoint_error(&mut self, name: &EndpointName) -> Reference {
        self.referencers.endpoint_errors.reference_to(
            name,
            &ImportStrategy::from_root(&self.options.namespace_export),
            &self.path,
            &mut self.imports,
        )
    }

    fn reference_to_endpoint_error_schema(&mut self, name: &EndpointName) -> Reference {
        self.referencers.endpoint_error_schemas.reference_to(
            name,
            &self.schema_strategy(),
            &self.path,
            &mut self.imports,
        )
    }

    fn reference_to_environments(&mut self) -> Reference {
        self.referencers.environments.reference_to(
            &(),
            &ImportStrategy::direct(),
            &self.path,
            &mut self.imports,
        )
    }
}

impl ExpressReferencing for FileContext<'_> {
    fn express(&mut self) -> String {
        self.imports.add_namespace(EXPRESS_IMPORT, EXPRESS_IMPORT)
    }

    fn reference_to_express_service(&mut self, name: &DeclaredServiceName) -> Reference {
        self.referencers.express_services.reference_to(
            name,
            &ImportStrategy::direct(),
            &self.path,
            &mut self.imports,
        )
    }

    fn reference_to_api_error(&mut self) -> Reference {
        self.referencers.api_error.reference_to(
            &(),
            &ImportStrategy::direct(),
            &self.path,
            &mut self.imports,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsgen_ir::{
        DeclaredServiceName, HttpEndpoint, HttpMethod, HttpService, IntermediateRepresentation,
        Name,
    };

    use super::*;

    fn fixture() -> (Referencers, Resolvers, GeneratorOptions) {
        let mut ir = IntermediateRepresentation::new("acme");
        for package in [&["imdb"][..], &["imdb", "v2"], &["netflix"]] {
            ir.services.push(
                HttpService::new(DeclaredServiceName::new(package))
                    .endpoint(HttpEndpoint::new("list", HttpMethod::Get, "/")),
            );
        }
        (
            Referencers::new(&Name::new("acme"), "Acme"),
            Resolvers::new(Arc::new(ir)),
            GeneratorOptions::new("@acme/sdk", "Acme"),
        )
    }

    #[test]
    fn test_same_symbol_from_two_modules_is_aliased() {
        let (referencers, resolvers, options) = fixture();
        let mut ctx =
            FileContext::new("api/imdb/ImdbClient.ts", &referencers, &resolvers, &options);
        ctx.reserve("ImdbClient");

        let own_service = ctx.reference_to_client(&PackagePath::new(&["imdb", "v2"]));
        let other = ctx.reference_to_client(&PackagePath::new(&["netflix"]));

        assert_eq!(own_service.expression, "ImdbV2Client");
        assert_eq!(other.expression, "NetflixClient");
        let modules: Vec<&str> = ctx.imports().iter().map(|(m, _)| m).collect();
        assert_eq!(modules, vec!["./v2/client/Client", "../netflix/client/Client"]);
    }

    #[test]
    fn test_wrapper_used_for_package_with_children() {
        let (referencers, resolvers, options) = fixture();
        let mut ctx = FileContext::new("Client.ts", &referencers, &resolvers, &options);

        let imdb = ctx.reference_to_client(&PackagePath::new(&["imdb"]));
        assert_eq!(imdb.expression, "ImdbClient");
        assert!(ctx.imports().has_module("./api/imdb/ImdbClient"));
    }

    #[test]
    fn test_core_import_is_shared() {
        let (referencers, resolvers, options) = fixture();
        let mut ctx =
            FileContext::new("serialization/types/A.ts", &referencers, &resolvers, &options);
        assert!(!ctx.uses_core());
        assert_eq!(ctx.core(), "core");
        assert_eq!(ctx.core(), "core");
        assert!(ctx.uses_core());
        assert_eq!(ctx.imports().len(), 1);
    }

    #[test]
    fn test_declared_errors_are_referenced_through_the_api_namespace() {
        let (referencers, resolvers, options) = fixture();
        let mut ctx =
            FileContext::new("api/imdb/service/ImdbService.ts", &referencers, &resolvers, &options);

        let error = ctx.reference_to_error(&DeclaredErrorName::new(&["netflix"], "Outage"));
        let base = ctx.reference_to_api_error();

        assert_eq!(error.expression, "Acme.netflix.Outage");
        assert_eq!(base.expression, "AcmeError");
        assert!(ctx.imports().has_module("../.."));
        assert!(ctx.imports().has_module("../../../AcmeError"));
        assert!(!ctx.uses_express());
        assert_eq!(ctx.express(), "express");
        assert!(ctx.uses_express());
    }
}
