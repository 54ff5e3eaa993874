//! Per-endpoint error unions.
//!
//! Every endpoint gets an `Error` type in the api tree: one member per
//! declared error, discriminated by `errorName`, plus an `_Unknown` member
//! for failures the endpoint does not declare. Endpoints that declare errors
//! also get a schema in the serialization tree that parses error bodies.

use tsgen_codegen::{GenerationError, builder::Renderable};
use tsgen_ir::{HttpEndpoint, NameAndWireValue, TypeReference};

use super::DeclarationFile;
use crate::{
    CodeFile,
    ast::{Const, Field, Interface, Namespace, Union, string_literal},
    context::{ErrorReferencing, FileContext, SchemaReferencing, ServiceReferencing},
    declaration_referencer::EndpointName,
    type_reference::parsed_type,
    zurg,
};

/// Exported name of the union in both trees.
const ERROR: &str = "Error";
const ERROR_NAME: &str = "errorName";
const CONTENT: &str = "content";
const UNKNOWN_MEMBER: &str = "_Unknown";

/// `api/<package>/client/<endpoint>.ts`
pub struct EndpointErrorFile<'a> {
    endpoint: &'a HttpEndpoint,
}

impl<'a> EndpointErrorFile<'a> {
    pub fn new(endpoint: &'a HttpEndpoint) -> Self {
        Self { endpoint }
    }
}

impl DeclarationFile for EndpointErrorFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        ctx.reserve(ERROR);
        let mut namespace = Namespace::new(ERROR);
        let mut variants = Vec::with_capacity(self.endpoint.errors.len() + 1);
        for response_error in &self.endpoint.errors {
            let name = &response_error.error;
            let member = &name.name.pascal_case;
            let wire_value = ctx
                .resolvers()
                .errors
                .get_error_declaration_from_name(name)?
                .discriminant_value
                .wire_value
                .clone();
            let mut interface = Interface::new(member.as_str())
                .private()
                .doc(response_error.docs.as_deref())
                .field(ERROR_NAME, string_literal(&wire_value));
            if let Some(body) = ctx.error_body(name)? {
                interface = interface.field(CONTENT, parsed_type(ctx, &body));
            }
            namespace.push(interface);
            variants.push(format!("{ERROR}.{member}"));
        }

        let core = ctx.core();
        namespace.push(
            Interface::new(UNKNOWN_MEMBER)
                .private()
                .field(ERROR_NAME, "void")
                .field(CONTENT, format!("{core}.Fetcher.Error")),
        );
        variants.push(format!("{ERROR}.{UNKNOWN_MEMBER}"));

        let body: Vec<Box<dyn Renderable>> = vec![
            Box::new(Union::new(ERROR).variants(variants)),
            Box::new(namespace),
        ];
        Ok(ctx.code_file().add_all(body))
    }
}

/// `serialization/<package>/client/<endpoint>.ts`
///
/// Empty for endpoints without declared errors.
pub struct EndpointErrorSchemaFile<'a> {
    name: &'a EndpointName,
    endpoint: &'a HttpEndpoint,
}

impl<'a> EndpointErrorSchemaFile<'a> {
    pub fn new(name: &'a EndpointName, endpoint: &'a HttpEndpoint) -> Self {
        Self { name, endpoint }
    }
}

impl DeclarationFile for EndpointErrorSchemaFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        if self.endpoint.errors.is_empty() {
            return Ok(CodeFile::new());
        }
        ctx.reserve(ERROR);
        let parsed = ctx.reference_to_endpoint_error(self.name).expression;

        let mut namespace = Namespace::new(ERROR);
        let mut members = Vec::with_capacity(self.endpoint.errors.len());
        let mut variants = Vec::with_capacity(self.endpoint.errors.len());
        for response_error in &self.endpoint.errors {
            let name = &response_error.error;
            let member = &name.name.pascal_case;
            let wire_value = ctx
                .resolvers()
                .errors
                .get_error_declaration_from_name(name)?
                .discriminant_value
                .wire_value
                .clone();
            let mut raw = Interface::new(member.as_str())
                .private()
                .field(ERROR_NAME, string_literal(&wire_value));
            let mut properties = Vec::new();
            if let Some(body) = ctx.error_body(name)? {
                let (schema, raw_content) = match &body {
                    TypeReference::Named(type_name) => (
                        zurg::named_schema(ctx, type_name, None)?,
                        ctx.reference_to_schema(type_name).member("Raw").expression,
                    ),
                    TypeReference::Unknown => {
                        let core = ctx.core();
                        (format!("{core}.serialization.unknown()"), "unknown".to_string())
                    }
                    _ => match ctx.reference_to_error_schema(name)? {
                        Some(reference) => (
                            reference.expression.clone(),
                            reference.member("Raw").expression,
                        ),
                        None => {
                            return Err(GenerationError::UnresolvedError {
                                error_id: name.error_id.clone(),
                            });
                        }
                    },
                };
                properties.push(format!("{CONTENT}: {schema}"));
                raw = raw.field_with(Field::new(CONTENT, raw_content));
            }
            let core = ctx.core();
            let object = zurg::block(&format!("{core}.serialization.object({{"), &properties, "})");
            namespace.push(raw);
            members.push((wire_value, object));
            variants.push(format!("{ERROR}.{member}"));
        }
        namespace.push(Union::new("Raw").private().variants(variants));

        let schema = zurg::union_schema(ctx, &NameAndWireValue::new(ERROR_NAME), &members);
        let core = ctx.core();
        let schema = Const::new(ERROR, schema).ty(format!(
            "{core}.serialization.Schema<{ERROR}.Raw, Exclude<{parsed}, {parsed}.{UNKNOWN_MEMBER}>>"
        ));
        let body: Vec<Box<dyn Renderable>> = vec![Box::new(schema), Box::new(namespace)];
        Ok(ctx.code_file().add_all(body))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsgen_codegen::{GeneratorOptions, resolvers::Resolvers};
    use tsgen_ir::{
        DeclaredErrorName, DeclaredServiceName, DeclaredTypeName, ErrorDeclaration, HttpMethod,
        IntermediateRepresentation,
    };

    use super::*;
    use crate::declaration_referencer::Referencers;

    fn fixture() -> (IntermediateRepresentation, HttpEndpoint) {
        let not_found = DeclaredErrorName::new(&["imdb"], "MovieNotFound");
        let conflict = DeclaredErrorName::new(&["imdb"], "Conflict");
        let mut ir = IntermediateRepresentation::new("acme");
        ir.errors.push(
            ErrorDeclaration::new(not_found.clone(), 404)
                .with_body(TypeReference::named(DeclaredTypeName::new(&["imdb"], "MovieId"))),
        );
        ir.errors.push(
            ErrorDeclaration::new(conflict.clone(), 409)
                .with_body(TypeReference::list(TypeReference::string())),
        );
        let endpoint = HttpEndpoint::new("getMovie", HttpMethod::Get, "/movies")
            .with_error(not_found)
            .with_error(conflict);
        (ir, endpoint)
    }

    #[test]
    fn test_api_error_union() {
        let (ir, endpoint) = fixture();
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let referencers = Referencers::new(&ir.api_name, &options.namespace_export);
        let resolvers = Resolvers::new(Arc::new(ir));
        let mut ctx = FileContext::new(
            "api/imdb/client/getMovie.ts",
            &referencers,
            &resolvers,
            &options,
        );

        let code = EndpointErrorFile::new(&endpoint).generate(&mut ctx).unwrap().render();
        insta::assert_snapshot!(code, @r#"
        // This file was auto-generated by tsgen. Do not edit.

        import * as Acme from "../..";
        import * as core from "@tsgen/core";

        export type Error = Error.MovieNotFound | Error.Conflict | Error._Unknown;

        export declare namespace Error {
          interface MovieNotFound {
            errorName: "MovieNotFound";
            content: Acme.imdb.MovieId;
          }

          interface Conflict {
            errorName: "Conflict";
            content: string[];
          }

          interface _Unknown {
            errorName: void;
            content: core.Fetcher.Error;
          }
        }
        "#);
    }

    #[test]
    fn test_error_schema_uses_type_and_error_schemas() {
        let (ir, endpoint) = fixture();
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let referencers = Referencers::new(&ir.api_name, &options.namespace_export);
        let resolvers = Resolvers::new(Arc::new(ir));
        let name = EndpointName::new(&DeclaredServiceName::new(&["imdb"]), &endpoint);
        let mut ctx = FileContext::new(
            "serialization/imdb/client/getMovie.ts",
            &referencers,
            &resolvers,
            &options,
        );

        let code = EndpointErrorSchemaFile::new(&name, &endpoint)
            .generate(&mut ctx)
            .unwrap()
            .render();
        assert!(code.contains(
            concat!(
                "export const Error: core.serialization.Schema<Error.Raw, ",
                "Exclude<Acme.imdb.getMovie.Error, Acme.imdb.getMovie.Error._Unknown>> = ",
                "core.serialization.union(\"errorName\", {\n",
            )
        ));
        assert!(code.contains(
            "  MovieNotFound: core.serialization.object({\n    content: MovieId,\n  }),\n"
        ));
        assert!(code.contains("    content: Conflict,\n"));
        assert!(code.contains("    content: Conflict.Raw;\n"));
        assert!(code.contains("  type Raw = Error.MovieNotFound | Error.Conflict;\n"));
    }

    #[test]
    fn test_no_schema_without_errors() {
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let ir = IntermediateRepresentation::new("acme");
        let referencers = Referencers::new(&ir.api_name, &options.namespace_export);
        let resolvers = Resolvers::new(Arc::new(ir));
        let endpoint = HttpEndpoint::new("list", HttpMethod::Get, "/");
        let name = EndpointName::new(&DeclaredServiceName::new(&[]), &endpoint);
        let mut ctx =
            FileContext::new("serialization/client/list.ts", &referencers, &resolvers, &options);

        let file = EndpointErrorSchemaFile::new(&name, &endpoint).generate(&mut ctx).unwrap();
        assert!(file.is_empty());
    }
}
