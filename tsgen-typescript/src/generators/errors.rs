//! Error classes (api tree) and error body schemas (serialization tree).

use tsgen_codegen::{GenerationError, builder::CodeFragment};
use tsgen_ir::ErrorDeclaration;

use super::DeclarationFile;
use crate::{
    CodeFile,
    ast::{Class, Const, Namespace, TypeAlias, string_literal},
    context::{FileContext, SchemaReferencing, error_has_schema},
    type_reference::{parsed_type, raw_type},
    zurg,
};

/// `api/<package>/errors/<Name>.ts`
pub struct ErrorFile<'a> {
    declaration: &'a ErrorDeclaration,
}

impl<'a> ErrorFile<'a> {
    pub fn new(declaration: &'a ErrorDeclaration) -> Self {
        Self { declaration }
    }
}

impl DeclarationFile for ErrorFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        let name = &self.declaration.name.name.pascal_case;
        ctx.reserve(name);

        let params = match &self.declaration.type_ {
            Some(body) => format!("public readonly body: {}", parsed_type(ctx, body)),
            None => String::new(),
        };
        let constructor = vec![
            CodeFragment::line(format!(
                "super({});",
                string_literal(&self.declaration.discriminant_value.wire_value)
            )),
            CodeFragment::line(format!("Object.setPrototypeOf(this, {name}.prototype);")),
        ];

        let class = Class::new(name.as_str())
            .doc(self.declaration.docs.as_deref())
            .extends("Error")
            .field(format!(
                "public readonly statusCode = {};",
                self.declaration.status_code
            ))
            .constructor(&params, constructor);
        Ok(ctx.code_file().add(class))
    }
}

/// `serialization/<package>/errors/<Name>.ts`
///
/// Only primitive and container bodies need a schema of their own; for any
/// other error the file is left empty.
pub struct ErrorSchemaFile<'a> {
    declaration: &'a ErrorDeclaration,
}

impl<'a> ErrorSchemaFile<'a> {
    pub fn new(declaration: &'a ErrorDeclaration) -> Self {
        Self { declaration }
    }
}

impl DeclarationFile for ErrorSchemaFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        let Some(body) = self
            .declaration
            .type_
            .as_ref()
            .filter(|body| error_has_schema(body))
        else {
            return Ok(CodeFile::new());
        };

        let name = &self.declaration.name.name.pascal_case;
        ctx.reserve(name);
        let raw = raw_type(ctx, body);
        let parsed = parsed_type(ctx, body);
        let schema = zurg::schema_for(ctx, body, None)?;
        let core = ctx.core();

        let schema = Const::new(name.as_str(), schema).ty(format!(
            "{core}.serialization.Schema<{name}.Raw, {parsed}>"
        ));
        let namespace = Namespace::new(name.as_str()).member(TypeAlias::new("Raw", raw).private());
        Ok(ctx.code_file().add(schema).add(namespace))
    }
}
