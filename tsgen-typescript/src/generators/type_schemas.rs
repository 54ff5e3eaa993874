//! Runtime schemas of the serialization tree.

use tsgen_codegen::{GenerationError, builder::Renderable};
use tsgen_ir::{
    ObjectProperty, SingleUnionTypeProperties, TypeDeclaration, TypeShape,
};

use super::DeclarationFile;
use crate::{
    CodeFile,
    ast::{Const, Field, Interface, Namespace, TypeAlias, Union, string_literal},
    context::{FileContext, SchemaReferencing, TypeReferencing},
    type_reference::{raw_property, raw_type},
    zurg,
};

const RAW: &str = "Raw";
const BASE_INTERFACE: &str = "_Base";

/// `serialization/<package>/types/<Name>.ts`
///
/// Declares the schema as a const plus a namespace holding its `Raw` type.
pub struct TypeSchemaFile<'a> {
    declaration: &'a TypeDeclaration,
}

impl<'a> TypeSchemaFile<'a> {
    pub fn new(declaration: &'a TypeDeclaration) -> Self {
        Self { declaration }
    }

    fn name(&self) -> &str {
        &self.declaration.name.name.pascal_case
    }

    fn raw(&self) -> String {
        format!("{}.{RAW}", self.name())
    }
}

impl DeclarationFile for TypeSchemaFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        ctx.reserve(self.name());
        let owner = Some(&self.declaration.name);
        let parsed = ctx.reference_to_type(&self.declaration.name).expression;
        let mut namespace = Namespace::new(self.name());

        let (schema, schema_type) = match &self.declaration.shape {
            TypeShape::Alias { alias_of } => {
                namespace.push(TypeAlias::new(RAW, raw_type(ctx, alias_of)).private());
                (zurg::schema_for(ctx, alias_of, owner)?, "Schema")
            }
            TypeShape::Enum { values } => {
                let wire_values: Vec<&str> =
                    values.iter().map(|v| v.name.wire_value.as_str()).collect();
                namespace.push(
                    Union::new(RAW)
                        .private()
                        .variants(wire_values.iter().map(|v| string_literal(v))),
                );
                (zurg::enum_schema(ctx, &wire_values), "Schema")
            }
            TypeShape::Object {
                extends,
                properties,
            } => {
                let mut raw = Interface::new(RAW).private();
                let mut parents = Vec::with_capacity(extends.len());
                for parent in extends {
                    raw = raw.extends(ctx.reference_to_schema(parent).member(RAW).expression);
                    parents.push(zurg::named_schema(ctx, parent, owner)?);
                }
                namespace.push(raw.fields(raw_fields(ctx, properties)));
                let object = zurg::object_schema(ctx, properties, owner)?;
                (zurg::extend(object, &parents), "ObjectSchema")
            }
            TypeShape::Union {
                discriminant,
                extends,
                base_properties,
                types,
            } => {
                let has_base = !extends.is_empty() || !base_properties.is_empty();
                let mut members = Vec::with_capacity(types.len());
                let mut variants = Vec::with_capacity(types.len());
                for member in types {
                    let interface_name = &member.discriminant_value.name.pascal_case;
                    let mut raw = Interface::new(interface_name).private();
                    let schema = match &member.shape {
                        SingleUnionTypeProperties::SamePropertiesAsObject(object) => {
                            raw = raw.extends(
                                ctx.reference_to_schema(object).member(RAW).expression,
                            );
                            zurg::named_schema(ctx, object, owner)?
                        }
                        SingleUnionTypeProperties::SingleProperty(property) => {
                            let single = ObjectProperty::new(
                                property.name.clone(),
                                property.type_.clone(),
                            );
                            raw = raw.fields(raw_fields(ctx, std::slice::from_ref(&single)));
                            zurg::object_schema(ctx, std::slice::from_ref(&single), owner)?
                        }
                        SingleUnionTypeProperties::NoProperties => {
                            zurg::object_schema(ctx, &[], owner)?
                        }
                    };
                    if has_base {
                        raw = raw.extends(BASE_INTERFACE);
                    }
                    namespace.push(raw.field(
                        &discriminant.wire_value,
                        string_literal(&member.discriminant_value.wire_value),
                    ));
                    members.push((member.discriminant_value.wire_value.clone(), schema));
                    variants.push(format!("{}.{interface_name}", self.name()));
                }
                namespace.push(Union::new(RAW).private().variants(variants));

                let mut parents = Vec::new();
                if has_base {
                    let mut base = Interface::new(BASE_INTERFACE).private();
                    for parent in extends {
                        base = base.extends(ctx.reference_to_schema(parent).member(RAW).expression);
                        parents.push(zurg::named_schema(ctx, parent, owner)?);
                    }
                    namespace.push(base.fields(raw_fields(ctx, base_properties)));
                    if !base_properties.is_empty() {
                        parents.push(zurg::object_schema(ctx, base_properties, owner)?);
                    }
                }
                let union = zurg::union_schema(ctx, discriminant, &members);
                (zurg::extend(union, &parents), "Schema")
            }
            TypeShape::UndiscriminatedUnion { members } => {
                let mut schemas = Vec::with_capacity(members.len());
                let mut variants = Vec::with_capacity(members.len());
                for member in members {
                    schemas.push(zurg::schema_for(ctx, &member.type_, owner)?);
                    variants.push(raw_type(ctx, &member.type_));
                }
                namespace.push(Union::new(RAW).private().variants(variants));
                (zurg::undiscriminated_union_schema(ctx, &schemas), "Schema")
            }
        };

        let core = ctx.core();
        let schema = Const::new(self.name(), schema).ty(format!(
            "{core}.serialization.{schema_type}<{}, {parsed}>",
            self.raw()
        ));
        let body: Vec<Box<dyn Renderable>> = vec![Box::new(schema), Box::new(namespace)];
        Ok(ctx.code_file().add_all(body))
    }
}

fn raw_fields(ctx: &mut FileContext<'_>, properties: &[ObjectProperty]) -> Vec<Field> {
    properties
        .iter()
        .map(|property| {
            let (ty, optional) = raw_property(ctx, &property.value_type);
            Field::new(&property.name.wire_value, ty).optional_if(optional)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsgen_codegen::{GeneratorOptions, resolvers::Resolvers};
    use tsgen_ir::{
        DeclaredTypeName, IntermediateRepresentation, NameAndWireValue, PrimitiveType,
        SingleUnionType, SingleUnionTypeProperty, TypeReference, UndiscriminatedUnionMember,
    };

    use super::*;
    use crate::declaration_referencer::Referencers;

    fn generate(ir: IntermediateRepresentation, index: usize) -> String {
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let declaration = ir.types[index].clone();
        let referencers = Referencers::new(&ir.api_name, &options.namespace_export);
        let resolvers = Resolvers::new(Arc::new(ir));
        let path = format!(
            "serialization/zoo/types/{}.ts",
            declaration.name.name.pascal_case
        );
        let mut ctx = FileContext::new(path, &referencers, &resolvers, &options);
        TypeSchemaFile::new(&declaration)
            .generate(&mut ctx)
            .unwrap()
            .render()
    }

    #[test]
    fn test_object_schema_file() {
        let mut ir = IntermediateRepresentation::new("acme");
        ir.types.push(TypeDeclaration::new(
            DeclaredTypeName::new(&["zoo"], "Keeper"),
            TypeShape::Object {
                extends: Vec::new(),
                properties: vec![
                    ObjectProperty::new(NameAndWireValue::new("name"), TypeReference::string()),
                    ObjectProperty::new(
                        NameAndWireValue::new("hired_at"),
                        TypeReference::optional(TypeReference::primitive(PrimitiveType::DateTime)),
                    ),
                ],
            },
        ));

        insta::assert_snapshot!(generate(ir, 0), @r#"
        // This file was auto-generated by tsgen. Do not edit.

        import * as Acme from "../../../api";
        import * as core from "@tsgen/core";

        export const Keeper: core.serialization.ObjectSchema<Keeper.Raw, Acme.zoo.Keeper> = core.serialization.object({
          name: core.serialization.string(),
          hiredAt: core.serialization.property("hired_at", core.serialization.date().optional()),
        });

        export declare namespace Keeper {
          interface Raw {
            name: string;
            hired_at?: string | null;
          }
        }
        "#);
    }

    #[test]
    fn test_union_schema_file_defers_self_reference() {
        let expr = DeclaredTypeName::new(&["zoo"], "Expr");
        let mut ir = IntermediateRepresentation::new("acme");
        ir.types.push(TypeDeclaration::new(
            expr.clone(),
            TypeShape::Union {
                discriminant: NameAndWireValue::new("kind"),
                extends: Vec::new(),
                base_properties: Vec::new(),
                types: vec![
                    SingleUnionType::new(
                        "not",
                        SingleUnionTypeProperties::SingleProperty(SingleUnionTypeProperty {
                            name: NameAndWireValue::new("operand"),
                            type_: TypeReference::named(expr.clone()),
                        }),
                    ),
                    SingleUnionType::new("empty", SingleUnionTypeProperties::NoProperties),
                ],
            },
        ));

        let code = generate(ir, 0);
        assert!(code.contains(
            concat!(
                "export const Expr: core.serialization.Schema<Expr.Raw, Acme.zoo.Expr> = ",
                "core.serialization.union(\"kind\", {\n",
            )
        ));
        assert!(code.contains("    operand: core.serialization.lazy(() => Expr),\n"));
        assert!(code.contains("  empty: core.serialization.object({}),\n"));
        assert!(code.contains(
            "  interface Not {\n    operand: Expr.Raw;\n    kind: \"not\";\n  }\n"
        ));
        assert!(code.contains("  type Raw = Expr.Not | Expr.Empty;\n"));
    }

    #[test]
    fn test_undiscriminated_union_raw_type() {
        let mut ir = IntermediateRepresentation::new("acme");
        ir.types.push(TypeDeclaration::new(
            DeclaredTypeName::new(&["zoo"], "Tag"),
            TypeShape::UndiscriminatedUnion {
                members: vec![
                    UndiscriminatedUnionMember {
                        type_: TypeReference::string(),
                        docs: None,
                    },
                    UndiscriminatedUnionMember {
                        type_: TypeReference::list(TypeReference::string()),
                        docs: None,
                    },
                ],
            },
        ));

        let code = generate(ir, 0);
        assert!(code.contains("  type Raw = string | string[];\n"));
        assert!(code.contains(
            concat!(
                "core.serialization.undiscriminatedUnion([\n  core.serialization.string(),\n  ",
                "core.serialization.list(core.serialization.string()),\n]);\n",
            )
        ));
    }
}
