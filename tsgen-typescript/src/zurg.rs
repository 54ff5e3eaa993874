//! Runtime schema expressions.
//!
//! Builds the `core.serialization.*` expressions that generated schema
//! files and clients use to convert between parsed values and raw JSON.
//! Multi-line expressions are indented two spaces per level.

use tsgen_codegen::GenerationError;
use tsgen_ir::{
    ContainerType, DeclaredTypeName, NameAndWireValue, ObjectProperty, PrimitiveType,
    ResolvedTypeReference, ShapeType, TypeReference,
};
use tsgen_schema::SchemaOptions;

use crate::{
    ast::{property_key, string_literal},
    context::SchemaReferencing,
};

/// Schema expression for `reference`.
///
/// `owner` is the declaration whose schema is being generated, if any.
/// References that lead back to it are wrapped in `lazy` so the schema
/// graph can be built before every node exists.
pub fn schema_for(
    ctx: &mut impl SchemaReferencing,
    reference: &TypeReference,
    owner: Option<&DeclaredTypeName>,
) -> Result<String, GenerationError> {
    let core = ctx.core();
    let expression = match reference {
        TypeReference::Named(name) => return named_schema(ctx, name, owner),
        TypeReference::Primitive { primitive } => {
            format!("{core}.serialization.{}()", primitive_schema(*primitive))
        }
        TypeReference::Container { container } => match container {
            ContainerType::List { item_type } => {
                format!("{core}.serialization.list({})", schema_for(ctx, item_type, owner)?)
            }
            ContainerType::Set { item_type } => {
                format!("{core}.serialization.set({})", schema_for(ctx, item_type, owner)?)
            }
            ContainerType::Optional { item_type } => {
                format!("{}.optional()", schema_for(ctx, item_type, owner)?)
            }
            ContainerType::Map {
                key_type,
                value_type,
            } => format!(
                "{core}.serialization.record({}, {})",
                schema_for(ctx, key_type, owner)?,
                schema_for(ctx, value_type, owner)?
            ),
            ContainerType::Literal { value } => {
                format!("{core}.serialization.stringLiteral({})", string_literal(value))
            }
        },
        TypeReference::Unknown => format!("{core}.serialization.unknown()"),
    };
    Ok(expression)
}

/// Schema expression for a declared type, deferred when it closes a cycle.
pub fn named_schema(
    ctx: &mut impl SchemaReferencing,
    name: &DeclaredTypeName,
    owner: Option<&DeclaredTypeName>,
) -> Result<String, GenerationError> {
    let reference = ctx.reference_to_schema(name);
    let Some(owner) = owner.filter(|owner| ctx.is_cyclic(owner, name)) else {
        return Ok(reference.expression);
    };
    let resolved = ctx.resolve_type(&TypeReference::Named(name.clone()))?;
    let core = ctx.core();
    let lazy = match resolved {
        ResolvedTypeReference::Named {
            shape: ShapeType::Object,
            ..
        } => "lazyObject",
        _ => "lazy",
    };
    tracing::trace!(from = %owner, to = %name, "Deferring cyclic schema reference");
    Ok(format!("{core}.serialization.{lazy}(() => {reference})"))
}

fn primitive_schema(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Integer | PrimitiveType::Double | PrimitiveType::Long => "number",
        PrimitiveType::Boolean => "boolean",
        PrimitiveType::DateTime => "date",
        PrimitiveType::String
        | PrimitiveType::Date
        | PrimitiveType::Uuid
        | PrimitiveType::Base64 => "string",
    }
}

/// `core.serialization.object({ ... })` over the given properties.
pub fn object_schema(
    ctx: &mut impl SchemaReferencing,
    properties: &[ObjectProperty],
    owner: Option<&DeclaredTypeName>,
) -> Result<String, GenerationError> {
    let mut entries = Vec::with_capacity(properties.len());
    for property in properties {
        let schema = schema_for(ctx, &property.value_type, owner)?;
        entries.push(property_entry(ctx, &property.name, schema));
    }
    let core = ctx.core();
    Ok(block(&format!("{core}.serialization.object({{"), &entries, "})"))
}

/// One object schema entry, renaming the key when parsed and wire names
/// differ.
pub fn property_entry(
    ctx: &mut impl SchemaReferencing,
    name: &NameAndWireValue,
    schema: String,
) -> String {
    let key = property_key(&name.name.camel_case);
    if name.name.camel_case == name.wire_value {
        format!("{key}: {schema}")
    } else {
        let core = ctx.core();
        format!(
            "{key}: {core}.serialization.property({}, {schema})",
            string_literal(&name.wire_value)
        )
    }
}

/// Chain `.extend(...)` calls for each parent schema.
pub fn extend(schema: String, parents: &[String]) -> String {
    parents
        .iter()
        .fold(schema, |schema, parent| format!("{schema}.extend({parent})"))
}

pub fn enum_schema(ctx: &mut impl SchemaReferencing, wire_values: &[&str]) -> String {
    let core = ctx.core();
    let values: Vec<String> = wire_values.iter().map(|v| string_literal(v)).collect();
    format!("{core}.serialization.enum_([{}])", values.join(", "))
}

/// A discriminated union keyed by the discriminant's wire value.
pub fn union_schema(
    ctx: &mut impl SchemaReferencing,
    discriminant: &NameAndWireValue,
    members: &[(String, String)],
) -> String {
    let core = ctx.core();
    let discriminant = if discriminant.name.camel_case == discriminant.wire_value {
        string_literal(&discriminant.wire_value)
    } else {
        format!(
            "{core}.serialization.discriminant({}, {})",
            string_literal(&discriminant.name.camel_case),
            string_literal(&discriminant.wire_value)
        )
    };
    let entries: Vec<String> = members
        .iter()
        .map(|(key, schema)| format!("{}: {schema}", property_key(key)))
        .collect();
    block(
        &format!("{core}.serialization.union({discriminant}, {{"),
        &entries,
        "})",
    )
}

pub fn undiscriminated_union_schema(
    ctx: &mut impl SchemaReferencing,
    members: &[String],
) -> String {
    let core = ctx.core();
    block(
        &format!("{core}.serialization.undiscriminatedUnion(["),
        members,
        "])",
    )
}

/// Options literal passed to `parseOrThrow`.
pub fn parse_options(options: &SchemaOptions) -> String {
    let keys = if options.skip_unknown_keys_on_parse {
        "passthrough"
    } else {
        "fail"
    };
    options_literal(keys, options)
}

/// Options literal passed to `jsonOrThrow`.
pub fn json_options(options: &SchemaOptions) -> String {
    let keys = if options.include_unknown_keys_on_json {
        "passthrough"
    } else {
        "strip"
    };
    options_literal(keys, options)
}

fn options_literal(unrecognized_object_keys: &str, options: &SchemaOptions) -> String {
    format!(
        "{{ unrecognizedObjectKeys: \"{unrecognized_object_keys}\", allowUnrecognizedUnionMembers: {}, allowUnrecognizedEnumValues: {} }}",
        options.allow_unrecognized_union_members, options.allow_unrecognized_enum_values
    )
}

/// `open`, one indented `entry,` per line, `close`. Empty entries stay on
/// one line.
pub fn block(open: &str, entries: &[String], close: &str) -> String {
    if entries.is_empty() {
        return format!("{open}{close}");
    }
    let mut out = String::from(open);
    for entry in entries {
        out.push_str("\n  ");
        out.push_str(&entry.replace('\n', "\n  "));
        out.push(',');
    }
    out.push('\n');
    out.push_str(close);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsgen_codegen::{GeneratorOptions, resolvers::Resolvers};
    use tsgen_ir::{IntermediateRepresentation, Name, TypeDeclaration, TypeShape};

    use super::*;
    use crate::{context::FileContext, declaration_referencer::Referencers};

    fn tree_ir() -> IntermediateRepresentation {
        let node = DeclaredTypeName::new(&["graph"], "Node");
        let mut ir = IntermediateRepresentation::new("acme");
        ir.types.push(TypeDeclaration::new(
            node.clone(),
            TypeShape::Object {
                extends: Vec::new(),
                properties: vec![
                    ObjectProperty::new(NameAndWireValue::new("label"), TypeReference::string()),
                    ObjectProperty::new(
                        NameAndWireValue::new("child_nodes"),
                        TypeReference::list(TypeReference::named(node)),
                    ),
                ],
            },
        ));
        ir
    }

    #[test]
    fn test_object_schema_renames_and_defers_cycles() {
        let ir = tree_ir();
        let node = ir.types[0].name.clone();
        let TypeShape::Object { properties, .. } = &ir.types[0].shape else {
            unreachable!()
        };
        let properties = properties.clone();
        let referencers = Referencers::new(&Name::new("acme"), "Acme");
        let resolvers = Resolvers::new(Arc::new(ir));
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let mut ctx = FileContext::new(
            "serialization/graph/types/Node.ts",
            &referencers,
            &resolvers,
            &options,
        );

        let schema = object_schema(&mut ctx, &properties, Some(&node)).unwrap();
        insta::assert_snapshot!(schema, @r#"
        core.serialization.object({
          label: core.serialization.string(),
          childNodes: core.serialization.property("child_nodes", core.serialization.list(core.serialization.lazyObject(() => Node))),
        })
        "#);

        let plain = schema_for(&mut ctx, &TypeReference::named(node), None).unwrap();
        assert_eq!(plain, "Node");
        assert_eq!(ctx.imports().len(), 1);
    }

    #[test]
    fn test_union_schema_nests_members() {
        let referencers = Referencers::new(&Name::new("acme"), "Acme");
        let resolvers = Resolvers::new(Arc::new(IntermediateRepresentation::new("acme")));
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let mut ctx =
            FileContext::new("serialization/types/Shape.ts", &referencers, &resolvers, &options);

        let circle = object_schema(
            &mut ctx,
            &[ObjectProperty::new(
                NameAndWireValue::new("radius"),
                TypeReference::primitive(PrimitiveType::Double),
            )],
            None,
        )
        .unwrap();
        let schema = union_schema(
            &mut ctx,
            &NameAndWireValue::renamed("_kind", "kind"),
            &[("circle".to_string(), circle)],
        );
        insta::assert_snapshot!(schema, @r#"
        core.serialization.union(core.serialization.discriminant("kind", "_kind"), {
          circle: core.serialization.object({
            radius: core.serialization.number(),
          }),
        })
        "#);
    }

    #[test]
    fn test_options_literals() {
        let options = SchemaOptions {
            skip_unknown_keys_on_parse: true,
            allow_unrecognized_enum_values: true,
            ..SchemaOptions::default()
        };
        assert_eq!(
            parse_options(&options),
            concat!(
                "{ unrecognizedObjectKeys: \"passthrough\", allowUnrecognizedUnionMembers: false, ",
                "allowUnrecognizedEnumValues: true }",
            )
        );
        assert!(json_options(&options).starts_with("{ unrecognizedObjectKeys: \"strip\""));
        assert_eq!(block("[", &[], "]"), "[]");
    }
}
