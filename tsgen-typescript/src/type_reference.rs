//! Type references rendered as TypeScript type nodes and expressions.
//!
//! Every type reference has two TypeScript renderings: the parsed shape used
//! by the api tree, and the raw JSON shape used by schemas in the
//! serialization tree. They differ for date-times, sets and optionals.

use tsgen_codegen::GenerationError;
use tsgen_ir::{ContainerType, PrimitiveType, ResolvedTypeReference, ShapeType, TypeReference};

use crate::{
    ast::string_literal,
    context::{SchemaReferencing, TypeReferencing},
};

/// The parsed TypeScript type of `reference`.
pub fn parsed_type(ctx: &mut impl TypeReferencing, reference: &TypeReference) -> String {
    match reference {
        TypeReference::Named(name) => ctx.reference_to_type(name).expression,
        TypeReference::Primitive { primitive } => parsed_primitive(*primitive).to_string(),
        TypeReference::Container { container } => match container {
            ContainerType::List { item_type } => array_of(&parsed_type(ctx, item_type)),
            ContainerType::Set { item_type } => format!("Set<{}>", parsed_type(ctx, item_type)),
            ContainerType::Optional { item_type } => {
                format!("{} | undefined", parsed_type(ctx, item_type))
            }
            ContainerType::Map {
                key_type,
                value_type,
            } => format!(
                "Record<{}, {}>",
                parsed_type(ctx, key_type),
                parsed_type(ctx, value_type)
            ),
            ContainerType::Literal { value } => string_literal(value),
        },
        TypeReference::Unknown => "unknown".to_string(),
    }
}

/// The raw JSON TypeScript type of `reference`.
pub fn raw_type(ctx: &mut impl SchemaReferencing, reference: &TypeReference) -> String {
    match reference {
        TypeReference::Named(name) => ctx.reference_to_schema(name).member("Raw").expression,
        TypeReference::Primitive { primitive } => raw_primitive(*primitive).to_string(),
        TypeReference::Container { container } => match container {
            ContainerType::List { item_type } | ContainerType::Set { item_type } => {
                array_of(&raw_type(ctx, item_type))
            }
            ContainerType::Optional { item_type } => {
                format!("{} | null | undefined", raw_type(ctx, item_type))
            }
            ContainerType::Map {
                key_type,
                value_type,
            } => format!(
                "Record<{}, {}>",
                raw_type(ctx, key_type),
                raw_type(ctx, value_type)
            ),
            ContainerType::Literal { value } => string_literal(value),
        },
        TypeReference::Unknown => "unknown".to_string(),
    }
}

/// Parsed type of an object property, and whether the key is optional.
///
/// Optional properties drop the `| undefined` from their type in favor of
/// a `?` on the key.
pub fn parsed_property(
    ctx: &mut impl TypeReferencing,
    reference: &TypeReference,
) -> (String, bool) {
    match optional_item(reference) {
        Some(item) => (parsed_type(ctx, item), true),
        None => (parsed_type(ctx, reference), false),
    }
}

/// Raw type of an object property, and whether the key is optional.
pub fn raw_property(ctx: &mut impl SchemaReferencing, reference: &TypeReference) -> (String, bool) {
    match optional_item(reference) {
        Some(item) => (format!("{} | null", raw_type(ctx, item)), true),
        None => (raw_type(ctx, reference), false),
    }
}

fn optional_item(reference: &TypeReference) -> Option<&TypeReference> {
    match reference {
        TypeReference::Container {
            container: ContainerType::Optional { item_type },
        } => Some(item_type),
        _ => None,
    }
}

fn parsed_primitive(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Integer | PrimitiveType::Double | PrimitiveType::Long => "number",
        PrimitiveType::Boolean => "boolean",
        PrimitiveType::DateTime => "Date",
        PrimitiveType::String
        | PrimitiveType::Date
        | PrimitiveType::Uuid
        | PrimitiveType::Base64 => "string",
    }
}

fn raw_primitive(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::DateTime => "string",
        other => parsed_primitive(other),
    }
}

fn array_of(item: &str) -> String {
    if item.contains(" | ") {
        format!("({item})[]")
    } else {
        format!("{item}[]")
    }
}

/// A query parameter value converted to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringExpression {
    pub expression: String,
    /// Whether the value can be absent and must be guarded before use.
    pub is_nullable: bool,
}

/// Convert `value`, typed as `reference`, to the string sent in a query.
///
/// Strings and enums are sent as-is, numbers and booleans through
/// `toString`, date-times as ISO strings. Undiscriminated unions and
/// unknown values are sent as-is when they are strings and as JSON
/// otherwise; every other value is sent as JSON.
pub fn stringify_query_value(
    ctx: &impl TypeReferencing,
    reference: &TypeReference,
    value: &str,
) -> Result<StringExpression, GenerationError> {
    let (item, is_nullable) = match optional_item(reference) {
        Some(item) => (item, true),
        None => (reference, false),
    };
    let expression = match ctx.resolve_type(item)? {
        ResolvedTypeReference::Primitive(primitive) => {
            stringify_primitive(primitive, value, is_nullable)
        }
        ResolvedTypeReference::Container(ContainerType::Literal { .. }) => value.to_string(),
        ResolvedTypeReference::Container(ContainerType::Optional { item_type }) => {
            return stringify_query_value(ctx, &item_type, value).map(|inner| StringExpression {
                is_nullable: true,
                ..inner
            });
        }
        ResolvedTypeReference::Container(_) => json_stringify(value),
        ResolvedTypeReference::Named { shape, .. } => match shape {
            ShapeType::Enum => value.to_string(),
            ShapeType::UndiscriminatedUnion => json_stringify_if_not_string(value),
            ShapeType::Object | ShapeType::Union => json_stringify(value),
        },
        ResolvedTypeReference::Unknown => json_stringify_if_not_string(value),
    };
    Ok(StringExpression {
        expression,
        is_nullable,
    })
}

fn stringify_primitive(primitive: PrimitiveType, value: &str, optional: bool) -> String {
    let access = if optional { "?." } else { "." };
    match primitive {
        PrimitiveType::Integer
        | PrimitiveType::Double
        | PrimitiveType::Long
        | PrimitiveType::Boolean => format!("{value}{access}toString()"),
        PrimitiveType::DateTime => format!("{value}{access}toISOString()"),
        PrimitiveType::String
        | PrimitiveType::Date
        | PrimitiveType::Uuid
        | PrimitiveType::Base64 => value.to_string(),
    }
}

fn json_stringify(value: &str) -> String {
    format!("JSON.stringify({value})")
}

fn json_stringify_if_not_string(value: &str) -> String {
    format!("typeof {value} === \"string\" ? {value} : JSON.stringify({value})")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsgen_codegen::{GeneratorOptions, resolvers::Resolvers};
    use tsgen_ir::{
        DeclaredTypeName, EnumValue, IntermediateRepresentation, Name, TypeDeclaration, TypeShape,
        UndiscriminatedUnionMember,
    };

    use super::*;
    use crate::{context::FileContext, declaration_referencer::Referencers};

    fn fixture() -> (Referencers, Resolvers, GeneratorOptions) {
        let mut ir = IntermediateRepresentation::new("acme");
        ir.types.push(TypeDeclaration::new(
            DeclaredTypeName::new(&["imdb"], "Genre"),
            TypeShape::Enum {
                values: vec![EnumValue::new("drama"), EnumValue::new("comedy")],
            },
        ));
        ir.types.push(TypeDeclaration::new(
            DeclaredTypeName::new(&["imdb"], "MovieId"),
            TypeShape::UndiscriminatedUnion {
                members: vec![
                    UndiscriminatedUnionMember {
                        type_: TypeReference::string(),
                        docs: None,
                    },
                    UndiscriminatedUnionMember {
                        type_: TypeReference::primitive(PrimitiveType::Integer),
                        docs: None,
                    },
                ],
            },
        ));
        (
            Referencers::new(&Name::new("acme"), "Acme"),
            Resolvers::new(Arc::new(ir)),
            GeneratorOptions::new("@acme/sdk", "Acme"),
        )
    }

    #[test]
    fn test_parsed_and_raw_shapes_differ() {
        let (referencers, resolvers, options) = fixture();
        let mut ctx = FileContext::new(
            "serialization/imdb/types/Movie.ts",
            &referencers,
            &resolvers,
            &options,
        );
        let released = TypeReference::optional(TypeReference::set(TypeReference::primitive(
            PrimitiveType::DateTime,
        )));

        assert_eq!(parsed_type(&mut ctx, &released), "Set<Date> | undefined");
        assert_eq!(raw_type(&mut ctx, &released), "string[] | null | undefined");
        assert_eq!(
            raw_property(&mut ctx, &released),
            ("string[] | null".to_string(), true)
        );

        let genres = TypeReference::list(TypeReference::optional(TypeReference::named(
            DeclaredTypeName::new(&["imdb"], "Genre"),
        )));
        assert_eq!(parsed_type(&mut ctx, &genres), "(Acme.imdb.Genre | undefined)[]");
        assert_eq!(raw_type(&mut ctx, &genres), "(Genre.Raw | null | undefined)[]");
    }

    #[test]
    fn test_query_stringification() {
        let (referencers, resolvers, options) = fixture();
        let ctx = FileContext::new("api/imdb/client/Client.ts", &referencers, &resolvers, &options);
        let stringify = |reference: TypeReference| {
            stringify_query_value(&ctx, &reference, "limit").unwrap()
        };

        assert_eq!(
            stringify(TypeReference::primitive(PrimitiveType::Integer)).expression,
            "limit.toString()"
        );
        let optional_date = stringify(TypeReference::optional(TypeReference::primitive(
            PrimitiveType::DateTime,
        )));
        assert_eq!(optional_date.expression, "limit?.toISOString()");
        assert!(optional_date.is_nullable);
        assert_eq!(
            stringify(TypeReference::named(DeclaredTypeName::new(&["imdb"], "Genre"))).expression,
            "limit"
        );
        assert_eq!(
            stringify(TypeReference::named(DeclaredTypeName::new(&["imdb"], "MovieId"))).expression,
            "typeof limit === \"string\" ? limit : JSON.stringify(limit)"
        );
        assert_eq!(
            stringify(TypeReference::list(TypeReference::string())).expression,
            "JSON.stringify(limit)"
        );
    }
}
