//! Type declarations of the api tree.

use tsgen_codegen::{GenerationError, builder::Renderable};
use tsgen_ir::{
    NameAndWireValue, ObjectProperty, SingleUnionType, SingleUnionTypeProperties, TypeDeclaration,
    TypeShape,
};

use super::DeclarationFile;
use crate::{
    CodeFile,
    ast::{Const, Field, Interface, Namespace, TypeAlias, Union, property_key, string_literal},
    context::{FileContext, TypeReferencing},
    type_reference::{parsed_property, parsed_type},
    zurg::block,
};

const BASE_INTERFACE: &str = "_Base";
const UNKNOWN_MEMBER: &str = "_Unknown";
const VISITOR: &str = "_Visitor";

/// `api/<package>/types/<Name>.ts`
pub struct TypeFile<'a> {
    declaration: &'a TypeDeclaration,
}

impl<'a> TypeFile<'a> {
    pub fn new(declaration: &'a TypeDeclaration) -> Self {
        Self { declaration }
    }

    fn name(&self) -> &str {
        &self.declaration.name.name.pascal_case
    }

    fn docs(&self) -> Option<&str> {
        self.declaration.docs.as_deref()
    }
}

impl DeclarationFile for TypeFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        ctx.reserve(self.name());
        let mut body: Vec<Box<dyn Renderable>> = Vec::new();
        match &self.declaration.shape {
            TypeShape::Alias { alias_of } => {
                let ty = parsed_type(ctx, alias_of);
                body.push(Box::new(TypeAlias::new(self.name(), ty).doc(self.docs())));
            }
            TypeShape::Enum { values } => {
                let variants = values.iter().map(|value| string_literal(&value.name.wire_value));
                body.push(Box::new(Union::new(self.name()).doc(self.docs()).variants(variants)));
                let entries: Vec<String> = values
                    .iter()
                    .map(|value| {
                        format!(
                            "{}: {}",
                            property_key(&value.name.name.pascal_case),
                            string_literal(&value.name.wire_value)
                        )
                    })
                    .collect();
                body.push(Box::new(Const::new(
                    self.name(),
                    format!("{} as const", block("{", &entries, "}")),
                )));
            }
            TypeShape::Object {
                extends,
                properties,
            } => {
                let mut interface = Interface::new(self.name()).doc(self.docs());
                for parent in extends {
                    interface = interface.extends(ctx.reference_to_type(parent).expression);
                }
                interface = interface.fields(fields(ctx, properties));
                body.push(Box::new(interface));
            }
            TypeShape::Union {
                discriminant,
                extends,
                base_properties,
                types,
            } => {
                let union = UnionDeclaration {
                    name: self.name(),
                    discriminant,
                    has_base: !extends.is_empty() || !base_properties.is_empty(),
                    members: types,
                };
                body.push(Box::new(union.type_alias(ctx).doc(self.docs())));
                let mut namespace = union.namespace(ctx);
                if union.has_base {
                    let mut base = Interface::new(BASE_INTERFACE).private();
                    for parent in extends {
                        base = base.extends(ctx.reference_to_type(parent).expression);
                    }
                    namespace.push(base.fields(fields(ctx, base_properties)));
                }
                body.push(Box::new(namespace));
                if ctx.options().include_utils_on_union_members {
                    body.push(Box::new(union.builders(ctx)));
                }
            }
            TypeShape::UndiscriminatedUnion { members } => {
                let variants: Vec<String> = members
                    .iter()
                    .map(|member| parsed_type(ctx, &member.type_))
                    .collect();
                body.push(Box::new(Union::new(self.name()).doc(self.docs()).variants(variants)));
            }
        }
        Ok(ctx.code_file().add_all(body))
    }
}

fn fields(ctx: &mut FileContext<'_>, properties: &[ObjectProperty]) -> Vec<Field> {
    properties
        .iter()
        .map(|property| {
            let (ty, optional) = parsed_property(ctx, &property.value_type);
            Field::new(&property.name.name.camel_case, ty)
                .optional_if(optional)
                .doc(property.docs.as_deref())
        })
        .collect()
}

/// The parsed side of a discriminated union.
struct UnionDeclaration<'a> {
    name: &'a str,
    discriminant: &'a NameAndWireValue,
    has_base: bool,
    members: &'a [SingleUnionType],
}

impl UnionDeclaration<'_> {
    fn member(&self, interface: &str) -> String {
        format!("{}.{interface}", self.name)
    }

    fn discriminant_key(&self) -> String {
        property_key(&self.discriminant.name.camel_case)
    }

    fn type_alias(&self, ctx: &FileContext<'_>) -> Union {
        let mut variants: Vec<String> = self
            .members
            .iter()
            .map(|member| self.member(&member.discriminant_value.name.pascal_case))
            .collect();
        if ctx.options().include_other_in_union_types {
            variants.push(self.member(UNKNOWN_MEMBER));
        }
        Union::new(self.name).variants(variants)
    }

    fn namespace(&self, ctx: &mut FileContext<'_>) -> Namespace {
        let mut namespace = Namespace::new(self.name);
        for member in self.members {
            let mut interface =
                Interface::new(&member.discriminant_value.name.pascal_case).private();
            interface = interface.doc(member.docs.as_deref());
            match &member.shape {
                SingleUnionTypeProperties::SamePropertiesAsObject(object) => {
                    interface = interface.extends(ctx.reference_to_type(object).expression);
                }
                SingleUnionTypeProperties::SingleProperty(property) => {
                    let (ty, optional) = parsed_property(ctx, &property.type_);
                    let field = Field::new(&property.name.name.camel_case, ty);
                    interface = interface.field_with(field.optional_if(optional));
                }
                SingleUnionTypeProperties::NoProperties => {}
            }
            if self.has_base {
                interface = interface.extends(BASE_INTERFACE);
            }
            namespace.push(interface.field(
                &self.discriminant.name.camel_case,
                string_literal(&member.discriminant_value.wire_value),
            ));
        }
        if ctx.options().include_other_in_union_types {
            let mut unknown = Interface::new(UNKNOWN_MEMBER).private();
            if self.has_base {
                unknown = unknown.extends(BASE_INTERFACE);
            }
            namespace.push(unknown.field(&self.discriminant.name.camel_case, "void"));
        }
        if ctx.options().include_utils_on_union_members {
            namespace.push(self.visitor(ctx));
        }
        namespace
    }

    fn visitor(&self, ctx: &mut FileContext<'_>) -> Interface {
        let mut visitor = Interface::new(format!("{VISITOR}<_Result>")).private();
        for member in self.members {
            let key = &member.discriminant_value.name.camel_case;
            let signature = match self.member_value_type(ctx, member) {
                Some(ty) => format!("(value: {ty}) => _Result"),
                None => "() => _Result".to_string(),
            };
            visitor = visitor.field(key, signature);
        }
        visitor.field(
            "_other",
            format!(
                "(value: {{ {}: string }}) => _Result",
                self.discriminant_key()
            ),
        )
    }

    /// The value a visitor or builder receives for `member`.
    fn member_value_type(
        &self,
        ctx: &mut FileContext<'_>,
        member: &SingleUnionType,
    ) -> Option<String> {
        match &member.shape {
            SingleUnionTypeProperties::SamePropertiesAsObject(object) => {
                Some(ctx.reference_to_type(object).expression)
            }
            SingleUnionTypeProperties::SingleProperty(property) => {
                Some(parsed_type(ctx, &property.type_))
            }
            SingleUnionTypeProperties::NoProperties => None,
        }
    }

    /// `export const Name = { member builders..., _visit }`.
    fn builders(&self, ctx: &mut FileContext<'_>) -> Const {
        let discriminant = self.discriminant_key();
        let base_param = if self.has_base {
            format!(", base: {}", self.member(BASE_INTERFACE))
        } else {
            String::new()
        };
        let base_spread = if self.has_base { "...base, " } else { "" };

        let mut entries = Vec::new();
        let mut cases = Vec::new();
        for member in self.members {
            let key = &member.discriminant_value.name.camel_case;
            let wire = string_literal(&member.discriminant_value.wire_value);
            let interface = self.member(&member.discriminant_value.name.pascal_case);
            let value_type = self.member_value_type(ctx, member);
            let (params, properties, visit) = match (&member.shape, value_type) {
                (SingleUnionTypeProperties::SamePropertiesAsObject(_), Some(ty)) => (
                    format!("value: {ty}{base_param}"),
                    "...value, ".to_string(),
                    format!("visitor.{key}(value)"),
                ),
                (SingleUnionTypeProperties::SingleProperty(property), Some(ty)) => {
                    let field = property_key(&property.name.name.camel_case);
                    (
                        format!("value: {ty}{base_param}"),
                        format!("{field}: value, "),
                        format!("visitor.{key}(value.{})", property.name.name.camel_case),
                    )
                }
                _ => (
                    base_param.trim_start_matches(", ").to_string(),
                    String::new(),
                    format!("visitor.{key}()"),
                ),
            };
            entries.push(format!(
                "{}: ({params}): {interface} => ({{ {base_spread}{properties}{discriminant}: {wire} }})",
                property_key(key)
            ));
            cases.push(format!("    case {wire}:\n      return {visit};"));
        }

        let mut visit = vec![format!(
            "_visit: <_Result>(value: {}, visitor: {}<_Result>): _Result => {{",
            self.name,
            self.member(VISITOR)
        )];
        visit.push(format!("  switch (value.{discriminant}) {{"));
        for case in cases {
            visit.push(case);
        }
        visit.push("    default:".to_string());
        visit.push("      return visitor._other(value as any);".to_string());
        visit.push("  }".to_string());
        visit.push("}".to_string());
        entries.push(visit.join("\n"));

        Const::new(self.name, format!("{} as const", block("{", &entries, "}")))
    }
}
