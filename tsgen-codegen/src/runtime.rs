//! Runtime schemas for the types declared in an IR.
//!
//! Each type declaration gets one slot in a [`SchemaTable`], indexed in IR
//! order. Named references compile to [`tsgen_schema::TableRef`] lookups,
//! so recursive and mutually recursive types need no special handling at
//! build time.

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tsgen_ir::{
    ContainerType, DeclaredTypeName, IntermediateRepresentation, ObjectProperty, PrimitiveType,
    SingleUnionTypeProperties, TypeDeclaration, TypeReference, TypeShape,
};
use tsgen_schema::{
    DynSchema, MaybeValid, ObjectSchema, Schema, SchemaExt, SchemaOptions, SchemaTable, boolean,
    date, discriminant, enum_, list, literal, number, object, optional, property, record,
    set, string, undiscriminated_union, union, unknown,
};

use crate::GenerationError;

/// Schemas for every type declaration of an IR.
pub struct RuntimeSchemas {
    table: Arc<SchemaTable>,
    by_id: HashMap<String, usize>,
}

impl std::fmt::Debug for RuntimeSchemas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeSchemas")
            .field("types", &self.table.len())
            .finish()
    }
}

impl RuntimeSchemas {
    pub fn from_ir(ir: &IntermediateRepresentation) -> Result<Self, GenerationError> {
        let table = SchemaTable::new(ir.types.iter().map(|t| t.name.type_id.clone()));
        let mut by_id = HashMap::with_capacity(ir.types.len());
        for (index, declaration) in ir.types.iter().enumerate() {
            let type_id = &declaration.name.type_id;
            if by_id.insert(type_id.clone(), index).is_some() {
                return Err(GenerationError::DuplicateType {
                    type_id: type_id.clone(),
                });
            }
        }
        let builder = Builder {
            ir,
            table: &table,
            by_id: &by_id,
        };

        for (index, declaration) in ir.types.iter().enumerate() {
            table.define(index, builder.declaration(declaration)?)?;
        }

        Ok(Self { table, by_id })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Schema of a declared type.
    pub fn schema(&self, name: &DeclaredTypeName) -> Option<DynSchema> {
        let index = *self.by_id.get(&name.type_id)?;
        Some(self.table.reference(index).into_dyn())
    }

    /// Parse `raw` as the declared type `name`.
    pub fn parse(
        &self,
        name: &DeclaredTypeName,
        raw: &Value,
        options: &SchemaOptions,
    ) -> Result<MaybeValid<Value>, GenerationError> {
        let schema = self.schema(name).ok_or_else(|| GenerationError::UnresolvedType {
            type_id: name.type_id.clone(),
        })?;
        Ok(schema.parse(raw, options))
    }
}

struct Builder<'a> {
    ir: &'a IntermediateRepresentation,
    table: &'a Arc<SchemaTable>,
    by_id: &'a HashMap<String, usize>,
}

impl Builder<'_> {
    fn declaration(&self, declaration: &TypeDeclaration) -> Result<DynSchema, GenerationError> {
        Ok(match &declaration.shape {
            TypeShape::Alias { alias_of } => self.reference(alias_of)?,
            TypeShape::Enum { values } => {
                enum_(values.iter().map(|v| v.name.wire_value.clone())).into_dyn()
            }
            TypeShape::Object { .. } => self.object(declaration, &mut Vec::new())?.into_dyn(),
            TypeShape::Union {
                discriminant: key,
                extends,
                base_properties,
                types,
            } => {
                let mut visiting = vec![declaration.name.type_id.clone()];
                let base = self.extended(extends, base_properties, &mut visiting)?;
                let mut schema = union(discriminant(
                    key.name.camel_case.clone(),
                    key.wire_value.clone(),
                ));
                for member in types {
                    let body = match &member.shape {
                        SingleUnionTypeProperties::SamePropertiesAsObject(name) => {
                            let target = self.lookup(name)?;
                            self.object(target, &mut Vec::new())?
                        }
                        SingleUnionTypeProperties::SingleProperty(single) => object([property(
                            single.name.name.camel_case.clone(),
                            single.name.wire_value.clone(),
                            self.reference(&single.type_)?,
                        )]),
                        SingleUnionTypeProperties::NoProperties => object([]),
                    };
                    schema = schema.member(
                        member.discriminant_value.wire_value.clone(),
                        body.extend(&base),
                    );
                }
                schema.into_dyn()
            }
            TypeShape::UndiscriminatedUnion { members } => undiscriminated_union(
                members
                    .iter()
                    .map(|member| self.reference(&member.type_))
                    .collect::<Result<Vec<_>, _>>()?,
            )
            .into_dyn(),
        })
    }

    /// Object schema of `declaration`, including everything it extends.
    ///
    /// `visiting` guards against `extends` cycles.
    fn object(
        &self,
        declaration: &TypeDeclaration,
        visiting: &mut Vec<String>,
    ) -> Result<ObjectSchema, GenerationError> {
        let TypeShape::Object {
            extends,
            properties,
        } = &declaration.shape
        else {
            return Err(GenerationError::UnresolvedType {
                type_id: declaration.name.type_id.clone(),
            });
        };
        if visiting.contains(&declaration.name.type_id) {
            return Err(GenerationError::AliasCycle {
                type_id: declaration.name.type_id.clone(),
            });
        }
        visiting.push(declaration.name.type_id.clone());
        let schema = self.extended(extends, properties, visiting)?;
        visiting.pop();
        Ok(schema)
    }

    fn extended(
        &self,
        extends: &[DeclaredTypeName],
        properties: &[ObjectProperty],
        visiting: &mut Vec<String>,
    ) -> Result<ObjectSchema, GenerationError> {
        let mut schema = object([]);
        for parent in extends {
            let parent = self.object(self.lookup(parent)?, visiting)?;
            schema = schema.extend(&parent);
        }
        let own = properties
            .iter()
            .map(|p| {
                Ok(property(
                    p.name.name.camel_case.clone(),
                    p.name.wire_value.clone(),
                    self.reference(&p.value_type)?,
                ))
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;
        Ok(schema.extend(&object(own)))
    }

    fn lookup(&self, name: &DeclaredTypeName) -> Result<&TypeDeclaration, GenerationError> {
        self.index(name).map(|index| &self.ir.types[index])
    }

    fn index(&self, name: &DeclaredTypeName) -> Result<usize, GenerationError> {
        self.by_id
            .get(&name.type_id)
            .copied()
            .ok_or_else(|| GenerationError::UnresolvedType {
                type_id: name.type_id.clone(),
            })
    }

    fn reference(&self, reference: &TypeReference) -> Result<DynSchema, GenerationError> {
        Ok(match reference {
            TypeReference::Named(name) => self.table.reference(self.index(name)?).into_dyn(),
            TypeReference::Primitive { primitive } => primitive_schema(*primitive),
            TypeReference::Container { container } => match container {
                ContainerType::List { item_type } => list(self.reference(item_type)?).into_dyn(),
                ContainerType::Set { item_type } => set(self.reference(item_type)?).into_dyn(),
                ContainerType::Optional { item_type } => {
                    optional(self.reference(item_type)?).into_dyn()
                }
                ContainerType::Map {
                    key_type,
                    value_type,
                } => record(self.reference(key_type)?, self.reference(value_type)?).into_dyn(),
                ContainerType::Literal { value } => literal(value.as_str()).into_dyn(),
            },
            TypeReference::Unknown => unknown().into_dyn(),
        })
    }
}

fn primitive_schema(primitive: PrimitiveType) -> DynSchema {
    match primitive {
        PrimitiveType::Integer | PrimitiveType::Double | PrimitiveType::Long => number().into_dyn(),
        PrimitiveType::Boolean => boolean().into_dyn(),
        PrimitiveType::DateTime => date().into_dyn(),
        PrimitiveType::String
        | PrimitiveType::Date
        | PrimitiveType::Uuid
        | PrimitiveType::Base64 => string().into_dyn(),
    }
}
