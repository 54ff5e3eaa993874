//! Type declarations and type references.

use serde::{Deserialize, Serialize};

use crate::{DeclaredTypeName, NameAndWireValue};

/// A named type declared in the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub name: DeclaredTypeName,
    pub shape: TypeShape,
    #[serde(default)]
    pub docs: Option<String>,
    /// Example wire values, checked against the runtime schema before generation.
    #[serde(default)]
    pub examples: Vec<serde_json::Value>,
}

impl TypeDeclaration {
    pub fn new(name: DeclaredTypeName, shape: TypeShape) -> Self {
        Self {
            name,
            shape,
            docs: None,
            examples: Vec::new(),
        }
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.examples.push(example);
        self
    }
}

/// The shape of a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeShape {
    #[serde(rename_all = "camelCase")]
    Alias { alias_of: TypeReference },
    Enum { values: Vec<EnumValue> },
    #[serde(rename_all = "camelCase")]
    Object {
        #[serde(default)]
        extends: Vec<DeclaredTypeName>,
        properties: Vec<ObjectProperty>,
    },
    #[serde(rename_all = "camelCase")]
    Union {
        discriminant: NameAndWireValue,
        #[serde(default)]
        extends: Vec<DeclaredTypeName>,
        #[serde(default)]
        base_properties: Vec<ObjectProperty>,
        types: Vec<SingleUnionType>,
    },
    UndiscriminatedUnion {
        members: Vec<UndiscriminatedUnionMember>,
    },
}

impl TypeShape {
    pub fn shape_type(&self) -> Option<ShapeType> {
        match self {
            TypeShape::Alias { .. } => None,
            TypeShape::Enum { .. } => Some(ShapeType::Enum),
            TypeShape::Object { .. } => Some(ShapeType::Object),
            TypeShape::Union { .. } => Some(ShapeType::Union),
            TypeShape::UndiscriminatedUnion { .. } => Some(ShapeType::UndiscriminatedUnion),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: NameAndWireValue,
    #[serde(default)]
    pub docs: Option<String>,
}

impl EnumValue {
    pub fn new(wire_value: &str) -> Self {
        Self {
            name: NameAndWireValue::new(wire_value),
            docs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectProperty {
    pub name: NameAndWireValue,
    pub value_type: TypeReference,
    #[serde(default)]
    pub docs: Option<String>,
}

impl ObjectProperty {
    pub fn new(name: NameAndWireValue, value_type: TypeReference) -> Self {
        Self {
            name,
            value_type,
            docs: None,
        }
    }
}

/// One member of a discriminated union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleUnionType {
    pub discriminant_value: NameAndWireValue,
    pub shape: SingleUnionTypeProperties,
    #[serde(default)]
    pub docs: Option<String>,
}

impl SingleUnionType {
    pub fn new(discriminant_value: &str, shape: SingleUnionTypeProperties) -> Self {
        Self {
            discriminant_value: NameAndWireValue::new(discriminant_value),
            shape,
            docs: None,
        }
    }
}

/// Properties carried by a union member besides the discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "propertiesType", rename_all = "camelCase")]
pub enum SingleUnionTypeProperties {
    /// The member has the properties of another object type.
    SamePropertiesAsObject(DeclaredTypeName),
    /// The member wraps a single value under a named key.
    SingleProperty(SingleUnionTypeProperty),
    NoProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleUnionTypeProperty {
    pub name: NameAndWireValue,
    #[serde(rename = "type")]
    pub type_: TypeReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndiscriminatedUnionMember {
    #[serde(rename = "type")]
    pub type_: TypeReference,
    #[serde(default)]
    pub docs: Option<String>,
}

/// A reference to a type from a property, parameter or body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeReference {
    Named(DeclaredTypeName),
    Primitive { primitive: PrimitiveType },
    Container { container: ContainerType },
    Unknown,
}

impl TypeReference {
    pub fn named(name: DeclaredTypeName) -> Self {
        Self::Named(name)
    }

    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::Primitive { primitive }
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveType::String)
    }

    pub fn list(item_type: TypeReference) -> Self {
        Self::Container {
            container: ContainerType::List {
                item_type: Box::new(item_type),
            },
        }
    }

    pub fn set(item_type: TypeReference) -> Self {
        Self::Container {
            container: ContainerType::Set {
                item_type: Box::new(item_type),
            },
        }
    }

    pub fn optional(item_type: TypeReference) -> Self {
        Self::Container {
            container: ContainerType::Optional {
                item_type: Box::new(item_type),
            },
        }
    }

    pub fn map(key_type: TypeReference, value_type: TypeReference) -> Self {
        Self::Container {
            container: ContainerType::Map {
                key_type: Box::new(key_type),
                value_type: Box::new(value_type),
            },
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Container {
            container: ContainerType::Literal {
                value: value.into(),
            },
        }
    }

    /// Whether the reference is directly wrapped in `optional`.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            TypeReference::Container {
                container: ContainerType::Optional { .. }
            }
        )
    }

    /// Every declared name this reference mentions, in visit order.
    pub fn named_references(&self) -> Vec<&DeclaredTypeName> {
        let mut out = Vec::new();
        self.collect_named(&mut out);
        out
    }

    fn collect_named<'a>(&'a self, out: &mut Vec<&'a DeclaredTypeName>) {
        match self {
            TypeReference::Named(name) => out.push(name),
            TypeReference::Container { container } => match container {
                ContainerType::List { item_type }
                | ContainerType::Set { item_type }
                | ContainerType::Optional { item_type } => item_type.collect_named(out),
                ContainerType::Map {
                    key_type,
                    value_type,
                } => {
                    key_type.collect_named(out);
                    value_type.collect_named(out);
                }
                ContainerType::Literal { .. } => {}
            },
            TypeReference::Primitive { .. } | TypeReference::Unknown => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimitiveType {
    Integer,
    Double,
    Long,
    String,
    Boolean,
    DateTime,
    Date,
    Uuid,
    Base64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContainerType {
    #[serde(rename_all = "camelCase")]
    List { item_type: Box<TypeReference> },
    #[serde(rename_all = "camelCase")]
    Set { item_type: Box<TypeReference> },
    #[serde(rename_all = "camelCase")]
    Optional { item_type: Box<TypeReference> },
    #[serde(rename_all = "camelCase")]
    Map {
        key_type: Box<TypeReference>,
        value_type: Box<TypeReference>,
    },
    Literal { value: String },
}

/// Category of a declared type after following aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Enum,
    Object,
    Union,
    UndiscriminatedUnion,
}

/// A type reference with every alias followed to its concrete shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTypeReference {
    Primitive(PrimitiveType),
    Container(ContainerType),
    Named {
        name: DeclaredTypeName,
        shape: ShapeType,
    },
    Unknown,
}

impl ResolvedTypeReference {
    pub fn is_optional(&self) -> bool {
        matches!(self, ResolvedTypeReference::Container(ContainerType::Optional { .. }))
    }
}
