use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::{
    error::{Collector, MaybeValid, SchemaError, ValidationError},
    optional::Optional,
    schema::{DynSchema, Schema, SchemaExt, SchemaOptions},
    value::type_mismatch,
};

/// One declared key of an object schema.
#[derive(Clone)]
pub struct Property {
    pub parsed_key: String,
    pub raw_key: String,
    pub schema: DynSchema,
}

/// A property whose wire key equals its parsed key.
pub fn prop(
    key: impl Into<String>,
    schema: impl Schema<Raw = Value, Parsed = Value> + 'static,
) -> Property {
    let key = key.into();
    Property {
        parsed_key: key.clone(),
        raw_key: key,
        schema: schema.into_dyn(),
    }
}

/// A property whose wire key differs from its parsed key.
pub fn property(
    parsed_key: impl Into<String>,
    raw_key: impl Into<String>,
    schema: impl Schema<Raw = Value, Parsed = Value> + 'static,
) -> Property {
    Property {
        parsed_key: parsed_key.into(),
        raw_key: raw_key.into(),
        schema: schema.into_dyn(),
    }
}

/// A JSON object with a fixed set of keys.
#[derive(Clone, Default)]
pub struct ObjectSchema {
    properties: IndexMap<String, Property>,
}

pub fn object(properties: impl IntoIterator<Item = Property>) -> ObjectSchema {
    let mut schema = ObjectSchema::default();
    for property in properties {
        schema.insert(property);
    }
    schema
}

impl ObjectSchema {
    fn insert(&mut self, property: Property) {
        self.properties.insert(property.parsed_key.clone(), property);
    }

    /// Declared properties keyed by parsed key, in declaration order.
    pub fn properties(&self) -> &IndexMap<String, Property> {
        &self.properties
    }

    /// Add `other`'s properties; on a shared key the later declaration wins.
    pub fn extend(mut self, other: &ObjectSchema) -> Self {
        for property in other.properties.values() {
            self.insert(property.clone());
        }
        self
    }

    /// Make every property optional.
    pub fn partial(self) -> Self {
        let properties = self
            .properties
            .into_iter()
            .map(|(key, property)| {
                let schema = Optional::new(property.schema).into_dyn();
                (key, Property { schema, ..property })
            })
            .collect();
        Self { properties }
    }

    fn convert(
        &self,
        input: &Value,
        direction: Direction,
        opts: &SchemaOptions,
    ) -> MaybeValid<Value> {
        let Some(entries) = input.as_object() else {
            return Err(SchemaError::root(type_mismatch("object", input)));
        };

        let mut collector = Collector::default();
        let mut out = Map::new();
        for property in self.properties.values() {
            let (from, to) = direction.keys(property);
            match entries.get(from) {
                Some(value) => {
                    let converted = match direction {
                        Direction::Parse => property.schema.parse(value, opts),
                        Direction::Json => property.schema.json(value, opts),
                    };
                    if let Some(converted) = collector.absorb(converted, Some(from))? {
                        out.insert(to.to_string(), converted);
                    }
                }
                None if property.schema.is_optional() => {}
                None => {
                    collector.push(ValidationError::root(format!(
                        "Missing required key \"{from}\""
                    )));
                }
            }
        }

        for (key, value) in entries {
            if self.declares(key, direction) {
                continue;
            }
            let passthrough = match direction {
                Direction::Parse if opts.skip_unknown_keys_on_parse => true,
                Direction::Parse => {
                    collector.push(ValidationError::at(key, format!("Unexpected key \"{key}\"")));
                    false
                }
                Direction::Json => opts.include_unknown_keys_on_json,
            };
            // A passed-through key never replaces a converted property.
            if passthrough && !self.produces(key, direction) {
                out.insert(key.clone(), value.clone());
            }
        }

        collector.finish(Value::Object(out))
    }

    /// Whether `key` is a declared property on the input side.
    fn declares(&self, key: &str, direction: Direction) -> bool {
        match direction {
            Direction::Parse => self.properties.values().any(|p| p.raw_key == key),
            Direction::Json => self.properties.contains_key(key),
        }
    }

    /// Whether `key` is a declared property on the output side.
    fn produces(&self, key: &str, direction: Direction) -> bool {
        match direction {
            Direction::Parse => self.properties.contains_key(key),
            Direction::Json => self.properties.values().any(|p| p.raw_key == key),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Parse,
    Json,
}

impl Direction {
    fn keys(self, property: &Property) -> (&str, &str) {
        match self {
            Direction::Parse => (&property.raw_key, &property.parsed_key),
            Direction::Json => (&property.parsed_key, &property.raw_key),
        }
    }
}

impl Schema for ObjectSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.convert(raw, Direction::Parse, opts)
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.convert(parsed, Direction::Json, opts)
    }
}
