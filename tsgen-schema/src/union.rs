use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::{
    error::{MaybeValid, SchemaError, ValidationError},
    schema::{DynSchema, Schema, SchemaExt, SchemaOptions},
    value::type_mismatch,
};

/// The key that selects a union member, on each side of the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminant {
    pub parsed_key: String,
    pub raw_key: String,
}

pub fn discriminant(parsed_key: impl Into<String>, raw_key: impl Into<String>) -> Discriminant {
    Discriminant {
        parsed_key: parsed_key.into(),
        raw_key: raw_key.into(),
    }
}

impl From<&str> for Discriminant {
    fn from(key: &str) -> Self {
        discriminant(key, key)
    }
}

/// A parsed union value, tagged by whether its discriminant was declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedUnionMember {
    Known { discriminant: String, value: Value },
    Unrecognized { discriminant: String, value: Value },
}

impl ParsedUnionMember {
    pub fn discriminant(&self) -> &str {
        match self {
            ParsedUnionMember::Known { discriminant, .. }
            | ParsedUnionMember::Unrecognized { discriminant, .. } => discriminant,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ParsedUnionMember::Known { value, .. }
            | ParsedUnionMember::Unrecognized { value, .. } => value,
        }
    }
}

type Computed = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A discriminated union of object schemas.
#[derive(Clone)]
pub struct UnionSchema {
    discriminant: Discriminant,
    members: IndexMap<String, DynSchema>,
    computed: IndexMap<String, Computed>,
}

pub fn union(discriminant: impl Into<Discriminant>) -> UnionSchema {
    UnionSchema {
        discriminant: discriminant.into(),
        members: IndexMap::new(),
        computed: IndexMap::new(),
    }
}

impl UnionSchema {
    pub fn member(
        mut self,
        value: impl Into<String>,
        schema: impl Schema<Raw = Value, Parsed = Value> + 'static,
    ) -> Self {
        self.members.insert(value.into(), schema.into_dyn());
        self
    }

    /// Attach a key computed from the parsed value. It is removed again before serializing.
    pub fn with_parsed_property(
        mut self,
        key: impl Into<String>,
        compute: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.computed.insert(key.into(), Arc::new(compute));
        self
    }

    pub fn discriminant(&self) -> &Discriminant {
        &self.discriminant
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Parse and report whether the member was one of the declared ones.
    pub fn parse_member(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<ParsedUnionMember> {
        let raw_key = &self.discriminant.raw_key;
        let (tag, rest) = split_discriminant(raw, raw_key)?;

        let (value, known) = match self.members.get(&tag) {
            Some(schema) => {
                let parsed = schema.parse(&Value::Object(rest), opts)?;
                (self.tagged(&self.discriminant.parsed_key, &tag, parsed)?, true)
            }
            None if opts.allow_unrecognized_union_members => (
                self.tagged(&self.discriminant.parsed_key, &tag, Value::Object(rest))?,
                false,
            ),
            None => {
                return Err(SchemaError::Invalid(vec![ValidationError::at(
                    raw_key,
                    "Not one of the allowed values",
                )]));
            }
        };

        let value = self.add_computed(value);
        Ok(if known {
            ParsedUnionMember::Known {
                discriminant: tag,
                value,
            }
        } else {
            ParsedUnionMember::Unrecognized {
                discriminant: tag,
                value,
            }
        })
    }

    fn tagged(&self, key: &str, tag: &str, body: Value) -> MaybeValid<Value> {
        let Value::Object(body) = body else {
            return Err(SchemaError::root("Not an object"));
        };
        let mut out = Map::with_capacity(body.len() + 1);
        out.insert(key.to_string(), Value::String(tag.to_string()));
        out.extend(body.into_iter().filter(|(k, _)| k != key));
        Ok(Value::Object(out))
    }

    fn add_computed(&self, value: Value) -> Value {
        if self.computed.is_empty() {
            return value;
        }
        let computed: Vec<_> = self
            .computed
            .iter()
            .map(|(key, compute)| (key.clone(), compute(&value)))
            .collect();
        match value {
            Value::Object(mut map) => {
                map.extend(computed);
                Value::Object(map)
            }
            other => other,
        }
    }
}

fn split_discriminant(value: &Value, key: &str) -> MaybeValid<(String, Map<String, Value>)> {
    let Some(entries) = value.as_object() else {
        return Err(SchemaError::root("Not an object"));
    };
    let Some(tag) = entries.get(key) else {
        return Err(SchemaError::root(format!("Missing discriminant (\"{key}\")")));
    };
    let Some(tag) = tag.as_str() else {
        return Err(SchemaError::Invalid(vec![ValidationError::at(
            key,
            type_mismatch("string", tag),
        )]));
    };
    let rest = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok((tag.to_string(), rest))
}

impl Schema for UnionSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.parse_member(raw, opts).map(ParsedUnionMember::into_value)
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        let parsed_key = &self.discriminant.parsed_key;
        let (tag, mut rest) = split_discriminant(parsed, parsed_key)?;
        rest.retain(|key, _| !self.computed.contains_key(key));

        match self.members.get(&tag) {
            Some(schema) => {
                let raw = schema.json(&Value::Object(rest), opts)?;
                self.tagged(&self.discriminant.raw_key, &tag, raw)
            }
            None if opts.allow_unrecognized_union_members => {
                self.tagged(&self.discriminant.raw_key, &tag, Value::Object(rest))
            }
            None => Err(SchemaError::Invalid(vec![ValidationError::at(
                parsed_key,
                "Not one of the allowed values",
            )])),
        }
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use serde_json::json;

    use super::*;
    use crate::{boolean, object, prop, string};

    fn animal() -> UnionSchema {
        union(discriminant("type", "_type"))
            .member("lion", object([prop("meows", boolean())]))
            .member("tiger", object([prop("stripes", string())]))
    }

    fn outcome(schema: &UnionSchema, raw: Value, opts: SchemaOptions) -> String {
        serde_json::to_string(&schema.parse_outcome(&raw, &opts).unwrap()).unwrap()
    }

    #[test]
    fn test_discriminant_is_renamed() {
        let opts = SchemaOptions::default();
        let raw = json!({ "_type": "lion", "meows": true });
        let parsed = animal().parse(&raw, &opts).unwrap();
        assert_eq!(parsed, json!({ "type": "lion", "meows": true }));
        assert_eq!(animal().json(&parsed, &opts).unwrap(), raw);
    }

    #[test]
    fn test_error_messages() {
        let schema = union("type").member("lion", object([prop("meows", boolean())]));
        let opts = SchemaOptions::default();

        assert_snapshot!(
            outcome(&schema, json!([1]), opts),
            @r#"{"ok":false,"errors":[{"path":[],"message":"Not an object"}]}"#
        );
        assert_snapshot!(
            outcome(&schema, json!({ "meows": true }), opts),
            @r#"{"ok":false,"errors":[{"path":[],"message":"Missing discriminant (\"type\")"}]}"#
        );
        assert_snapshot!(
            outcome(&schema, json!({ "type": "bear" }), opts),
            @r#"
            {"ok":false,"errors":[{"path":["type"],"message":"Not one of the allowed values"}]}
            "#
        );
    }

    #[test]
    fn test_unrecognized_member_passes_through() {
        let opts = SchemaOptions {
            allow_unrecognized_union_members: true,
            ..Default::default()
        };
        let raw = json!({ "_type": "bear", "claws": 10, "nested": { "a": [1] } });
        let member = animal().parse_member(&raw, &opts).unwrap();
        assert_eq!(
            member,
            ParsedUnionMember::Unrecognized {
                discriminant: "bear".into(),
                value: json!({ "type": "bear", "claws": 10, "nested": { "a": [1] } }),
            }
        );
        assert_eq!(animal().json(&member.into_value(), &opts).unwrap(), raw);
    }

    #[test]
    fn test_member_keys_never_replace_the_discriminant() {
        let opts = SchemaOptions {
            skip_unknown_keys_on_parse: true,
            allow_unrecognized_union_members: true,
            ..Default::default()
        };
        let known = animal()
            .parse_member(&json!({ "_type": "lion", "type": "bear", "meows": true }), &opts)
            .unwrap();
        assert_eq!(
            known,
            ParsedUnionMember::Known {
                discriminant: "lion".into(),
                value: json!({ "type": "lion", "meows": true }),
            }
        );

        let unrecognized = animal()
            .parse(&json!({ "_type": "moose", "type": "elk" }), &opts)
            .unwrap();
        assert_eq!(unrecognized, json!({ "type": "moose" }));

        let strict = animal().parse(
            &json!({ "_type": "lion", "type": "bear", "meows": true }),
            &SchemaOptions::default(),
        );
        assert_eq!(
            strict.unwrap_err().to_string(),
            "type: Unexpected key \"type\""
        );
    }

    #[test]
    fn test_member_errors_keep_their_paths() {
        let err = animal()
            .parse(&json!({ "_type": "tiger", "stripes": 3 }), &SchemaOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "stripes: Expected string. Received number.");
    }

    #[test]
    fn test_parsed_properties_are_stripped_on_json() {
        let schema = animal().with_parsed_property("isLion", |value| {
            Value::Bool(value["type"] == "lion")
        });
        let opts = SchemaOptions::default();
        let raw = json!({ "_type": "lion", "meows": false });
        let parsed = schema.parse(&raw, &opts).unwrap();
        assert_eq!(parsed["isLion"], json!(true));
        assert_eq!(schema.json(&parsed, &opts).unwrap(), raw);
    }
}
