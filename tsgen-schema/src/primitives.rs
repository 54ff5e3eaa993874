use chrono::DateTime;
use serde_json::Value;

use crate::{
    error::{MaybeValid, SchemaError},
    schema::{Schema, SchemaOptions},
    value::type_mismatch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Any,
    Unknown,
}

/// Type-checks a JSON scalar without changing it.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveSchema {
    kind: PrimitiveKind,
}

impl PrimitiveSchema {
    fn check(&self, value: &Value) -> MaybeValid<Value> {
        let (ok, expected) = match self.kind {
            PrimitiveKind::String => (value.is_string(), "string"),
            PrimitiveKind::Number => (value.is_number(), "number"),
            PrimitiveKind::Boolean => (value.is_boolean(), "boolean"),
            PrimitiveKind::Any | PrimitiveKind::Unknown => (true, ""),
        };
        if ok {
            Ok(value.clone())
        } else {
            Err(SchemaError::root(type_mismatch(expected, value)))
        }
    }
}

impl Schema for PrimitiveSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, _opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(raw)
    }

    fn json(&self, parsed: &Value, _opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(parsed)
    }

    fn is_optional(&self) -> bool {
        matches!(self.kind, PrimitiveKind::Any | PrimitiveKind::Unknown)
    }
}

pub fn string() -> PrimitiveSchema {
    PrimitiveSchema {
        kind: PrimitiveKind::String,
    }
}

pub fn number() -> PrimitiveSchema {
    PrimitiveSchema {
        kind: PrimitiveKind::Number,
    }
}

pub fn boolean() -> PrimitiveSchema {
    PrimitiveSchema {
        kind: PrimitiveKind::Boolean,
    }
}

/// Accepts every value, including absent ones.
pub fn any() -> PrimitiveSchema {
    PrimitiveSchema {
        kind: PrimitiveKind::Any,
    }
}

/// Like [`any`]; kept distinct so generated code can mirror the IR.
pub fn unknown() -> PrimitiveSchema {
    PrimitiveSchema {
        kind: PrimitiveKind::Unknown,
    }
}

/// Accepts exactly one JSON value.
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    value: Value,
}

pub fn literal(value: impl Into<Value>) -> LiteralSchema {
    LiteralSchema {
        value: value.into(),
    }
}

impl LiteralSchema {
    fn check(&self, value: &Value) -> MaybeValid<Value> {
        if *value == self.value {
            Ok(value.clone())
        } else {
            Err(SchemaError::root(format!("Expected {}", self.value)))
        }
    }
}

impl Schema for LiteralSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, _opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(raw)
    }

    fn json(&self, parsed: &Value, _opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(parsed)
    }
}

/// A closed set of string values.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    values: Vec<String>,
}

pub fn enum_<I, S>(values: I) -> EnumSchema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumSchema {
        values: values.into_iter().map(Into::into).collect(),
    }
}

impl EnumSchema {
    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn check(&self, value: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        let Some(text) = value.as_str() else {
            return Err(SchemaError::root(type_mismatch("enum", value)));
        };
        if opts.allow_unrecognized_enum_values || self.values.iter().any(|v| v == text) {
            Ok(value.clone())
        } else {
            Err(SchemaError::root(format!(
                "Expected enum. Received \"{text}\"."
            )))
        }
    }
}

impl Schema for EnumSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(raw, opts)
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(parsed, opts)
    }
}

/// An RFC 3339 date-time string. The text is validated but kept as-is.
#[derive(Debug, Clone, Copy)]
pub struct DateSchema;

pub fn date() -> DateSchema {
    DateSchema
}

impl DateSchema {
    fn check(&self, value: &Value) -> MaybeValid<Value> {
        let Some(text) = value.as_str() else {
            return Err(SchemaError::root(type_mismatch("date-time string", value)));
        };
        DateTime::parse_from_rfc3339(text)
            .map(|_| value.clone())
            .map_err(|_| {
                SchemaError::root(format!("Expected ISO 8601 date-time. Received \"{text}\"."))
            })
    }
}

impl Schema for DateSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, _opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(raw)
    }

    fn json(&self, parsed: &Value, _opts: &SchemaOptions) -> MaybeValid<Value> {
        self.check(parsed)
    }
}
