use serde_json::Value;

use crate::{
    error::MaybeValid,
    schema::{Schema, SchemaOptions},
};

/// Values that have an "absent" representation.
pub trait Nullish {
    fn is_nullish(&self) -> bool;
    fn nullish() -> Self;
}

impl Nullish for Value {
    fn is_nullish(&self) -> bool {
        self.is_null()
    }

    fn nullish() -> Self {
        Value::Null
    }
}

impl<T> Nullish for Option<T> {
    fn is_nullish(&self) -> bool {
        self.is_none()
    }

    fn nullish() -> Self {
        None
    }
}

/// Accepts absent values in both directions and otherwise defers to the inner schema.
#[derive(Debug, Clone)]
pub struct Optional<S> {
    inner: S,
}

impl<S> Optional<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Already optional; returns `self` unchanged.
    pub fn optional(self) -> Self {
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

pub fn optional<S>(inner: S) -> Optional<S>
where
    S: Schema,
    S::Raw: Nullish,
    S::Parsed: Nullish,
{
    Optional::new(inner)
}

impl<S> Schema for Optional<S>
where
    S: Schema,
    S::Raw: Nullish,
    S::Parsed: Nullish,
{
    type Raw = S::Raw;
    type Parsed = S::Parsed;

    fn parse(&self, raw: &Self::Raw, opts: &SchemaOptions) -> MaybeValid<Self::Parsed> {
        if raw.is_nullish() {
            return Ok(S::Parsed::nullish());
        }
        self.inner.parse(raw, opts)
    }

    fn json(&self, parsed: &Self::Parsed, opts: &SchemaOptions) -> MaybeValid<Self::Raw> {
        if parsed.is_nullish() {
            return Ok(S::Raw::nullish());
        }
        self.inner.json(parsed, opts)
    }

    fn is_optional(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{SchemaExt, string};

    #[test]
    fn test_null_passes_through() {
        let schema = string().optional();
        let opts = SchemaOptions::default();
        assert_eq!(schema.parse(&Value::Null, &opts).unwrap(), Value::Null);
        assert_eq!(schema.json(&Value::Null, &opts).unwrap(), Value::Null);
        assert_eq!(schema.parse(&json!("hi"), &opts).unwrap(), json!("hi"));
        assert!(schema.parse(&json!(1), &opts).is_err());
    }

    #[test]
    fn test_optional_is_idempotent() {
        let once = string().optional();
        let twice = string().optional().optional();
        let opts = SchemaOptions::default();
        for raw in [json!("a"), Value::Null, json!(3)] {
            assert_eq!(once.parse(&raw, &opts), twice.parse(&raw, &opts));
        }
        assert!(twice.is_optional());
    }
}
