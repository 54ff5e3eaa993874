use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{BuildError, MaybeValid, Outcome},
    optional::{Nullish, Optional},
    transform::Transform,
};

/// Knobs shared by every schema in a parse or json call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaOptions {
    /// Keep keys an object schema does not declare instead of rejecting them.
    pub skip_unknown_keys_on_parse: bool,
    /// Emit undeclared keys when serializing instead of dropping them.
    pub include_unknown_keys_on_json: bool,
    /// Pass through union members with an unknown discriminant.
    pub allow_unrecognized_union_members: bool,
    /// Accept enum wire values that are not declared.
    pub allow_unrecognized_enum_values: bool,
}

impl SchemaOptions {
    /// Options that accept anything a newer server might send.
    pub fn lenient() -> Self {
        Self {
            skip_unknown_keys_on_parse: true,
            include_unknown_keys_on_json: true,
            allow_unrecognized_union_members: true,
            allow_unrecognized_enum_values: true,
        }
    }
}

/// Bidirectional conversion between a raw wire value and its parsed form.
pub trait Schema: Send + Sync {
    type Raw;
    type Parsed;

    fn parse(&self, raw: &Self::Raw, opts: &SchemaOptions) -> MaybeValid<Self::Parsed>;

    fn json(&self, parsed: &Self::Parsed, opts: &SchemaOptions) -> MaybeValid<Self::Raw>;

    /// Whether a missing value is acceptable where this schema is used.
    fn is_optional(&self) -> bool {
        false
    }
}

/// Type-erased schema over JSON values.
pub type DynSchema = Arc<dyn Schema<Raw = Value, Parsed = Value>>;

impl<S: Schema + ?Sized> Schema for Arc<S> {
    type Raw = S::Raw;
    type Parsed = S::Parsed;

    fn parse(&self, raw: &Self::Raw, opts: &SchemaOptions) -> MaybeValid<Self::Parsed> {
        (**self).parse(raw, opts)
    }

    fn json(&self, parsed: &Self::Parsed, opts: &SchemaOptions) -> MaybeValid<Self::Raw> {
        (**self).json(parsed, opts)
    }

    fn is_optional(&self) -> bool {
        (**self).is_optional()
    }
}

/// Combinators available on every schema.
pub trait SchemaExt: Schema + Sized {
    fn optional(self) -> Optional<Self>
    where
        Self::Raw: Nullish,
        Self::Parsed: Nullish,
    {
        Optional::new(self)
    }

    fn transform<T>(self, transformer: T) -> Transform<Self, T>
    where
        T: Schema<Raw = Self::Parsed>,
    {
        Transform::new(self, transformer)
    }

    fn into_dyn(self) -> DynSchema
    where
        Self: Schema<Raw = Value, Parsed = Value> + 'static,
    {
        Arc::new(self)
    }

    /// Parse into the `{ ok, value | errors }` shape.
    fn parse_outcome(
        &self,
        raw: &Self::Raw,
        opts: &SchemaOptions,
    ) -> Result<Outcome<Self::Parsed>, BuildError> {
        Outcome::from_result(self.parse(raw, opts))
    }

    /// Serialize into the `{ ok, value | errors }` shape.
    fn json_outcome(
        &self,
        parsed: &Self::Parsed,
        opts: &SchemaOptions,
    ) -> Result<Outcome<Self::Raw>, BuildError> {
        Outcome::from_result(self.json(parsed, opts))
    }
}

impl<S: Schema> SchemaExt for S {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_deserialize_camel_case_with_defaults() {
        let opts: SchemaOptions =
            serde_json::from_str(r#"{ "allowUnrecognizedUnionMembers": true }"#).unwrap();
        assert!(opts.allow_unrecognized_union_members);
        assert!(!opts.skip_unknown_keys_on_parse);
    }
}
