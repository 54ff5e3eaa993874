use serde_json::Value;

use crate::{
    error::{MaybeValid, SchemaError},
    schema::{DynSchema, Schema, SchemaOptions},
};

/// Tries each member in declaration order; the first match wins.
#[derive(Clone)]
pub struct UndiscriminatedUnionSchema {
    members: Vec<DynSchema>,
}

pub fn undiscriminated_union(
    members: impl IntoIterator<Item = DynSchema>,
) -> UndiscriminatedUnionSchema {
    UndiscriminatedUnionSchema {
        members: members.into_iter().collect(),
    }
}

impl UndiscriminatedUnionSchema {
    fn first_match(
        &self,
        value: &Value,
        convert: impl Fn(&DynSchema) -> MaybeValid<Value>,
    ) -> MaybeValid<Value> {
        for member in &self.members {
            match convert(member) {
                Ok(converted) => return Ok(converted),
                Err(SchemaError::Build(err)) => return Err(err.into()),
                Err(SchemaError::Invalid(_)) => continue,
            }
        }
        Err(SchemaError::root(format!(
            "Expected one of {} union members; none matched a value of type {}",
            self.members.len(),
            crate::value::describe(value)
        )))
    }
}

impl Schema for UndiscriminatedUnionSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.first_match(raw, |member| member.parse(raw, opts))
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.first_match(parsed, |member| member.json(parsed, opts))
    }

    fn is_optional(&self) -> bool {
        self.members.iter().any(|member| member.is_optional())
    }
}
