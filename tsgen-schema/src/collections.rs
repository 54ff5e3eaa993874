use serde_json::{Map, Value};

use crate::{
    error::{Collector, MaybeValid, SchemaError, ValidationError},
    schema::{DynSchema, Schema, SchemaExt, SchemaOptions},
    value::type_mismatch,
};

/// A JSON array whose items all match one schema.
#[derive(Clone)]
pub struct ListSchema {
    item: DynSchema,
    unique: bool,
}

pub fn list(item: impl Schema<Raw = Value, Parsed = Value> + 'static) -> ListSchema {
    ListSchema {
        item: item.into_dyn(),
        unique: false,
    }
}

/// Like [`list`], but rejects repeated items.
pub fn set(item: impl Schema<Raw = Value, Parsed = Value> + 'static) -> ListSchema {
    ListSchema {
        item: item.into_dyn(),
        unique: true,
    }
}

impl ListSchema {
    fn map_items(
        &self,
        value: &Value,
        convert: impl Fn(&DynSchema, &Value) -> MaybeValid<Value>,
    ) -> MaybeValid<Value> {
        let expected = if self.unique { "set" } else { "list" };
        let Some(items) = value.as_array() else {
            return Err(SchemaError::root(type_mismatch(expected, value)));
        };

        let mut collector = Collector::default();
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let segment = index.to_string();
            if self.unique && items[..index].contains(item) {
                collector.push(ValidationError::at(&segment, "Duplicate item in set"));
                continue;
            }
            if let Some(converted) = collector.absorb(convert(&self.item, item), Some(&segment))? {
                out.push(converted);
            }
        }
        collector.finish(Value::Array(out))
    }
}

impl Schema for ListSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.map_items(raw, |item, value| item.parse(value, opts))
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.map_items(parsed, |item, value| item.json(value, opts))
    }
}

/// A JSON object used as a map from string keys to values.
#[derive(Clone)]
pub struct RecordSchema {
    key: DynSchema,
    value: DynSchema,
}

pub fn record(
    key: impl Schema<Raw = Value, Parsed = Value> + 'static,
    value: impl Schema<Raw = Value, Parsed = Value> + 'static,
) -> RecordSchema {
    RecordSchema {
        key: key.into_dyn(),
        value: value.into_dyn(),
    }
}

impl RecordSchema {
    fn map_entries(
        &self,
        input: &Value,
        convert: impl Fn(&DynSchema, &Value) -> MaybeValid<Value>,
    ) -> MaybeValid<Value> {
        let Some(entries) = input.as_object() else {
            return Err(SchemaError::root(type_mismatch("object", input)));
        };

        let mut collector = Collector::default();
        let mut out = Map::new();
        for (key, value) in entries {
            let converted_key =
                collector.absorb(convert(&self.key, &Value::String(key.clone())), Some(key))?;
            let converted_value = collector.absorb(convert(&self.value, value), Some(key))?;
            match (converted_key, converted_value) {
                (Some(Value::String(k)), Some(v)) => {
                    out.insert(k, v);
                }
                (Some(other), _) if !other.is_string() => {
                    collector.push(ValidationError::at(key, "Record keys must be strings"));
                }
                _ => {}
            }
        }
        collector.finish(Value::Object(out))
    }
}

impl Schema for RecordSchema {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.map_entries(raw, |schema, value| schema.parse(value, opts))
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.map_entries(parsed, |schema, value| schema.json(value, opts))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{number, string};

    #[test]
    fn test_list_reports_every_bad_index() {
        let err = list(string())
            .parse(&json!(["a", 1, "b", false]), &SchemaOptions::default())
            .unwrap_err();
        let paths: Vec<_> = err
            .validation_errors()
            .iter()
            .map(|e| e.path.join("."))
            .collect();
        assert_eq!(paths, vec!["1", "3"]);
    }

    #[test]
    fn test_list_rejects_non_array() {
        let err = list(string()).parse(&json!("a"), &SchemaOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "Expected list. Received string.");
    }

    #[test]
    fn test_set_rejects_duplicates() {
        let schema = set(number());
        let opts = SchemaOptions::default();
        assert_eq!(schema.parse(&json!([1, 2]), &opts).unwrap(), json!([1, 2]));
        let err = schema.parse(&json!([1, 2, 1]), &opts).unwrap_err();
        assert_eq!(err.to_string(), "2: Duplicate item in set");
    }

    #[test]
    fn test_record() {
        let schema = record(string(), number());
        let opts = SchemaOptions::default();
        let raw = json!({ "apples": 3, "pears": 4 });
        assert_eq!(schema.parse(&raw, &opts).unwrap(), raw);

        let err = schema.parse(&json!({ "apples": "three" }), &opts).unwrap_err();
        assert_eq!(err.validation_errors()[0].path, vec!["apples"]);
    }
}
