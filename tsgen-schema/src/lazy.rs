use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    error::{BuildError, MaybeValid},
    object::{ObjectSchema, Property},
    schema::{Schema, SchemaOptions},
};

type Getter<S> = Arc<dyn Fn() -> Result<S, BuildError> + Send + Sync>;

/// Defers building a schema until it is first used.
///
/// A successfully built schema is memoized. A failed build is not, so the
/// next use calls the getter again.
pub struct Lazy<S> {
    getter: Getter<S>,
    resolved: OnceLock<S>,
}

pub fn lazy<S: Schema>(
    getter: impl Fn() -> Result<S, BuildError> + Send + Sync + 'static,
) -> Lazy<S> {
    Lazy {
        getter: Arc::new(getter),
        resolved: OnceLock::new(),
    }
}

impl<S> Lazy<S> {
    pub fn resolve(&self) -> Result<&S, BuildError> {
        if let Some(schema) = self.resolved.get() {
            return Ok(schema);
        }
        let built = (self.getter)()?;
        Ok(self.resolved.get_or_init(|| built))
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl<S: Schema> Schema for Lazy<S> {
    type Raw = S::Raw;
    type Parsed = S::Parsed;

    fn parse(&self, raw: &Self::Raw, opts: &SchemaOptions) -> MaybeValid<Self::Parsed> {
        self.resolve()?.parse(raw, opts)
    }

    fn json(&self, parsed: &Self::Parsed, opts: &SchemaOptions) -> MaybeValid<Self::Raw> {
        self.resolve()?.json(parsed, opts)
    }

    fn is_optional(&self) -> bool {
        self.resolve().is_ok_and(|schema| schema.is_optional())
    }
}

/// A lazy object schema that still exposes its properties for extension.
pub struct LazyObject {
    inner: Lazy<ObjectSchema>,
}

pub fn lazy_object(
    getter: impl Fn() -> Result<ObjectSchema, BuildError> + Send + Sync + 'static,
) -> LazyObject {
    LazyObject { inner: lazy(getter) }
}

impl LazyObject {
    pub fn properties(&self) -> Result<&IndexMap<String, Property>, BuildError> {
        self.inner.resolve().map(ObjectSchema::properties)
    }

    /// Materialize the object and extend it with `other`.
    pub fn extend(&self, other: &ObjectSchema) -> Result<ObjectSchema, BuildError> {
        Ok(self.inner.resolve()?.clone().extend(other))
    }
}

impl Schema for LazyObject {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.inner.parse(raw, opts)
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        self.inner.json(parsed, opts)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::{SchemaError, SchemaExt, list, object, prop, string};

    fn tree() -> ObjectSchema {
        object([
            prop("label", string()),
            prop("children", list(lazy(|| Ok(tree()))).optional()),
        ])
    }

    #[test]
    fn test_recursive_schema() {
        let raw = json!({
            "label": "root",
            "children": [{ "label": "leaf", "children": [{ "label": "deep" }] }]
        });
        let opts = SchemaOptions::default();
        assert_eq!(tree().parse(&raw, &opts).unwrap(), raw);

        let bad = json!({ "label": "root", "children": [{ "label": 1 }] });
        let err = tree().parse(&bad, &opts).unwrap_err();
        assert_eq!(err.validation_errors()[0].path, vec!["children", "0", "label"]);
    }

    #[test]
    fn test_getter_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(string())
        });

        let opts = SchemaOptions::default();
        assert!(!schema.is_resolved());
        schema.parse(&json!("a"), &opts).unwrap();
        schema.parse(&json!("b"), &opts).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_build_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = lazy(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(BuildError::Getter("not ready".into()))
            } else {
                Ok(string())
            }
        });

        let opts = SchemaOptions::default();
        assert_eq!(
            schema.parse(&json!("a"), &opts),
            Err(SchemaError::Build(BuildError::Getter("not ready".into())))
        );
        assert_eq!(schema.parse(&json!("a"), &opts).unwrap(), json!("a"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_lazy_object_exposes_properties() {
        let base = lazy_object(|| Ok(object([prop("id", string())])));
        let keys: Vec<_> = base.properties().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id"]);

        let extended = base.extend(&object([prop("name", string())])).unwrap();
        assert_eq!(extended.properties().len(), 2);
    }
}
