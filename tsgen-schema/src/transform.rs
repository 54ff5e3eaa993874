use std::sync::Arc;

use crate::{
    error::MaybeValid,
    schema::{Schema, SchemaOptions},
};

/// Runs `schema` and then `transformer` on parse, and the reverse on json.
#[derive(Debug, Clone)]
pub struct Transform<S, T> {
    schema: S,
    transformer: T,
}

impl<S, T> Transform<S, T> {
    pub fn new(schema: S, transformer: T) -> Self {
        Self {
            schema,
            transformer,
        }
    }
}

pub fn transform<S, T>(schema: S, transformer: T) -> Transform<S, T>
where
    S: Schema,
    T: Schema<Raw = S::Parsed>,
{
    Transform::new(schema, transformer)
}

impl<S, T> Schema for Transform<S, T>
where
    S: Schema,
    T: Schema<Raw = S::Parsed>,
{
    type Raw = S::Raw;
    type Parsed = T::Parsed;

    fn parse(&self, raw: &Self::Raw, opts: &SchemaOptions) -> MaybeValid<Self::Parsed> {
        let intermediate = self.schema.parse(raw, opts)?;
        self.transformer.parse(&intermediate, opts)
    }

    fn json(&self, parsed: &Self::Parsed, opts: &SchemaOptions) -> MaybeValid<Self::Raw> {
        let intermediate = self.transformer.json(parsed, opts)?;
        self.schema.json(&intermediate, opts)
    }

    fn is_optional(&self) -> bool {
        self.schema.is_optional()
    }
}

type Direction<A, B> = Arc<dyn Fn(&A, &SchemaOptions) -> MaybeValid<B> + Send + Sync>;

/// A schema defined by a pair of closures.
pub struct FnTransformer<A, B> {
    parse: Direction<A, B>,
    json: Direction<B, A>,
}

impl<A, B> Clone for FnTransformer<A, B> {
    fn clone(&self) -> Self {
        Self {
            parse: Arc::clone(&self.parse),
            json: Arc::clone(&self.json),
        }
    }
}

pub fn transformer<A, B>(
    parse: impl Fn(&A, &SchemaOptions) -> MaybeValid<B> + Send + Sync + 'static,
    json: impl Fn(&B, &SchemaOptions) -> MaybeValid<A> + Send + Sync + 'static,
) -> FnTransformer<A, B> {
    FnTransformer {
        parse: Arc::new(parse),
        json: Arc::new(json),
    }
}

impl<A, B> Schema for FnTransformer<A, B> {
    type Raw = A;
    type Parsed = B;

    fn parse(&self, raw: &A, opts: &SchemaOptions) -> MaybeValid<B> {
        (self.parse)(raw, opts)
    }

    fn json(&self, parsed: &B, opts: &SchemaOptions) -> MaybeValid<A> {
        (self.json)(parsed, opts)
    }
}
