//! Composable parse/serialize schemas.
//!
//! A [`Schema`] converts a raw wire value into a parsed in-memory value
//! ([`Schema::parse`]) and back ([`Schema::json`]). The two directions are
//! approximate inverses: for any raw value a schema accepts,
//! `json(parse(raw))` gives back `raw`, except for unknown object keys that
//! were explicitly dropped.
//!
//! Schemas are plain values built from combinators:
//!
//! ```
//! use serde_json::json;
//! use tsgen_schema::{
//!     Schema, SchemaExt, SchemaOptions, boolean, discriminant, object, prop, union,
//! };
//!
//! let animal = union(discriminant("type", "_type"))
//!     .member("lion", object([prop("meows", boolean())]))
//!     .member("tiger", object([prop("stripes", boolean().optional())]));
//!
//! let opts = SchemaOptions::default();
//! let parsed = animal.parse(&json!({ "_type": "lion", "meows": true }), &opts).unwrap();
//! assert_eq!(parsed, json!({ "type": "lion", "meows": true }));
//! assert_eq!(animal.json(&parsed, &opts).unwrap(), json!({ "_type": "lion", "meows": true }));
//! ```
//!
//! Validation failures are collected rather than reported one at a time:
//! every [`ValidationError`] carries the key/index path from the root value.
//! Self-referential graphs are built either with [`lazy`] / [`lazy_object`]
//! or with a [`SchemaTable`] whose slots are filled after every schema that
//! refers to them has been constructed.

mod collections;
mod error;
mod lazy;
mod object;
mod optional;
mod primitives;
mod schema;
mod table;
mod transform;
mod undiscriminated;
mod union;
mod value;

pub use collections::{ListSchema, RecordSchema, list, record, set};
pub use error::{BuildError, MaybeValid, Outcome, SchemaError, ValidationError};
pub use lazy::{Lazy, LazyObject, lazy, lazy_object};
pub use object::{ObjectSchema, Property, object, prop, property};
pub use optional::{Nullish, Optional, optional};
pub use primitives::{
    DateSchema, EnumSchema, LiteralSchema, PrimitiveSchema, any, boolean, date, enum_, literal,
    number, string, unknown,
};
pub use schema::{DynSchema, Schema, SchemaExt, SchemaOptions};
pub use table::{SchemaTable, TableRef};
pub use transform::{FnTransformer, Transform, transform, transformer};
pub use undiscriminated::{UndiscriminatedUnionSchema, undiscriminated_union};
pub use union::{Discriminant, ParsedUnionMember, UnionSchema, discriminant, union};
