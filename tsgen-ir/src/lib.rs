//! Intermediate representation types for the tsgen SDK generator.
//!
//! The IR is the structured, language-agnostic description of an API that
//! the generator consumes. It is produced by an external tool and read here
//! from JSON; nothing in the generator mutates it.
//!
//! # Architecture
//!
//! ```text
//! ir.json → tsgen-ir (serde) → resolvers / referencers → TypeScript file tree
//! ```
//!
//! Every declaration is addressed by a declared name: a [`PackagePath`] of
//! namespace segments plus a terminal [`Name`], each carrying all the case
//! renderings the emitters need.

mod auth;
mod environment;
mod errors;
mod http;
mod ir;
mod name;
mod types;

pub use auth::{ApiAuth, AuthRequirement, AuthScheme};
pub use environment::{Environment, EnvironmentsConfig};
pub use errors::ErrorDeclaration;
pub use http::{
    HttpEndpoint, HttpHeader, HttpMethod, HttpPath, HttpPathPart, HttpRequestBody, HttpResponse,
    HttpService, PathParameter, QueryParameter, ResponseError,
};
pub use ir::{IntermediateRepresentation, IrError};
pub use name::{
    DeclaredErrorName, DeclaredServiceName, DeclaredTypeName, Name, NameAndWireValue, PackagePath,
};
pub use types::{
    ContainerType, EnumValue, ObjectProperty, PrimitiveType, ResolvedTypeReference, ShapeType,
    SingleUnionType, SingleUnionTypeProperties, SingleUnionTypeProperty, TypeDeclaration,
    TypeReference, TypeShape, UndiscriminatedUnionMember,
};
