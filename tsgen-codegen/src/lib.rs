//! Shared code generation infrastructure for the tsgen SDK generator.
//!
//! This crate holds everything an emitter needs that is not specific to
//! one output language.
//!
//! # Module Organization
//!
//! - [`builder`] - Code building blocks (CodeBuilder, CodeFragment, Renderable)
//! - [`generation`] - Per-file import ledgers, the package-wide export ledger, file registry
//! - [`resolvers`] - Read-only lookups over the IR (types, errors, services)
//! - [`pipeline`] - Validation and analysis phases run before generation
//! - [`runtime`] - Runtime schemas built from IR type declarations
//! - [`language`] - The trait implemented by language emitters

pub mod builder;
mod error;
pub mod generation;
pub mod language;
mod options;
pub mod pipeline;
pub mod resolvers;
pub mod runtime;

pub use error::GenerationError;
pub use options::GeneratorOptions;
pub use tsgen_config::Target;
