//! TypeScript emitter for the tsgen SDK generator.
//!
//! Turns a validated IR document into a TypeScript package: type
//! declarations and error classes under `api/`, runtime schemas under
//! `serialization/`, client classes, environments and the barrel files that
//! tie the tree together.
//!
//! # Usage
//!
//! ```ignore
//! use tsgen_codegen::pipeline::Pipeline;
//! use tsgen_typescript::{DuplicateFilePathLint, Generator, LanguageCodegen};
//!
//! let ctx = Pipeline::new()
//!     .lint(DuplicateFilePathLint::new(&options.namespace_export))
//!     .run(ir, options)?;
//! let generator = Generator::from_context(&ctx)?;
//!
//! // Preview files without writing
//! let files = generator.preview()?;
//!
//! // Publish the package
//! let result = generator.generate(Path::new("sdk"))?;
//! ```
//!
//! # Generated Output
//!
//! - `index.ts` - Root barrel; the root client is also the default export
//! - `Client.ts` - Root client with the root service's endpoints
//! - `environments.ts` - Named base URLs
//! - `api/<package>/types/*.ts` - Type declarations
//! - `api/<package>/errors/*.ts` - Error classes
//! - `api/<package>/client/Client.ts` - Service clients
//! - `api/<package>/client/<endpoint>.ts` - Endpoint error unions
//! - `api/<package>/<Package>Client.ts` - Clients of packages with sub-packages
//! - `serialization/...` - Runtime schemas mirroring `api/`
//! - `package.json`
//!
//! With `target = "express"` the client files and `environments.ts` are
//! replaced by server stubs, and the root barrel has no default export:
//!
//! - `<Api>Error.ts` - Base class of every error a service sends
//! - `register.ts` - Mounts every service router on an Express app
//! - `api/<package>/service/<Package>Service.ts` - Service interface and router

mod code_file;
mod context;
mod generator;
mod lints;
mod naming;
mod type_reference;
mod zurg;

pub mod ast;
pub mod declaration_referencer;
pub mod generators;

pub use code_file::{CodeFile, GENERATED_HEADER};
pub use generator::{CORE_RUNTIME_VERSION, Generator};
pub use lints::DuplicateFilePathLint;
pub use tsgen_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
