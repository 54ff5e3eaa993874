//! Validation and analysis pipeline that runs before any file is generated.
//!
//! The [`Pipeline`] runs explicit phases over the IR:
//!
//! - [`phases::ValidatePhase`] lints the IR and collects diagnostics
//! - [`phases::AnalyzePhase`] builds the shared resolvers
//! - any extra phases registered with [`Pipeline::phase`]
//!
//! # Example
//!
//! ```ignore
//! use tsgen_codegen::pipeline::Pipeline;
//!
//! let ctx = Pipeline::new().run(ir, options)?;
//! for diag in &ctx.diagnostics {
//!     eprintln!("{diag}");
//! }
//! let resolvers = ctx.resolvers()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod runner;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use runner::Pipeline;
