//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - lints the IR and collects diagnostics
//! - [`AnalyzePhase`] - builds the shared resolvers

mod analyze;
mod validate;

pub use analyze::AnalyzePhase;
pub use validate::{
    DuplicateDiscriminantLint, FailingExampleLint, Lint, UnresolvedErrorLint,
    UnresolvedTypeLint, ValidatePhase,
};
