//! Read-only lookups over the IR.
//!
//! Resolvers are built once per run and shared by every file generated in
//! it. Looking up a name that the IR does not declare is always an internal
//! consistency error and fails immediately.

mod errors;
mod services;
mod types;

use std::sync::Arc;

pub use errors::ErrorResolver;
pub use services::ServiceResolver;
use tsgen_ir::IntermediateRepresentation;
pub use types::TypeResolver;
pub(crate) use types::references as declaration_references;

/// The resolvers of one generation run.
#[derive(Debug, Clone)]
pub struct Resolvers {
    pub types: TypeResolver,
    pub errors: ErrorResolver,
    pub services: ServiceResolver,
}

impl Resolvers {
    pub fn new(ir: Arc<IntermediateRepresentation>) -> Self {
        Self {
            types: TypeResolver::new(ir.clone()),
            errors: ErrorResolver::new(ir.clone()),
            services: ServiceResolver::new(ir),
        }
    }
}
