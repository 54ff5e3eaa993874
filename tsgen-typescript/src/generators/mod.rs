//! One generator per kind of generated file.
//!
//! Each generator renders a single declaration into a [`CodeFile`] through
//! the file's [`FileContext`]. Generators register imports as they go and
//! never touch the export ledger; the orchestrator records exports for the
//! files that end up with content.

mod clients;
mod endpoint_errors;
mod environments;
mod errors;
mod express;
mod type_schemas;
mod types;

pub use clients::{ClientSettings, RootClientFile, ServiceClientFile, WrapperClientFile};
pub use endpoint_errors::{EndpointErrorFile, EndpointErrorSchemaFile};
pub use environments::EnvironmentsFile;
pub use errors::{ErrorFile, ErrorSchemaFile};
pub use express::{ApiErrorFile, ExpressErrorFile, ExpressServiceFile, RegisterFile};
use tsgen_codegen::GenerationError;
pub use type_schemas::TypeSchemaFile;
pub use types::TypeFile;

use crate::{code_file::CodeFile, context::FileContext};

/// A generated file for one declaration.
pub trait DeclarationFile {
    /// Generate the file. An empty [`CodeFile`] means the declaration has
    /// nothing to emit here.
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError>;
}
