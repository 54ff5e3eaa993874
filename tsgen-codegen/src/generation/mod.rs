//! Output bookkeeping for a generation run.
//!
//! - [`ImportsManager`] - Per-file import ledger with collision-free aliasing
//! - [`DependencyCollector`] - npm packages the generated code needs
//! - [`ExportsManager`] - Package-wide export ledger, flushed once into barrels
//! - [`ExportedFilePath`] - Where a declaration lives and how each level re-exports it
//! - [`FileRegistry`] - Generated files, written all-or-nothing

mod exports;
mod imports;
mod paths;
mod registry;

pub use exports::{
    Barrel, ExportDeclaration, ExportedDirectory, ExportedFile, ExportedFilePath, ExportsManager,
};
pub use imports::{DependencyCollector, DependencySpec, ImportsManager, ModuleImports};
pub use paths::{relative_module_specifier, strip_extension};
pub use registry::{FileCategory, FileEntry, FileRegistry, WriteStats};
