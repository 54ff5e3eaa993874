//! The trait implemented by language emitters.

use std::path::Path;

use eyre::Result;

/// Trait for language-specific SDK generators.
///
/// A generator is built from a validated IR and owns one generation run.
/// Both entry points regenerate everything; a failing run writes nothing.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "typescript")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "ts")
    fn file_extension(&self) -> &'static str;

    /// Generate the file tree in memory without writing to disk.
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate the file tree and publish it at `output_dir`, replacing
    /// whatever was there.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// Files written, relative to the output directory
    pub files: Vec<String>,
    /// Declarations whose file had no content and was dropped
    pub skipped: Vec<String>,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    pub content: String,
}
