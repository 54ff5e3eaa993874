//! One generated TypeScript module: imports, declarations, re-exports.

use tsgen_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::ImportsManager,
};

use crate::ast::{Export, Import};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// This file was auto-generated by tsgen. Do not edit.";

/// A generated module, rendered as the header, the imports, the body
/// declarations separated by blank lines, then the re-exports.
///
/// ```
/// use tsgen_codegen::generation::ImportsManager;
/// use tsgen_typescript::{CodeFile, ast::TypeAlias};
///
/// let mut imports = ImportsManager::new();
/// imports.add_namespace("../..", "Acme");
/// let code = CodeFile::new()
///     .imports_from(&imports)
///     .add(TypeAlias::new("Movies", "Acme.Movie[]"))
///     .render();
/// assert!(code.ends_with("export type Movies = Acme.Movie[];\n"));
/// ```
#[derive(Default)]
pub struct CodeFile {
    imports: Vec<Import>,
    body: Vec<Vec<CodeFragment>>,
    exports: Vec<Export>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every import recorded by a file's [`ImportsManager`], in first-use order.
    pub fn imports_from(mut self, imports: &ImportsManager) -> Self {
        for (module, entry) in imports.iter() {
            self.imports.extend(Import::for_module(module, entry));
        }
        self
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        self.body.extend(nodes.into_iter().map(|node| node.to_fragments()));
        self
    }

    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn exports(mut self, exports: impl IntoIterator<Item = Export>) -> Self {
        self.exports.extend(exports);
        self
    }

    /// Render with 2-space indentation. An empty file renders to `""`.
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        if self.is_empty() {
            return builder.build();
        }

        builder.push_line(GENERATED_HEADER).push_blank();

        for import in &self.imports {
            builder.emit(import);
        }
        if !self.imports.is_empty() {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        if !self.body.is_empty() && !self.exports.is_empty() {
            builder.push_blank();
        }
        for export in &self.exports {
            builder.emit(export);
        }

        builder.build()
    }

    /// A file with no statements besides imports is empty and is not written.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.exports.is_empty()
    }
}
