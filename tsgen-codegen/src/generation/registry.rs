//! In-memory set of generated files, published to disk in one step.
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::new("api/types/Movie.ts", movie, FileCategory::Declaration))?;
//! registry.register(FileEntry::barrel("api/types/index.ts", barrel))?;
//! let stats = registry.write_all(&output_dir)?;
//! ```

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use eyre::Result;
use tsgen_core::StagedTree;

use crate::GenerationError;

/// Kind of generated file. Files are listed and written in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileCategory {
    /// Package entry points: the root client, environments, package.json.
    Root,
    Declaration,
    Schema,
    /// `index.ts` barrels.
    Barrel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// `/`-separated, relative to the package root.
    pub path: String,
    pub content: String,
    pub category: FileCategory,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
        }
    }

    pub fn root(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Root)
    }

    pub fn barrel(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileCategory::Barrel)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,
    /// Relative paths, in write order.
    pub paths: Vec<PathBuf>,
}

/// Every file of one run, keyed by path.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: BTreeMap<String, FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two files may never share a path.
    pub fn register(&mut self, entry: FileEntry) -> Result<(), GenerationError> {
        if self.entries.contains_key(&entry.path) {
            return Err(GenerationError::DuplicateFile { path: entry.path });
        }
        self.entries.insert(entry.path.clone(), entry);
        Ok(())
    }

    /// Entries by category, then by path.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.values().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Publish every file under `output_dir`, replacing what was there.
    ///
    /// Files are staged first; `output_dir` is untouched if staging fails.
    pub fn write_all(&self, output_dir: &Path) -> Result<WriteStats> {
        let mut tree = StagedTree::new(output_dir)?;
        for entry in self.entries() {
            tree.write(&entry.path, &entry.content)?;
        }
        let paths = tree.commit()?;

        tracing::debug!(
            output = %output_dir.display(),
            files = paths.len(),
            "wrote generated files"
        );
        Ok(WriteStats {
            written: paths.len(),
            paths,
        })
    }
}
