//! The package-wide export ledger.

use std::collections::BTreeMap;

use super::paths::strip_extension;
use crate::GenerationError;

/// How a directory or file is re-exported from its parent's barrel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExportDeclaration {
    /// `export * from "./x"`
    All,
    /// `export * as name from "./x"`
    Namespace(String),
}

impl std::fmt::Display for ExportDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportDeclaration::All => write!(f, "export *"),
            ExportDeclaration::Namespace(name) => write!(f, "export * as {name}"),
        }
    }
}

/// One directory level of an [`ExportedFilePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportedDirectory {
    pub name_on_disk: String,
    /// How the parent directory re-exports this one.
    pub export_declaration: Option<ExportDeclaration>,
    /// Extra re-exports inside this directory, keyed by relative module path.
    pub sub_exports: Vec<(String, ExportDeclaration)>,
}

impl ExportedDirectory {
    pub fn new(name_on_disk: impl Into<String>) -> Self {
        Self {
            name_on_disk: name_on_disk.into(),
            export_declaration: None,
            sub_exports: Vec::new(),
        }
    }

    pub fn exporting_all(name_on_disk: impl Into<String>) -> Self {
        Self::new(name_on_disk).with_export(ExportDeclaration::All)
    }

    pub fn namespaced(name_on_disk: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self::new(name_on_disk).with_export(ExportDeclaration::Namespace(namespace.into()))
    }

    pub fn with_export(mut self, declaration: ExportDeclaration) -> Self {
        self.export_declaration = Some(declaration);
        self
    }

    pub fn with_sub_export(
        mut self,
        relative: impl Into<String>,
        declaration: ExportDeclaration,
    ) -> Self {
        self.sub_exports.push((relative.into(), declaration));
        self
    }
}

/// The terminal file of an [`ExportedFilePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportedFile {
    pub name_on_disk: String,
    pub export_declaration: Option<ExportDeclaration>,
}

/// Where a declaration lives inside the generated package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportedFilePath {
    pub directories: Vec<ExportedDirectory>,
    pub file: ExportedFile,
}

impl ExportedFilePath {
    pub fn new(directories: Vec<ExportedDirectory>, file_name: impl Into<String>) -> Self {
        Self {
            directories,
            file: ExportedFile {
                name_on_disk: file_name.into(),
                export_declaration: None,
            },
        }
    }

    pub fn with_file_export(mut self, declaration: ExportDeclaration) -> Self {
        self.file.export_declaration = Some(declaration);
        self
    }

    /// `/`-separated directory part, relative to the package root.
    pub fn directory(&self) -> String {
        self.directories
            .iter()
            .map(|d| d.name_on_disk.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// `/`-separated file path, relative to the package root.
    pub fn path(&self) -> String {
        join(&self.directory(), &self.file.name_on_disk)
    }

    /// The path as a module (without extension).
    pub fn module(&self) -> String {
        strip_extension(&self.path()).to_string()
    }
}

impl std::fmt::Display for ExportedFilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

fn join(directory: &str, name: &str) -> String {
    if directory.is_empty() {
        name.to_string()
    } else {
        format!("{directory}/{name}")
    }
}

/// The re-exports of one directory, ready to be rendered as `index.ts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barrel {
    /// Directory relative to the package root (`""` for the root).
    pub directory: String,
    /// `(module specifier, declaration)` in lexical order.
    pub exports: Vec<(String, ExportDeclaration)>,
}

impl Barrel {
    /// Path of the barrel file.
    pub fn path(&self) -> String {
        join(&self.directory, "index.ts")
    }
}

/// Records, for every directory of the package, what its barrel re-exports.
///
/// Entries merge additively. A module exported two different ways from the
/// same directory is a conflict. The ledger is flushed exactly once with
/// [`ExportsManager::finalize`].
#[derive(Debug, Default)]
pub struct ExportsManager {
    exports: BTreeMap<String, BTreeMap<String, ExportDeclaration>>,
    finalized: bool,
}

impl ExportsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every re-export along `path`, from the package root down to the file.
    pub fn add_exports_for_filepath(
        &mut self,
        path: &ExportedFilePath,
    ) -> Result<(), GenerationError> {
        if self.finalized {
            return Err(GenerationError::ExportsFinalized);
        }

        let mut directory = String::new();
        for exported in &path.directories {
            if let Some(declaration) = &exported.export_declaration {
                self.add(&directory, &exported.name_on_disk, declaration)?;
            }
            directory = join(&directory, &exported.name_on_disk);
            for (relative, declaration) in &exported.sub_exports {
                self.add(&directory, relative, declaration)?;
            }
        }
        if let Some(declaration) = &path.file.export_declaration {
            self.add(&directory, strip_extension(&path.file.name_on_disk), declaration)?;
        }
        Ok(())
    }

    fn add(
        &mut self,
        directory: &str,
        relative: &str,
        declaration: &ExportDeclaration,
    ) -> Result<(), GenerationError> {
        let module = format!("./{relative}");
        let entries = self.exports.entry(directory.to_string()).or_default();
        match entries.get(&module) {
            Some(existing) if existing == declaration => Ok(()),
            Some(existing) => Err(GenerationError::ExportConflict {
                directory: if directory.is_empty() { ".".into() } else { directory.into() },
                module,
                existing: existing.to_string(),
                requested: declaration.to_string(),
            }),
            None => {
                entries.insert(module, declaration.clone());
                Ok(())
            }
        }
    }

    /// Whether a re-export of `relative` is recorded in `directory`.
    pub fn is_exported(&self, directory: &str, relative: &str) -> bool {
        self.exports
            .get(directory)
            .is_some_and(|entries| entries.contains_key(&format!("./{relative}")))
    }

    /// Flush the ledger into one barrel per directory, in lexical order.
    pub fn finalize(&mut self) -> Result<Vec<Barrel>, GenerationError> {
        if self.finalized {
            return Err(GenerationError::ExportsFinalized);
        }
        self.finalized = true;

        Ok(std::mem::take(&mut self.exports)
            .into_iter()
            .map(|(directory, entries)| Barrel {
                directory,
                exports: entries.into_iter().collect(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_path(package: &[&str], name: &str) -> ExportedFilePath {
        let mut directories = vec![ExportedDirectory::namespaced("api", "Acme")];
        directories.extend(
            package
                .iter()
                .map(|segment| ExportedDirectory::namespaced(*segment, *segment)),
        );
        directories.push(ExportedDirectory::exporting_all("types"));
        ExportedFilePath::new(directories, format!("{name}.ts"))
            .with_file_export(ExportDeclaration::All)
    }

    #[test]
    fn test_paths() {
        let path = type_path(&["imdb"], "Movie");
        assert_eq!(path.directory(), "api/imdb/types");
        assert_eq!(path.path(), "api/imdb/types/Movie.ts");
        assert_eq!(path.module(), "api/imdb/types/Movie");
    }

    #[test]
    fn test_barrels_cover_every_level() {
        let mut exports = ExportsManager::new();
        exports.add_exports_for_filepath(&type_path(&["imdb"], "Movie")).unwrap();
        exports.add_exports_for_filepath(&type_path(&["imdb"], "Actor")).unwrap();
        exports.add_exports_for_filepath(&type_path(&[], "Id")).unwrap();

        let barrels = exports.finalize().unwrap();
        let rendered: Vec<_> = barrels
            .iter()
            .map(|b| {
                let entries: Vec<_> = b
                    .exports
                    .iter()
                    .map(|(module, decl)| format!("{decl} from {module}"))
                    .collect();
                format!("{}: {}", b.path(), entries.join(", "))
            })
            .collect();

        assert_eq!(
            rendered,
            vec![
                "index.ts: export * as Acme from ./api",
                "api/index.ts: export * as imdb from ./imdb, export * from ./types",
                "api/imdb/index.ts: export * from ./types",
                "api/imdb/types/index.ts: export * from ./Actor, export * from ./Movie",
                "api/types/index.ts: export * from ./Id",
            ]
        );
    }

    #[test]
    fn test_sub_exports() {
        let path = ExportedFilePath::new(
            vec![
                ExportedDirectory::namespaced("api", "Acme"),
                ExportedDirectory::namespaced("imdb", "imdb")
                    .with_sub_export("errors", ExportDeclaration::All),
                ExportedDirectory::exporting_all("errors"),
            ],
            "NotFound.ts",
        )
        .with_file_export(ExportDeclaration::All);

        let mut exports = ExportsManager::new();
        exports.add_exports_for_filepath(&path).unwrap();
        assert!(exports.is_exported("api/imdb", "errors"));
        assert!(exports.is_exported("api/imdb/errors", "NotFound"));
    }

    #[test]
    fn test_conflicting_declarations() {
        let mut exports = ExportsManager::new();
        exports
            .add_exports_for_filepath(&ExportedFilePath::new(
                vec![ExportedDirectory::namespaced("api", "Acme")],
                "Client.ts",
            ))
            .unwrap();

        let err = exports
            .add_exports_for_filepath(&ExportedFilePath::new(
                vec![ExportedDirectory::exporting_all("api")],
                "Client.ts",
            ))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "conflicting exports of './api' in '.': 'export * as Acme' and 'export *'"
        );

        let err = exports
            .add_exports_for_filepath(&ExportedFilePath::new(
                vec![ExportedDirectory::namespaced("api", "Other")],
                "Client.ts",
            ))
            .unwrap_err();
        assert!(matches!(err, GenerationError::ExportConflict { .. }));
    }

    #[test]
    fn test_finalize_runs_once() {
        let mut exports = ExportsManager::new();
        exports.finalize().unwrap();
        assert_eq!(exports.finalize(), Err(GenerationError::ExportsFinalized));
        assert_eq!(
            exports.add_exports_for_filepath(&type_path(&[], "Id")),
            Err(GenerationError::ExportsFinalized)
        );
    }
}
