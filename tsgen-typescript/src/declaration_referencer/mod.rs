//! Maps declaration names to files of the generated package and to the
//! expressions other files use to refer to them.
//!
//! Every referencer is configured with a containing directory (the `api`
//! tree, the `serialization` tree, or the package root) and computes paths
//! below it. Paths are pure functions of the name, so they are stable for a
//! whole run.
//!
//! A reference is made with one of two [`ImportStrategy`]s:
//!
//! - [`ImportStrategy::Direct`] imports the exported symbol from its file by
//!   relative path, optionally under an alias.
//! - [`ImportStrategy::FromRoot`] imports the containing tree's barrel as a
//!   namespace and walks the namespace exports down to the symbol.
//!
//! Each kind of reference always uses the same strategy for a given
//! relationship, so a file never imports one declaration two ways.

mod endpoints;
mod environments;
mod errors;
mod express;
mod services;
mod types;

pub use endpoints::{EndpointName, EndpointReferencer};
pub use environments::EnvironmentsReferencer;
pub use errors::ErrorReferencer;
pub use express::{ApiErrorReferencer, ExpressServiceReferencer, RegisterReferencer};
pub use services::{RootClientReferencer, ServiceReferencer, WrapperName, WrapperReferencer};
use tsgen_codegen::generation::{
    ExportDeclaration, ExportedDirectory, ExportedFilePath, ImportsManager,
    relative_module_specifier,
};
use tsgen_ir::{Name, PackagePath};
pub use types::TypeReferencer;

/// Directory holding type, error and client declarations.
pub const API_DIRECTORY: &str = "api";
/// Directory holding runtime schemas.
pub const SERIALIZATION_DIRECTORY: &str = "serialization";
/// Namespace the serialization tree is exported under.
pub const SERIALIZATION_NAMESPACE: &str = "serialization";
/// Local name of the serialization tree when it is imported by generated files.
pub const SERIALIZERS_IMPORT: &str = "serializers";

/// How a file imports the declaration it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Import the symbol from its own file.
    Direct { alias: Option<String> },
    /// Import the tree's barrel as a namespace.
    FromRoot { namespace_import: String },
}

impl ImportStrategy {
    pub fn direct() -> Self {
        Self::Direct { alias: None }
    }

    pub fn aliased(alias: impl Into<String>) -> Self {
        Self::Direct {
            alias: Some(alias.into()),
        }
    }

    pub fn from_root(namespace_import: impl Into<String>) -> Self {
        Self::FromRoot {
            namespace_import: namespace_import.into(),
        }
    }
}

/// An expression naming a declaration from inside another file.
///
/// The same text is valid in type and value position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub expression: String,
}

impl Reference {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// A member of the referenced namespace (`Movie` -> `Movie.Raw`).
    pub fn member(&self, name: &str) -> Reference {
        Reference::new(format!("{}.{name}", self.expression))
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Directory layout shared by every referencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationReferencer {
    containing: Vec<ExportedDirectory>,
}

impl DeclarationReferencer {
    pub fn new(containing: Vec<ExportedDirectory>) -> Self {
        Self { containing }
    }

    /// The `api` tree, exported from the package root as `namespace_export`.
    pub fn api(namespace_export: &str) -> Self {
        Self::new(vec![ExportedDirectory::namespaced(
            API_DIRECTORY,
            namespace_export,
        )])
    }

    /// The `serialization` tree.
    pub fn serialization() -> Self {
        Self::new(vec![ExportedDirectory::namespaced(
            SERIALIZATION_DIRECTORY,
            SERIALIZATION_NAMESPACE,
        )])
    }

    /// Files directly in the package root.
    pub fn root() -> Self {
        Self::new(Vec::new())
    }

    pub fn containing_directory(&self) -> &[ExportedDirectory] {
        &self.containing
    }

    /// The containing directory followed by one namespaced directory per
    /// package segment. `last_sub_exports` are attached to the innermost
    /// package directory.
    pub fn package_directories(
        &self,
        package: &PackagePath,
        last_sub_exports: &[(&str, ExportDeclaration)],
    ) -> Vec<ExportedDirectory> {
        let segments = package.segments();
        let mut directories = self.containing.clone();
        for (i, segment) in segments.iter().enumerate() {
            let mut directory = package_directory(segment);
            if i + 1 == segments.len() {
                for (relative, declaration) in last_sub_exports {
                    directory = directory.with_sub_export(*relative, declaration.clone());
                }
            }
            directories.push(directory);
        }
        directories
    }

    /// Refer to `exported_name` exported from `path`, registering the import
    /// in the file `referenced_in`.
    ///
    /// A file referring to its own declaration uses the local name and
    /// imports nothing.
    pub fn reference(
        &self,
        exported_name: &str,
        path: &ExportedFilePath,
        strategy: &ImportStrategy,
        referenced_in: &str,
        imports: &mut ImportsManager,
    ) -> Reference {
        if path.path() == referenced_in {
            return Reference::new(exported_name);
        }
        match strategy {
            ImportStrategy::Direct { alias } => {
                let module = relative_module_specifier(referenced_in, &path.module());
                let local = imports.add_named_as(
                    &module,
                    exported_name,
                    alias.as_deref().unwrap_or(exported_name),
                );
                Reference::new(local)
            }
            ImportStrategy::FromRoot { namespace_import } => {
                let (root, below) = match path.directories.split_first() {
                    Some((root, below)) if !self.containing.is_empty() => {
                        (root.name_on_disk.as_str(), below)
                    }
                    _ => ("", path.directories.as_slice()),
                };
                let module = relative_module_specifier(referenced_in, root);
                let mut segments = vec![imports.add_namespace(&module, namespace_import)];
                segments.extend(below.iter().filter_map(|d| namespace_of(&d.export_declaration)));
                segments.extend(namespace_of(&path.file.export_declaration));
                segments.push(exported_name.to_string());
                Reference::new(segments.join("."))
            }
        }
    }
}

fn package_directory(segment: &Name) -> ExportedDirectory {
    ExportedDirectory::namespaced(&segment.original_name, &segment.camel_case)
}

fn namespace_of(declaration: &Option<ExportDeclaration>) -> Option<String> {
    match declaration {
        Some(ExportDeclaration::Namespace(name)) => Some(name.clone()),
        _ => None,
    }
}

/// A referencer for one kind of declaration name.
pub trait Referencer {
    type Name;

    fn base(&self) -> &DeclarationReferencer;

    /// Where the declaration's file lives and how it is re-exported.
    fn exported_filepath(&self, name: &Self::Name) -> ExportedFilePath;

    /// The symbol the declaration's file exports.
    fn exported_name(&self, name: &Self::Name) -> String;

    fn reference_to(
        &self,
        name: &Self::Name,
        strategy: &ImportStrategy,
        referenced_in: &str,
        imports: &mut ImportsManager,
    ) -> Reference {
        self.base().reference(
            &self.exported_name(name),
            &self.exported_filepath(name),
            strategy,
            referenced_in,
            imports,
        )
    }
}

/// Every referencer used in one run.
#[derive(Debug, Clone)]
pub struct Referencers {
    pub types: TypeReferencer,
    pub type_schemas: TypeReferencer,
    pub errors: ErrorReferencer,
    pub error_schemas: ErrorReferencer,
    pub services: ServiceReferencer,
    pub root_client: RootClientReferencer,
    pub wrappers: WrapperReferencer,
    pub endpoint_errors: EndpointReferencer,
    pub endpoint_error_schemas: EndpointReferencer,
    pub environments: EnvironmentsReferencer,
    pub express_services: ExpressServiceReferencer,
    pub api_error: ApiErrorReferencer,
    pub register: RegisterReferencer,
}

impl Referencers {
    pub fn new(api_name: &Name, namespace_export: &str) -> Self {
        let api = DeclarationReferencer::api(namespace_export);
        let serialization = DeclarationReferencer::serialization();
        Self {
            types: TypeReferencer::new(api.clone()),
            type_schemas: TypeReferencer::new(serialization.clone()),
            errors: ErrorReferencer::new(api.clone()),
            error_schemas: ErrorReferencer::new(serialization.clone()),
            services: ServiceReferencer::new(api.clone()),
            root_client: RootClientReferencer::new(DeclarationReferencer::root(), api_name),
            wrappers: WrapperReferencer::new(api.clone()),
            endpoint_errors: EndpointReferencer::new(api.clone()),
            endpoint_error_schemas: EndpointReferencer::new(serialization),
            environments: EnvironmentsReferencer::new(DeclarationReferencer::root(), api_name),
            express_services: ExpressServiceReferencer::new(api),
            api_error: ApiErrorReferencer::new(DeclarationReferencer::root(), api_name),
            register: RegisterReferencer::new(DeclarationReferencer::root()),
        }
    }
}
