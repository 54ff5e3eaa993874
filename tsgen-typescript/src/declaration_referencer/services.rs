use tsgen_codegen::generation::{ExportDeclaration, ExportedDirectory, ExportedFilePath};
use tsgen_ir::{DeclaredServiceName, Name, PackagePath};

use super::{DeclarationReferencer, Referencer};

/// `<tree>/<package...>/client/Client.ts` for a service outside the root
/// package.
#[derive(Debug, Clone)]
pub struct ServiceReferencer {
    base: DeclarationReferencer,
}

impl ServiceReferencer {
    pub fn new(base: DeclarationReferencer) -> Self {
        Self { base }
    }
}

impl Referencer for ServiceReferencer {
    type Name = DeclaredServiceName;

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, name: &DeclaredServiceName) -> ExportedFilePath {
        let mut directories = self.base.package_directories(&name.package, &[]);
        directories.push(ExportedDirectory::exporting_all("client"));
        ExportedFilePath::new(directories, "Client.ts").with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, _: &DeclaredServiceName) -> String {
        "Client".to_string()
    }
}

/// The client of the root package: `Client.ts` in the package root,
/// exporting `<Api>Client`. It holds the root service's endpoints and the
/// clients of top-level packages.
#[derive(Debug, Clone)]
pub struct RootClientReferencer {
    base: DeclarationReferencer,
    api_name: String,
}

impl RootClientReferencer {
    pub fn new(base: DeclarationReferencer, api_name: &Name) -> Self {
        Self {
            base,
            api_name: api_name.pascal_case.clone(),
        }
    }
}

impl Referencer for RootClientReferencer {
    type Name = ();

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, _: &()) -> ExportedFilePath {
        ExportedFilePath::new(self.base.containing_directory().to_vec(), "Client.ts")
            .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, _: &()) -> String {
        format!("{}Client", self.api_name)
    }
}

/// Names the wrapper of a package that contains other packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperName {
    pub package: PackagePath,
}

impl WrapperName {
    pub fn new(package: PackagePath) -> Self {
        Self { package }
    }

    fn class_name(&self) -> String {
        let last = self
            .package
            .segments()
            .last()
            .map(|segment| segment.pascal_case.as_str())
            .unwrap_or_default();
        format!("{last}Client")
    }
}

/// `<tree>/<package...>/<Package>Client.ts`: a client composing the
/// package's own service with the clients of its sub-packages.
#[derive(Debug, Clone)]
pub struct WrapperReferencer {
    base: DeclarationReferencer,
}

impl WrapperReferencer {
    pub fn new(base: DeclarationReferencer) -> Self {
        Self { base }
    }
}

impl Referencer for WrapperReferencer {
    type Name = WrapperName;

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, name: &WrapperName) -> ExportedFilePath {
        let directories = self.base.package_directories(&name.package, &[]);
        ExportedFilePath::new(directories, format!("{}.ts", name.class_name()))
            .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, name: &WrapperName) -> String {
        name.class_name()
    }
}
