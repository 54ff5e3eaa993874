use tsgen_codegen::generation::{ExportDeclaration, ExportedDirectory, ExportedFilePath};
use tsgen_ir::{DeclaredServiceName, HttpEndpoint, Name, PackagePath};

use super::{DeclarationReferencer, Referencer};

/// Names an endpoint of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointName {
    pub package: PackagePath,
    pub endpoint: Name,
}

impl EndpointName {
    pub fn new(service: &DeclaredServiceName, endpoint: &HttpEndpoint) -> Self {
        Self {
            package: service.package.clone(),
            endpoint: endpoint.name.clone(),
        }
    }
}

/// `<tree>/<package...>/client/<endpoint>.ts`, exported as a namespace
/// named after the endpoint. The file declares the endpoint's `Error`.
#[derive(Debug, Clone)]
pub struct EndpointReferencer {
    base: DeclarationReferencer,
}

impl EndpointReferencer {
    pub fn new(base: DeclarationReferencer) -> Self {
        Self { base }
    }
}

impl Referencer for EndpointReferencer {
    type Name = EndpointName;

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, name: &EndpointName) -> ExportedFilePath {
        let mut directories = self.base.package_directories(&name.package, &[]);
        directories.push(ExportedDirectory::exporting_all("client"));
        ExportedFilePath::new(directories, format!("{}.ts", name.endpoint.camel_case))
            .with_file_export(ExportDeclaration::Namespace(name.endpoint.camel_case.clone()))
    }

    fn exported_name(&self, _: &EndpointName) -> String {
        "Error".to_string()
    }
}
