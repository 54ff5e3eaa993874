use tsgen_codegen::generation::{ExportDeclaration, ExportedDirectory, ExportedFilePath};
use tsgen_ir::{DeclaredServiceName, Name};

use super::{DeclarationReferencer, Referencer};

/// `<tree>/<package...>/service/<Package>Service.ts`: the router of one
/// service. The root package's service is `RootService`.
#[derive(Debug, Clone)]
pub struct ExpressServiceReferencer {
    base: DeclarationReferencer,
}

impl ExpressServiceReferencer {
    pub fn new(base: DeclarationReferencer) -> Self {
        Self { base }
    }
}

impl Referencer for ExpressServiceReferencer {
    type Name = DeclaredServiceName;

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, name: &DeclaredServiceName) -> ExportedFilePath {
        let mut directories = self.base.package_directories(&name.package, &[]);
        directories.push(ExportedDirectory::exporting_all("service"));
        ExportedFilePath::new(directories, format!("{}.ts", self.exported_name(name)))
            .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, name: &DeclaredServiceName) -> String {
        let segments = name.package.segments();
        if segments.is_empty() {
            return "RootService".to_string();
        }
        let prefix: String = segments
            .iter()
            .map(|segment| segment.pascal_case.as_str())
            .collect();
        format!("{prefix}Service")
    }
}

/// `<Api>Error.ts` in the package root: the base class of every error a
/// service can throw.
#[derive(Debug, Clone)]
pub struct ApiErrorReferencer {
    base: DeclarationReferencer,
    api_name: String,
}

impl ApiErrorReferencer {
    pub fn new(base: DeclarationReferencer, api_name: &Name) -> Self {
        Self {
            base,
            api_name: api_name.pascal_case.clone(),
        }
    }
}

impl Referencer for ApiErrorReferencer {
    type Name = ();

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, name: &()) -> ExportedFilePath {
        ExportedFilePath::new(
            self.base.containing_directory().to_vec(),
            format!("{}.ts", self.exported_name(name)),
        )
        .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, _: &()) -> String {
        format!("{}Error", self.api_name)
    }
}

/// `register.ts` in the package root.
#[derive(Debug, Clone)]
pub struct RegisterReferencer {
    base: DeclarationReferencer,
}

impl RegisterReferencer {
    pub fn new(base: DeclarationReferencer) -> Self {
        Self { base }
    }
}

impl Referencer for RegisterReferencer {
    type Name = ();

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, _: &()) -> ExportedFilePath {
        ExportedFilePath::new(self.base.containing_directory().to_vec(), "register.ts")
            .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, _: &()) -> String {
        "register".to_string()
    }
}
