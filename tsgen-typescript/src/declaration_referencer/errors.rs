use tsgen_codegen::generation::{ExportDeclaration, ExportedDirectory, ExportedFilePath};
use tsgen_ir::DeclaredErrorName;

use super::{DeclarationReferencer, Referencer};

/// `<tree>/<package...>/errors/<Name>.ts`
#[derive(Debug, Clone)]
pub struct ErrorReferencer {
    base: DeclarationReferencer,
}

impl ErrorReferencer {
    pub fn new(base: DeclarationReferencer) -> Self {
        Self { base }
    }

    pub fn filename(&self, name: &DeclaredErrorName) -> String {
        format!("{}.ts", name.name.pascal_case)
    }
}

impl Referencer for ErrorReferencer {
    type Name = DeclaredErrorName;

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, name: &DeclaredErrorName) -> ExportedFilePath {
        let mut directories = self
            .base
            .package_directories(&name.package, &[("errors", ExportDeclaration::All)]);
        directories.push(ExportedDirectory::exporting_all("errors"));
        ExportedFilePath::new(directories, self.filename(name))
            .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, name: &DeclaredErrorName) -> String {
        name.name.pascal_case.clone()
    }
}
