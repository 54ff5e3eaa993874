use tsgen_codegen::generation::{ExportDeclaration, ExportedFilePath};
use tsgen_ir::Name;

use super::{DeclarationReferencer, Referencer};

/// `environments.ts` in the package root, exporting `<Api>Environment`.
#[derive(Debug, Clone)]
pub struct EnvironmentsReferencer {
    base: DeclarationReferencer,
    api_name: String,
}

impl EnvironmentsReferencer {
    pub fn new(base: DeclarationReferencer, api_name: &Name) -> Self {
        Self {
            base,
            api_name: api_name.pascal_case.clone(),
        }
    }
}

impl Referencer for EnvironmentsReferencer {
    type Name = ();

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, _: &()) -> ExportedFilePath {
        ExportedFilePath::new(self.base.containing_directory().to_vec(), "environments.ts")
            .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, _: &()) -> String {
        format!("{}Environment", self.api_name)
    }
}
