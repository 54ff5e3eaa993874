use tsgen_codegen::generation::{ExportDeclaration, ExportedDirectory, ExportedFilePath};
use tsgen_ir::DeclaredTypeName;

use super::{DeclarationReferencer, Referencer};

/// `<tree>/<package...>/types/<Name>.ts`
///
/// Used for both the type declaration (api tree) and its schema
/// (serialization tree), which therefore sit at mirrored paths.
#[derive(Debug, Clone)]
pub struct TypeReferencer {
    base: DeclarationReferencer,
}

impl TypeReferencer {
    pub fn new(base: DeclarationReferencer) -> Self {
        Self { base }
    }

    pub fn filename(&self, name: &DeclaredTypeName) -> String {
        format!("{}.ts", name.name.pascal_case)
    }
}

impl Referencer for TypeReferencer {
    type Name = DeclaredTypeName;

    fn base(&self) -> &DeclarationReferencer {
        &self.base
    }

    fn exported_filepath(&self, name: &DeclaredTypeName) -> ExportedFilePath {
        let mut directories = self.base.package_directories(&name.package, &[]);
        directories.push(ExportedDirectory::exporting_all("types"));
        ExportedFilePath::new(directories, self.filename(name))
            .with_file_export(ExportDeclaration::All)
    }

    fn exported_name(&self, name: &DeclaredTypeName) -> String {
        name.name.pascal_case.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_stable_and_distinct() {
        let referencer = TypeReferencer::new(DeclarationReferencer::api("Acme"));
        let movie = DeclaredTypeName::new(&["imdb"], "Movie");
        let other = DeclaredTypeName::new(&["netflix"], "Movie");

        let first = referencer.exported_filepath(&movie);
        assert_eq!(first, referencer.exported_filepath(&movie));
        assert_eq!(first.path(), "api/imdb/types/Movie.ts");
        assert_ne!(first.path(), referencer.exported_filepath(&other).path());
    }

    #[test]
    fn test_root_package_type() {
        let referencer = TypeReferencer::new(DeclarationReferencer::serialization());
        let path = referencer.exported_filepath(&DeclaredTypeName::new(&[], "MovieId"));
        assert_eq!(path.path(), "serialization/types/MovieId.ts");
    }
}
