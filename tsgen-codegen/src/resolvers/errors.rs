use std::{collections::HashMap, sync::Arc};

use tsgen_ir::{DeclaredErrorName, ErrorDeclaration, IntermediateRepresentation};

use crate::GenerationError;

#[derive(Debug, Clone)]
pub struct ErrorResolver {
    ir: Arc<IntermediateRepresentation>,
    by_id: HashMap<String, usize>,
}

impl ErrorResolver {
    pub fn new(ir: Arc<IntermediateRepresentation>) -> Self {
        let by_id = ir
            .errors
            .iter()
            .enumerate()
            .map(|(index, error)| (error.name.error_id.clone(), index))
            .collect();
        Self { ir, by_id }
    }

    pub fn declarations(&self) -> &[ErrorDeclaration] {
        &self.ir.errors
    }

    pub fn get_error_declaration_from_name(
        &self,
        name: &DeclaredErrorName,
    ) -> Result<&ErrorDeclaration, GenerationError> {
        self.by_id
            .get(&name.error_id)
            .map(|&index| &self.ir.errors[index])
            .ok_or_else(|| GenerationError::UnresolvedError {
                error_id: name.error_id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let not_found = DeclaredErrorName::new(&["imdb"], "MovieNotFound");
        let mut ir = IntermediateRepresentation::new("acme");
        ir.errors.push(ErrorDeclaration::new(not_found.clone(), 404));
        let resolver = ErrorResolver::new(Arc::new(ir));

        assert_eq!(
            resolver
                .get_error_declaration_from_name(&not_found)
                .unwrap()
                .status_code,
            404
        );
        assert_eq!(
            resolver
                .get_error_declaration_from_name(&DeclaredErrorName::new(&[], "MovieNotFound"))
                .unwrap_err(),
            GenerationError::UnresolvedError {
                error_id: "error_:MovieNotFound".into()
            }
        );
    }
}
