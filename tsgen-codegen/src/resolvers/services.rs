use std::{collections::HashMap, sync::Arc};

use tsgen_ir::{DeclaredServiceName, HttpService, IntermediateRepresentation, PackagePath};

use crate::GenerationError;

#[derive(Debug, Clone)]
pub struct ServiceResolver {
    ir: Arc<IntermediateRepresentation>,
    by_package: HashMap<PackagePath, usize>,
    packages: Vec<PackagePath>,
}

impl ServiceResolver {
    pub fn new(ir: Arc<IntermediateRepresentation>) -> Self {
        let by_package = ir
            .services
            .iter()
            .enumerate()
            .map(|(index, service)| (service.name.package.clone(), index))
            .collect();
        let packages = ir.service_packages();
        Self {
            ir,
            by_package,
            packages,
        }
    }

    pub fn declarations(&self) -> &[HttpService] {
        &self.ir.services
    }

    pub fn get_service_declaration(
        &self,
        name: &DeclaredServiceName,
    ) -> Result<&HttpService, GenerationError> {
        self.service_in(&name.package)
            .ok_or_else(|| GenerationError::UnresolvedService {
                package: name.package.key(),
            })
    }

    /// The service declared directly in `package`, if any.
    pub fn service_in(&self, package: &PackagePath) -> Option<&HttpService> {
        self.by_package
            .get(package)
            .map(|&index| &self.ir.services[index])
    }

    /// Packages that declare a service or contain one, root first.
    pub fn packages(&self) -> &[PackagePath] {
        &self.packages
    }

    pub fn subpackages_of(&self, package: &PackagePath) -> Vec<&PackagePath> {
        self.packages
            .iter()
            .filter(|p| p.parent().as_ref() == Some(package))
            .collect()
    }
}
