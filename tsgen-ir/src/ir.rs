//! The root IR document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ApiAuth, EnvironmentsConfig, ErrorDeclaration, HttpHeader, HttpService, Name, PackagePath,
    TypeDeclaration,
};

/// Failure to load an IR document.
#[derive(Debug, Error)]
pub enum IrError {
    #[error("failed to read IR from '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid IR document{}", quoted(.path))]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

fn quoted(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" '{}'", p.display()))
        .unwrap_or_default()
}

/// The complete description of an API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateRepresentation {
    pub api_name: Name,
    #[serde(default)]
    pub api_docs: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    #[serde(default)]
    pub errors: Vec<ErrorDeclaration>,
    #[serde(default)]
    pub services: Vec<HttpService>,
    #[serde(default)]
    pub environments: Option<EnvironmentsConfig>,
    #[serde(default)]
    pub auth: ApiAuth,
    /// Headers sent with every request.
    #[serde(default)]
    pub headers: Vec<HttpHeader>,
}

impl IntermediateRepresentation {
    pub fn new(api_name: &str) -> Self {
        Self {
            api_name: Name::new(api_name),
            ..Default::default()
        }
    }

    pub fn from_json_str(src: &str) -> Result<Self, IrError> {
        serde_json::from_str(src).map_err(|source| IrError::Json { path: None, source })
    }

    pub fn from_path(path: &Path) -> Result<Self, IrError> {
        let src = std::fs::read_to_string(path).map_err(|source| IrError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&src).map_err(|source| IrError::Json {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Every package that declares a service, plus all of their ancestors,
    /// in first-seen order. The root package is always first.
    pub fn service_packages(&self) -> Vec<PackagePath> {
        let mut packages = vec![PackagePath::root()];
        for service in &self.services {
            let mut chain = Vec::new();
            let mut current = Some(service.name.package.clone());
            while let Some(package) = current {
                current = package.parent();
                chain.push(package);
            }
            for package in chain.into_iter().rev() {
                if !packages.contains(&package) {
                    packages.push(package);
                }
            }
        }
        packages
    }

    /// Direct children of `package` among [`Self::service_packages`].
    pub fn subpackages_of(&self, package: &PackagePath) -> Vec<PackagePath> {
        self.service_packages()
            .into_iter()
            .filter(|p| p.parent().as_ref() == Some(package))
            .collect()
    }
}
