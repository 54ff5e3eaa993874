use serde::Deserialize;
use tsgen_core::{to_camel_case, upper_first};

use crate::{ConfigSource, Result, validate};

/// Module specifier of the runtime library imported by generated code.
pub const DEFAULT_CORE_PACKAGE: &str = "@tsgen/core";

/// Root schema for tsgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub package: PackageConfig,

    /// Runtime (de)serialization leniency baked into generated schemas
    #[serde(default)]
    pub serde: SerdeConfig,

    /// Shape of generated type declarations
    #[serde(default)]
    pub types: TypesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// npm package name of the generated SDK
    pub name: String,
    pub organization: String,
    pub workspace_name: String,

    /// Name of the namespace that re-exports the public API.
    /// Derived from the organization and workspace when unset.
    #[serde(default)]
    pub namespace_export: Option<String>,

    #[serde(default = "default_core_package")]
    pub core_package: String,

    /// What kind of package to generate
    #[serde(default)]
    pub target: Target,
}

/// Kind of package a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Client SDK: service clients, endpoint error unions, environments
    #[default]
    Sdk,
    /// Express server stubs: service routers, a `register` function and
    /// errors that serialize themselves onto the response
    Express,
}

fn default_core_package() -> String {
    DEFAULT_CORE_PACKAGE.to_string()
}

impl PackageConfig {
    pub fn namespace_export(&self) -> String {
        match &self.namespace_export {
            Some(name) => name.clone(),
            None => format!(
                "{}{}",
                upper_first(&to_camel_case(&self.organization)),
                upper_first(&to_camel_case(&self.workspace_name))
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerdeConfig {
    pub allow_unrecognized_union_members: bool,
    pub allow_unrecognized_enum_values: bool,
    pub skip_unknown_keys_on_parse: bool,
    pub include_unknown_keys_on_json: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypesConfig {
    /// Add a catch-all member to generated union types
    pub include_other_in_union_types: bool,
    /// Generate `_visit` helpers on union members
    pub include_utils_on_union_members: bool,
}

impl Config {
    /// Validate the config after parsing
    pub fn validate(&self, source: &ConfigSource) -> Result<()> {
        if self.package.name.trim().is_empty() {
            return Err(source.invalid("name", "package name cannot be empty"));
        }
        if self.package.core_package.trim().is_empty() {
            return Err(source.invalid("core_package", "core package cannot be empty"));
        }
        validate::validate_namespace_export(&self.package.namespace_export(), source)
    }
}
