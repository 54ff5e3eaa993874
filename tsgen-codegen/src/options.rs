use tsgen_config::{Config, DEFAULT_CORE_PACKAGE, Target};
use tsgen_schema::SchemaOptions;

/// Options threaded through every generator.
///
/// Built from a validated [`Config`]; generators never read TOML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// npm package name of the generated SDK
    pub package_name: String,
    /// Namespace the api tree is re-exported under from the package root
    pub namespace_export: String,
    /// Module specifier of the runtime library
    pub core_package: String,
    /// Leniency baked into generated serializers
    pub schema: SchemaOptions,
    pub include_other_in_union_types: bool,
    pub include_utils_on_union_members: bool,
    pub target: Target,
}

impl GeneratorOptions {
    pub fn new(package_name: impl Into<String>, namespace_export: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            namespace_export: namespace_export.into(),
            core_package: DEFAULT_CORE_PACKAGE.to_string(),
            schema: SchemaOptions::default(),
            include_other_in_union_types: false,
            include_utils_on_union_members: false,
            target: Target::Sdk,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            package_name: config.package.name.clone(),
            namespace_export: config.package.namespace_export(),
            core_package: config.package.core_package.clone(),
            schema: SchemaOptions {
                skip_unknown_keys_on_parse: config.serde.skip_unknown_keys_on_parse,
                include_unknown_keys_on_json: config.serde.include_unknown_keys_on_json,
                allow_unrecognized_union_members: config.serde.allow_unrecognized_union_members,
                allow_unrecognized_enum_values: config.serde.allow_unrecognized_enum_values,
            },
            include_other_in_union_types: config.types.include_other_in_union_types,
            include_utils_on_union_members: config.types.include_utils_on_union_members,
            target: config.package.target,
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new("api", "Api")
    }
}
