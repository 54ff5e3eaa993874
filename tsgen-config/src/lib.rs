// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod validate;

use std::path::Path;

pub use config::{Config, DEFAULT_CORE_PACKAGE, PackageConfig, SerdeConfig, Target, TypesConfig};
pub use error::{ConfigSource, Error, Result};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "tsgen.toml";

/// Parse a tsgen.toml file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename)
}

/// Parse a tsgen.toml from a string
pub fn parse_str(content: &str) -> Result<Config> {
    parse_str_with_filename(content, CONFIG_FILE)
}

/// Parse a tsgen.toml from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Config> {
    let source = ConfigSource::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| source.parse_error(e))?;
    config.validate(&source)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[package]
name = "acme"
organization = "acme-co"
workspace_name = "payments api"
"#;

    #[test]
    fn test_parse_minimal() {
        let config = parse_str(MINIMAL).unwrap();
        assert_eq!(config.package.name, "acme");
        assert_eq!(config.package.namespace_export(), "AcmeCoPaymentsApi");
        assert_eq!(config.package.core_package, DEFAULT_CORE_PACKAGE);
        assert_eq!(config.package.target, Target::Sdk);
        assert!(!config.serde.allow_unrecognized_union_members);
        assert!(!config.types.include_other_in_union_types);
    }

    #[test]
    fn test_parse_full() {
        let config = parse_str(
            r#"
[package]
name = "acme"
organization = "acme"
workspace_name = "api"
namespace_export = "Acme"
core_package = "./core"
target = "express"

[serde]
allow_unrecognized_union_members = true
skip_unknown_keys_on_parse = true

[types]
include_utils_on_union_members = true
"#,
        )
        .unwrap();
        assert_eq!(config.package.namespace_export(), "Acme");
        assert_eq!(config.package.core_package, "./core");
        assert_eq!(config.package.target, Target::Express);
        assert!(config.serde.allow_unrecognized_union_members);
        assert!(config.serde.skip_unknown_keys_on_parse);
        assert!(!config.serde.include_unknown_keys_on_json);
        assert!(config.types.include_utils_on_union_members);
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = parse_str("[package]\nname = 3\n").unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let err = parse_str(&format!("{MINIMAL}target = \"fastify\"\n")).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let err = parse_str(&format!("{MINIMAL}\n[extras]\nfoo = 1\n")).unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_reserved_namespace_export() {
        let err = parse_str(&MINIMAL.replace(
            "workspace_name = \"payments api\"",
            "workspace_name = \"x\"\nnamespace_export = \"delete\"",
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "'delete' is a TypeScript reserved word");
        match *err {
            Error::Invalid { span, help, .. } => {
                assert!(span.is_some());
                assert!(help.unwrap().contains("namespace_export"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_package_name() {
        let err = parse_str(&MINIMAL.replace("name = \"acme\"", "name = \"\"")).unwrap_err();
        assert_eq!(err.to_string(), "package name cannot be empty");
    }

    #[test]
    fn test_derived_namespace_export_must_be_an_identifier() {
        let err = parse_str(&MINIMAL.replace("acme-co", "1st")).unwrap_err();
        assert_eq!(err.to_string(), "invalid namespace export '1stPaymentsApi'");
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/definitely/not/here/tsgen.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
