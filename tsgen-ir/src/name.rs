//! Declaration names and their case renderings.

use serde::{Deserialize, Serialize};
use tsgen_core::{to_camel_case, to_pascal_case, to_screaming_snake_case, to_snake_case};

/// A name with every casing precomputed by the IR producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub original_name: String,
    pub camel_case: String,
    pub pascal_case: String,
    pub snake_case: String,
    pub screaming_snake_case: String,
}

impl Name {
    /// Compute every casing from an original name.
    pub fn new(original: &str) -> Self {
        Self {
            original_name: original.to_string(),
            camel_case: to_camel_case(original),
            pascal_case: to_pascal_case(original),
            snake_case: to_snake_case(original),
            screaming_snake_case: to_screaming_snake_case(original),
        }
    }
}

/// A name paired with the exact string used on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAndWireValue {
    pub wire_value: String,
    pub name: Name,
}

impl NameAndWireValue {
    /// A wire value whose name casings are derived from the wire value itself.
    pub fn new(wire_value: &str) -> Self {
        Self {
            wire_value: wire_value.to_string(),
            name: Name::new(wire_value),
        }
    }

    /// A wire value with a distinct in-memory name.
    pub fn renamed(wire_value: &str, name: &str) -> Self {
        Self {
            wire_value: wire_value.to_string(),
            name: Name::new(name),
        }
    }
}

/// Ordered namespace segments of a declaration (outermost first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackagePath(pub Vec<Name>);

impl PackagePath {
    pub fn new(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| Name::new(s)).collect())
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Name] {
        &self.0
    }

    /// The enclosing package, or `None` for the root.
    pub fn parent(&self) -> Option<PackagePath> {
        if self.is_root() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Slash-joined original names, used as a stable key and in messages.
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(|n| n.original_name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Name of a type declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredTypeName {
    pub type_id: String,
    pub package: PackagePath,
    pub name: Name,
}

impl DeclaredTypeName {
    pub fn new(package: &[&str], name: &str) -> Self {
        let package = PackagePath::new(package);
        Self {
            type_id: format!("type_{}:{}", package.key(), name),
            package,
            name: Name::new(name),
        }
    }
}

impl std::fmt::Display for DeclaredTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_id)
    }
}

/// Name of an error declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredErrorName {
    pub error_id: String,
    pub package: PackagePath,
    pub name: Name,
}

impl DeclaredErrorName {
    pub fn new(package: &[&str], name: &str) -> Self {
        let package = PackagePath::new(package);
        Self {
            error_id: format!("error_{}:{}", package.key(), name),
            package,
            name: Name::new(name),
        }
    }
}

impl std::fmt::Display for DeclaredErrorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error_id)
    }
}

/// Name of a service: services are identified by the package they live in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredServiceName {
    pub package: PackagePath,
}

impl DeclaredServiceName {
    pub fn new(package: &[&str]) -> Self {
        Self {
            package: PackagePath::new(package),
        }
    }
}

impl std::fmt::Display for DeclaredServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.package.is_root() {
            write!(f, "service_<root>")
        } else {
            write!(f, "service_{}", self.package.key())
        }
    }
}
