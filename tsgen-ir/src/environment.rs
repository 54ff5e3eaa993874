use serde::{Deserialize, Serialize};

use crate::Name;

/// Named base URLs the generated client can target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentsConfig {
    /// Id of the environment used when the caller does not pick one.
    #[serde(default)]
    pub default_environment: Option<String>,
    pub environments: Vec<Environment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: Name,
    pub url: String,
    #[serde(default)]
    pub docs: Option<String>,
}

impl Environment {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            id: name.to_string(),
            name: Name::new(name),
            url: url.to_string(),
            docs: None,
        }
    }
}
