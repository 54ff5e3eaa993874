use serde::{Deserialize, Serialize};

use crate::{Name, NameAndWireValue, TypeReference};

/// Authentication schemes accepted by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiAuth {
    #[serde(default)]
    pub requirement: AuthRequirement,
    #[serde(default)]
    pub schemes: Vec<AuthScheme>,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthRequirement {
    #[default]
    All,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthScheme {
    Bearer {
        token: Name,
    },
    Basic {
        username: Name,
        password: Name,
    },
    #[serde(rename_all = "camelCase")]
    Header {
        name: NameAndWireValue,
        value_type: TypeReference,
        #[serde(default)]
        prefix: Option<String>,
    },
}
