use serde::{Deserialize, Serialize};

use crate::{DeclaredErrorName, NameAndWireValue, TypeReference};

/// An error an endpoint can respond with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDeclaration {
    pub name: DeclaredErrorName,
    /// Value written under the endpoint error discriminant.
    pub discriminant_value: NameAndWireValue,
    pub status_code: u16,
    /// Body carried by the error, if any.
    #[serde(default, rename = "type")]
    pub type_: Option<TypeReference>,
    #[serde(default)]
    pub docs: Option<String>,
}

impl ErrorDeclaration {
    pub fn new(name: DeclaredErrorName, status_code: u16) -> Self {
        let discriminant_value = NameAndWireValue::new(&name.name.original_name);
        Self {
            name,
            discriminant_value,
            status_code,
            type_: None,
            docs: None,
        }
    }

    pub fn with_body(mut self, body: TypeReference) -> Self {
        self.type_ = Some(body);
        self
    }
}
