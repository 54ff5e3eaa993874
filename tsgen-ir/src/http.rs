//! HTTP services and endpoints.

use serde::{Deserialize, Serialize};

use crate::{DeclaredErrorName, DeclaredServiceName, Name, NameAndWireValue, TypeReference};

/// A group of endpoints declared in one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpService {
    pub name: DeclaredServiceName,
    #[serde(default)]
    pub base_path: HttpPath,
    #[serde(default)]
    pub headers: Vec<HttpHeader>,
    pub endpoints: Vec<HttpEndpoint>,
    #[serde(default)]
    pub docs: Option<String>,
}

impl HttpService {
    pub fn new(name: DeclaredServiceName) -> Self {
        Self {
            name,
            base_path: HttpPath::default(),
            headers: Vec::new(),
            endpoints: Vec::new(),
            docs: None,
        }
    }

    pub fn endpoint(mut self, endpoint: HttpEndpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEndpoint {
    pub id: String,
    pub name: Name,
    pub method: HttpMethod,
    #[serde(default)]
    pub path: HttpPath,
    #[serde(default)]
    pub path_parameters: Vec<PathParameter>,
    #[serde(default)]
    pub query_parameters: Vec<QueryParameter>,
    #[serde(default)]
    pub headers: Vec<HttpHeader>,
    #[serde(default)]
    pub request_body: Option<HttpRequestBody>,
    #[serde(default)]
    pub response: Option<HttpResponse>,
    #[serde(default)]
    pub errors: Vec<ResponseError>,
    #[serde(default)]
    pub docs: Option<String>,
}

impl HttpEndpoint {
    pub fn new(name: &str, method: HttpMethod, path: &str) -> Self {
        Self {
            id: name.to_string(),
            name: Name::new(name),
            method,
            path: HttpPath::literal(path),
            path_parameters: Vec::new(),
            query_parameters: Vec::new(),
            headers: Vec::new(),
            request_body: None,
            response: None,
            errors: Vec::new(),
            docs: None,
        }
    }

    pub fn with_request(mut self, body: TypeReference) -> Self {
        self.request_body = Some(HttpRequestBody {
            request_body_type: body,
            docs: None,
        });
        self
    }

    pub fn with_response(mut self, body: TypeReference) -> Self {
        self.response = Some(HttpResponse {
            response_body_type: body,
            docs: None,
        });
        self
    }

    pub fn with_error(mut self, error: DeclaredErrorName) -> Self {
        self.errors.push(ResponseError { error, docs: None });
        self
    }

    pub fn with_query(mut self, name: &str, value_type: TypeReference) -> Self {
        self.query_parameters.push(QueryParameter {
            name: NameAndWireValue::new(name),
            value_type,
            allow_multiple: false,
            docs: None,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A URL path with interleaved path parameters: `head{p0}tail0{p1}tail1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPath {
    pub head: String,
    #[serde(default)]
    pub parts: Vec<HttpPathPart>,
}

impl HttpPath {
    pub fn literal(path: &str) -> Self {
        Self {
            head: path.to_string(),
            parts: Vec::new(),
        }
    }
}

impl std::fmt::Display for HttpPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.head)?;
        for part in &self.parts {
            write!(f, "{{{}}}{}", part.path_parameter, part.tail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPathPart {
    pub path_parameter: String,
    pub tail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathParameter {
    pub name: Name,
    pub value_type: TypeReference,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    pub name: NameAndWireValue,
    pub value_type: TypeReference,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpHeader {
    pub name: NameAndWireValue,
    pub value_type: TypeReference,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestBody {
    pub request_body_type: TypeReference,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub response_body_type: TypeReference,
    #[serde(default)]
    pub docs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    pub error: DeclaredErrorName,
    #[serde(default)]
    pub docs: Option<String>,
}
