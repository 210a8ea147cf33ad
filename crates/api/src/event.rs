//! Invocation event contract.
//!
//! A [`ProjectRequest`] is the normalized request descriptor the hosting
//! function runtime hands to the handler, and a [`ProjectResponse`] is what
//! it sends back. Field names on the wire are camelCase
//! (`httpMethod`, `pathParams`, `statusCode`, ...).

use std::collections::{BTreeMap, HashMap};

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer, Serialize};

/// Value of `Access-Control-Allow-Origin` on every response.
pub const ALLOW_ORIGIN: &str = "*";

/// Methods advertised on a CORS preflight.
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Request headers advertised on a CORS preflight.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Preflight cache lifetime in seconds.
pub const MAX_AGE: &str = "86400";

/// Body assumed when the event carries none.
const EMPTY_OBJECT: &str = "{}";

/// Normalized HTTP request descriptor.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_params: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Carried for completeness; no operation reads it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: HashMap<String, String>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProjectRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            path_params: HashMap::new(),
            body: None,
            query_string_parameters: HashMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.path_params.insert("id".to_string(), id.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query_string_parameters = query;
        self
    }

    /// The raw `id` path parameter, if any.
    pub fn project_id(&self) -> Option<&str> {
        self.path_params.get("id").map(String::as_str)
    }

    /// The body to parse as JSON. Missing or blank bodies read as `{}`.
    pub fn json_body(&self) -> &str {
        match self.body.as_deref() {
            Some(body) if !body.trim().is_empty() => body,
            _ => EMPTY_OBJECT,
        }
    }
}

/// Normalized HTTP response descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ProjectResponse {
    /// CORS preflight answer: 200, empty body.
    pub fn preflight() -> Self {
        let headers = [
            ("Access-Control-Allow-Origin", ALLOW_ORIGIN),
            ("Access-Control-Allow-Methods", ALLOW_METHODS),
            ("Access-Control-Allow-Headers", ALLOW_HEADERS),
            ("Access-Control-Max-Age", MAX_AGE),
        ];
        Self {
            status_code: StatusCode::OK.as_u16(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }

    /// A JSON response with the standard content-type and origin headers.
    pub fn json(status: StatusCode, body: &serde_json::Value) -> Self {
        let headers = [
            ("Content-Type", "application/json"),
            ("Access-Control-Allow-Origin", ALLOW_ORIGIN),
        ];
        Self {
            status_code: status.as_u16(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

impl IntoResponse for ProjectResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }
        response
    }
}
