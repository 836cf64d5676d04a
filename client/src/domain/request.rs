//! Outgoing request model and header assembly.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::ApiError;
use super::session::SessionToken;

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// Default media type for request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verbs used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value carried by one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        bytes: Vec<u8>,
        mime: Option<String>,
    },
}

/// One named multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

/// Binary form upload. Requests carrying one never get a JSON content type;
/// the transport writes the multipart boundary header itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
        self
    }

    /// Append a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime: Option<String>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormValue::File {
                file_name: file_name.into(),
                bytes,
                mime,
            },
        });
        self
    }

    /// Fields in insertion order.
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Whether the body is a binary form upload.
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// A request relative to the configured API base URL.
///
/// # Examples
/// ```
/// use ideation_client::domain::{ApiRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = ApiRequest::patch("/ideas/42/stage")
///     .json(&json!({ "stage": "validation" }))
///     .unwrap();
/// assert_eq!(request.method(), HttpMethod::Patch);
/// assert_eq!(request.endpoint(), "/ideas/42/stage");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: HttpMethod,
    endpoint: String,
    body: RequestBody,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Build a request with an explicit method.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    /// `GET` request.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// `POST` request.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// `PUT` request.
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    /// `PATCH` request.
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, endpoint)
    }

    /// `DELETE` request.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the payload cannot be
    /// represented as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload).map_err(|error| {
            ApiError::invalid_request(format!("request body is not valid JSON: {error}"))
        })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a multipart form body.
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Add a caller header. Later values replace earlier ones with the same
    /// name (case-insensitive).
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub(crate) fn into_body(self) -> RequestBody {
        self.body
    }
}

/// Compute the final header set for a request.
///
/// Defaults come first (`Content-Type: application/json` unless the body is
/// multipart), caller headers override them, and the bearer credential is
/// appended last when a token is held. Callers cannot supply their own
/// `Authorization`, and multipart bodies never carry a caller content type.
pub(crate) fn assemble_headers(
    request: &ApiRequest,
    token: Option<&SessionToken>,
) -> Vec<(String, String)> {
    let multipart = request.body.is_multipart();
    let mut headers: Vec<(String, String)> = Vec::with_capacity(request.headers.len() + 2);
    if !multipart {
        headers.push((CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned()));
    }

    for (name, value) in &request.headers {
        if name.eq_ignore_ascii_case(AUTHORIZATION) {
            debug!(endpoint = %request.endpoint, "ignoring caller-supplied Authorization header");
            continue;
        }
        if multipart && name.eq_ignore_ascii_case(CONTENT_TYPE) {
            continue;
        }
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push((name.clone(), value.clone()));
    }

    if let Some(token) = token {
        headers.push((AUTHORIZATION.to_owned(), token.bearer_header()));
    }
    headers
}
