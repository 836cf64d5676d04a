//! Reqwest-backed transport adapter.
//!
//! This adapter owns wire details only: method and header translation, body
//! encoding, the request timeout, and capturing the raw response. Status
//! codes are passed through untouched for the domain to interpret.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};

use crate::domain::ports::{HttpTransport, TransportError, TransportRequest, TransportResponse};
use crate::domain::{FormValue, HttpMethod, MultipartForm, RequestBody};

/// Transport that performs requests with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(map_method(method), url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = attach_body(builder, body)?
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let content_type = header_text(response.headers(), CONTENT_TYPE.as_str());
        let content_length = header_text(response.headers(), CONTENT_LENGTH.as_str())
            .and_then(|raw| raw.trim().parse::<u64>().ok());
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            content_type,
            content_length,
            body: body.to_vec(),
        })
    }
}

fn map_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn attach_body(builder: RequestBuilder, body: RequestBody) -> Result<RequestBuilder, TransportError> {
    match body {
        RequestBody::Empty => Ok(builder),
        RequestBody::Json(value) => {
            let bytes = serde_json::to_vec(&value).map_err(|error| {
                TransportError::encode(format!("JSON body could not be encoded: {error}"))
            })?;
            Ok(builder.body(bytes))
        }
        RequestBody::Multipart(form) => Ok(builder.multipart(build_form(form)?)),
    }
}

fn build_form(form: MultipartForm) -> Result<Form, TransportError> {
    let mut multipart = Form::new();
    for part in form.parts().iter().cloned() {
        multipart = match part.value {
            FormValue::Text(text) => multipart.text(part.name, text),
            FormValue::File {
                file_name,
                bytes,
                mime,
            } => {
                let mut file = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = mime {
                    file = file.mime_str(&mime).map_err(|error| {
                        TransportError::encode(format!(
                            "invalid MIME type '{mime}' for part '{}': {error}",
                            part.name
                        ))
                    })?;
                }
                multipart.part(part.name, file)
            }
        };
    }
    Ok(multipart)
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_builder() {
        TransportError::encode(error.to_string())
    } else if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::unreachable(error.to_string())
    }
}
