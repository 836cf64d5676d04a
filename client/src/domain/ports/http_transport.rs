//! Driven port for moving HTTP exchanges to and from the backend.
//!
//! The gateway hands over a fully resolved request (absolute URL, final
//! header set, body) and gets back the raw response. Transports never
//! interpret status codes; that stays in the domain.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;
use crate::domain::request::{HttpMethod, RequestBody};

/// Fully resolved outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// Final header set in send order.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl TransportRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response captured by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportResponse {
    pub status: u16,
    /// Reason phrase for the status, empty when unknown.
    pub status_text: String,
    pub content_type: Option<String>,
    /// Declared `Content-Length`, when the server sent one.
    pub content_length: Option<u64>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Failures that prevented any HTTP response from being received.
    pub enum TransportError {
        /// Connection could not be established or broke mid-exchange.
        Unreachable { message: String } =>
            "backend unreachable: {message}",
        /// The exchange exceeded the configured timeout.
        Timeout { message: String } =>
            "backend request timed out: {message}",
        /// The request body could not be encoded for the wire.
        Encode { message: String } =>
            "request encoding failed: {message}",
    }
}

/// Port for sending one HTTP exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and capture the full response body.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
