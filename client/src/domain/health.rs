//! Advisory health check.
//!
//! The check bypasses the authenticated request path entirely: no bearer
//! header, no response normalisation and no session side effects. Every
//! outcome folds into a [`HealthStatus`].

use serde::Serialize;
use tracing::debug;

use super::gateway::ApiGateway;
use super::ports::TransportRequest;
use super::request::{HttpMethod, RequestBody};

/// Result of a health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    /// Whether the backend answered with a success status.
    pub status: bool,
    pub message: String,
}

impl HealthStatus {
    fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
        }
    }

    fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
        }
    }
}

impl ApiGateway {
    /// Check `{base without /api}/health`. Never fails.
    pub async fn health_check(&self) -> HealthStatus {
        let url = self.base_url().health_url();
        debug!(%url, "probing backend health");
        let request = TransportRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: RequestBody::Empty,
        };
        match self.transport().send(request).await {
            Ok(response) if response.is_success() => {
                HealthStatus::healthy(format!("backend is healthy (HTTP {})", response.status))
            }
            Ok(response) => {
                let reason = response.status_text.trim();
                if reason.is_empty() {
                    HealthStatus::unhealthy(format!("health check failed: HTTP {}", response.status))
                } else {
                    HealthStatus::unhealthy(format!(
                        "health check failed: HTTP {} {reason}",
                        response.status
                    ))
                }
            }
            Err(error) => HealthStatus::unhealthy(format!("cannot reach server: {error}")),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Health check coverage.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ApiBaseUrl;
    use crate::domain::gateway::ApiGatewayPorts;
    use crate::domain::ports::{
        InMemorySessionStore, MockAuthRejectionReaction, MockHttpTransport, TransportError,
        TransportResponse,
    };
    use crate::domain::session::SessionToken;

    fn gateway(transport: MockHttpTransport) -> ApiGateway {
        let mut reaction = MockAuthRejectionReaction::new();
        reaction.expect_session_rejected().never();
        let token = SessionToken::new("abc123").expect("valid token");
        ApiGateway::new(
            ApiGatewayPorts {
                transport: Arc::new(transport),
                store: Arc::new(InMemorySessionStore::with_token(token)),
                reaction: Arc::new(reaction),
            },
            ApiBaseUrl::parse("http://backend.test/api").expect("valid base"),
        )
    }

    #[tokio::test]
    async fn healthy_backend_reports_true_without_credentials() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.url.as_str() == "http://backend.test/health"
                    && request.header("Authorization").is_none()
            })
            .times(1)
            .returning(|_| {
                Ok(TransportResponse {
                    status: 200,
                    status_text: "OK".to_owned(),
                    ..TransportResponse::default()
                })
            });

        let health = gateway(transport).health_check().await;
        assert!(health.status);
    }

    #[tokio::test]
    async fn rejected_check_keeps_the_session() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().returning(|_| {
            Ok(TransportResponse {
                status: 401,
                status_text: "Unauthorized".to_owned(),
                ..TransportResponse::default()
            })
        });

        let gateway = gateway(transport);
        let health = gateway.health_check().await;
        assert!(!health.status);
        assert_eq!(health.message, "health check failed: HTTP 401 Unauthorized");
        assert!(gateway.is_authenticated());
    }

    #[tokio::test]
    async fn unreachable_backend_reports_false() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(TransportError::unreachable("connection refused")));

        let health = gateway(transport).health_check().await;
        assert!(!health.status);
        assert!(health.message.contains("connection refused"));
    }
}
