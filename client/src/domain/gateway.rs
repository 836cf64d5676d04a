//! The API gateway: the single choke point for backend traffic.
//!
//! The gateway owns the session token, turns [`ApiRequest`]s into resolved
//! transport requests, normalises responses and reacts to rejected sessions.
//! Typed resource operations live in [`crate::domain::resources`] as further
//! `impl ApiGateway` blocks.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::ApiBaseUrl;
use super::error::ApiError;
use super::ports::{
    AuthRejection, AuthRejectionReaction, HttpTransport, SessionStore, TransportRequest,
};
use super::request::{ApiRequest, assemble_headers};
use super::response::normalise_response;
use super::session::SessionToken;

/// Driven ports the gateway is wired to.
#[derive(Clone)]
pub struct ApiGatewayPorts {
    pub transport: Arc<dyn HttpTransport>,
    pub store: Arc<dyn SessionStore>,
    pub reaction: Arc<dyn AuthRejectionReaction>,
}

/// Client for the ideation backend.
///
/// # Examples
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use ideation_client::domain::{ApiBaseUrl, ApiGateway, ApiGatewayPorts, ApiRequest};
/// # use ideation_client::domain::ports::{InMemorySessionStore, NoOpAuthRejection};
/// # use ideation_client::outbound::http::ReqwestTransport;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = ApiGateway::new(
///     ApiGatewayPorts {
///         transport: Arc::new(ReqwestTransport::new(std::time::Duration::from_secs(10))?),
///         store: Arc::new(InMemorySessionStore::new()),
///         reaction: Arc::new(NoOpAuthRejection),
///     },
///     ApiBaseUrl::parse("https://api.example.org/api")?,
/// );
/// let feed = gateway.request_value(ApiRequest::get("/feed")).await?;
/// println!("{feed}");
/// # Ok(())
/// # }
/// ```
pub struct ApiGateway {
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn SessionStore>,
    reaction: Arc<dyn AuthRejectionReaction>,
    base_url: ApiBaseUrl,
    token: Mutex<Option<SessionToken>>,
}

impl fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl ApiGateway {
    /// Wire a gateway and adopt any token already persisted in the store.
    ///
    /// An unreadable store is logged and treated as signed out.
    pub fn new(ports: ApiGatewayPorts, base_url: ApiBaseUrl) -> Self {
        let ApiGatewayPorts {
            transport,
            store,
            reaction,
        } = ports;
        let token = match store.token() {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "persisted session token unreadable; starting signed out");
                None
            }
        };
        Self {
            transport,
            store,
            reaction,
            base_url,
            token: Mutex::new(token),
        }
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Token attached to outgoing requests, if any.
    pub fn auth_token(&self) -> Option<SessionToken> {
        self.token_slot().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token_slot().is_some()
    }

    /// Activate or remove the session token.
    ///
    /// `Some` holds the token in memory and persists it; `None` forgets it
    /// and removes the stored entry. The in-memory state changes even when
    /// persistence fails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Session`] when the store cannot be written.
    pub fn set_auth_token(&self, token: Option<SessionToken>) -> Result<(), ApiError> {
        match token {
            Some(token) => {
                *self.token_slot() = Some(token.clone());
                self.store.set_token(&token)?;
            }
            None => {
                *self.token_slot() = None;
                self.store.clear_token()?;
            }
        }
        Ok(())
    }

    /// Cached record of the signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Session`] when the store cannot be read.
    pub fn current_user(&self) -> Result<Option<Value>, ApiError> {
        Ok(self.store.current_user()?)
    }

    pub(crate) fn cache_current_user(&self, user: &Value) -> Result<(), ApiError> {
        Ok(self.store.set_current_user(user)?)
    }

    /// Forget the token and the cached user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Session`] when the store cannot be cleared.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.set_auth_token(None)?;
        self.store.clear_current_user()?;
        debug!("session cleared by logout");
        Ok(())
    }

    /// Send a request and deserialize the JSON result.
    ///
    /// Bodiless success responses deserialize from `{}`.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::request_value`]; additionally returns
    /// [`ApiError::Decode`] when the JSON does not match `T`.
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let endpoint = request.endpoint().to_owned();
        let value = self.request_value(request).await?;
        serde_json::from_value(value).map_err(|error| {
            ApiError::decode(format!("unexpected response shape from {endpoint}: {error}"))
        })
    }

    /// Send a request and return the raw JSON result.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] when no response arrived.
    /// - [`ApiError::Application`] for non-2xx responses. 401 and 403 also
    ///   clear the session and fire the auth-rejection reaction first.
    /// - [`ApiError::Decode`] for malformed success bodies.
    /// - [`ApiError::InvalidRequest`] for unusable endpoints or bodies.
    pub async fn request_value(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.base_url.join(request.endpoint())?;
        let token = self.auth_token();
        let headers = assemble_headers(&request, token.as_ref());
        let method = request.method();
        let endpoint = request.endpoint().to_owned();
        let outgoing = TransportRequest {
            method,
            url,
            headers,
            body: request.into_body(),
        };

        debug!(%method, %endpoint, authenticated = token.is_some(), "sending API request");
        let response = self.transport.send(outgoing).await.map_err(|error| {
            warn!(%method, %endpoint, %error, "API request failed before a response arrived");
            ApiError::from(error)
        })?;
        debug!(%method, %endpoint, status = response.status, "API response received");

        normalise_response(&response).inspect_err(|error| {
            if error.is_auth_rejection() {
                self.invalidate_session(AuthRejection {
                    status: response.status,
                    endpoint: endpoint.clone(),
                });
            }
        })
    }

    /// Hard reset after a 401/403: drop every trace of the session, then
    /// hand over to the injected reaction exactly once.
    fn invalidate_session(&self, rejection: AuthRejection) {
        warn!(
            status = rejection.status,
            endpoint = %rejection.endpoint,
            "backend rejected the session; clearing local session state"
        );
        *self.token_slot() = None;
        if let Err(error) = self.store.clear_token() {
            warn!(%error, "failed to clear persisted session token");
        }
        if let Err(error) = self.store.clear_current_user() {
            warn!(%error, "failed to clear cached current user");
        }
        self.reaction.session_rejected(&rejection);
    }

    pub(crate) fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }

    fn token_slot(&self) -> MutexGuard<'_, Option<SessionToken>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
