//! Authentication endpoints.
//!
//! Successful login and signup activate the returned token immediately and
//! cache the returned user, so callers never manage credentials themselves.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::users::UserProfile;
use crate::domain::{ApiError, ApiGateway, ApiRequest, SessionToken};

/// Credentials for `POST /auth/login`.
#[derive(Clone)]
pub struct LoginRequest {
    pub email: String,
    password: Zeroizing<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Serialize for LoginRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoginRequest", 2)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.as_str())?;
        state.end()
    }
}

/// New account details for `POST /auth/register`.
#[derive(Clone)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    password: Zeroizing<String>,
}

impl SignupRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Serialize for SignupRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SignupRequest", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.as_str())?;
        state.end()
    }
}

/// Body returned by login and signup.
#[derive(Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthResponse {
    /// Whether the backend issued a token.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returned user record as a typed profile, when present and well formed.
    pub fn profile(&self) -> Option<UserProfile> {
        self.user
            .as_ref()
            .and_then(|user| serde_json::from_value(user.clone()).ok())
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Body returned by `GET /auth/verify`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VerifiedSession {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiGateway {
    /// Sign in and activate the returned session.
    ///
    /// # Errors
    ///
    /// Propagates request failures. A token the backend issues but that is
    /// not a usable bearer credential yields [`ApiError::Decode`].
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        debug!(email = %credentials.email, "logging in");
        self.authenticate(ApiRequest::post("/auth/login").json(credentials)?)
            .await
    }

    /// Register an account and activate the returned session.
    ///
    /// # Errors
    ///
    /// Same as [`ApiGateway::login`].
    pub async fn signup(&self, account: &SignupRequest) -> Result<AuthResponse, ApiError> {
        debug!(email = %account.email, "registering account");
        self.authenticate(ApiRequest::post("/auth/register").json(account)?)
            .await
    }

    /// Ask the backend whether the held token is still valid.
    ///
    /// A rejected token clears the session like any other 401/403.
    pub async fn verify_session(&self) -> Result<VerifiedSession, ApiError> {
        self.request(ApiRequest::get("/auth/verify")).await
    }

    async fn authenticate(&self, request: ApiRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.request(request).await?;
        let Some(raw) = response.token.as_deref() else {
            warn!("authentication succeeded without a token; session unchanged");
            return Ok(response);
        };
        let token = SessionToken::new(raw).map_err(|error| {
            ApiError::decode(format!("backend issued an unusable session token: {error}"))
        })?;
        self.set_auth_token(Some(token))?;
        if let Some(user) = &response.user {
            self.cache_current_user(user)?;
        }
        Ok(response)
    }
}
