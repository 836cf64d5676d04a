//! User profile endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

/// Public profile of a platform member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: ResourceId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial profile update; unset fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl ApiGateway {
    pub async fn user(&self, id: &ResourceId) -> Result<UserProfile, ApiError> {
        self.request(ApiRequest::get(format!("/users/{id}"))).await
    }

    pub async fn update_user(
        &self,
        id: &ResourceId,
        patch: &UserPatch,
    ) -> Result<UserProfile, ApiError> {
        self.request(ApiRequest::put(format!("/users/{id}")).json(patch)?)
            .await
    }

    /// Profile of the signed-in user.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.request(ApiRequest::get("/users/me")).await
    }

    /// Update the signed-in user's profile and refresh the cached record.
    ///
    /// # Errors
    ///
    /// Propagates request failures and [`ApiError::Session`] when the cache
    /// cannot be written.
    pub async fn update_me(&self, patch: &UserPatch) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self
            .request(ApiRequest::put("/users/me").json(patch)?)
            .await?;
        let cached = serde_json::to_value(&profile)
            .map_err(|error| ApiError::decode(format!("profile is not serialisable: {error}")))?;
        self.cache_current_user(&cached)?;
        Ok(profile)
    }
}
