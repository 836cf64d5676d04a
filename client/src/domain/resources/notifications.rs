//! Notification inbox and delivery preferences.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: ResourceId,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-channel delivery switches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub comments: bool,
    #[serde(default)]
    pub collaborations: bool,
    #[serde(default)]
    pub achievements: bool,
}

impl ApiGateway {
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.request(ApiRequest::get("/users/me/notifications"))
            .await
    }

    pub async fn update_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, ApiError> {
        self.request(ApiRequest::put("/users/me/settings/notifications").json(settings)?)
            .await
    }
}
