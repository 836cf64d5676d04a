//! Per-idea discussion forum.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::Acknowledgement;
use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumMessage {
    pub id: ResourceId,
    pub content: String,
    #[serde(default)]
    pub author_id: Option<ResourceId>,
    #[serde(default)]
    pub parent_id: Option<ResourceId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiGateway {
    pub async fn forum_messages(&self, idea: &ResourceId) -> Result<Vec<ForumMessage>, ApiError> {
        self.request(ApiRequest::get(format!("/ideas/{idea}/forum/messages")))
            .await
    }

    /// Post to an idea's forum, optionally as a reply to `parent`.
    pub async fn post_forum_message(
        &self,
        idea: &ResourceId,
        content: &str,
        parent: Option<&ResourceId>,
    ) -> Result<ForumMessage, ApiError> {
        let payload = match parent {
            Some(parent) => json!({ "content": content, "parentId": parent }),
            None => json!({ "content": content }),
        };
        self.request(ApiRequest::post(format!("/ideas/{idea}/forum/messages")).json(&payload)?)
            .await
    }

    /// Delete a forum message. The backend answers `204`.
    pub async fn delete_forum_message(&self, id: &ResourceId) -> Result<Acknowledgement, ApiError> {
        self.request(ApiRequest::delete(format!("/forum/messages/{id}")))
            .await
    }
}
