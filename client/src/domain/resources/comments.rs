//! Comments on ideas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: ResourceId,
    pub body: String,
    #[serde(default)]
    pub author_id: Option<ResourceId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiGateway {
    pub async fn comments(&self, idea: &ResourceId) -> Result<Vec<Comment>, ApiError> {
        self.request(ApiRequest::get(format!("/ideas/{idea}/comments")))
            .await
    }

    pub async fn add_comment(&self, idea: &ResourceId, body: &str) -> Result<Comment, ApiError> {
        self.request(
            ApiRequest::post(format!("/ideas/{idea}/comments")).json(&json!({ "body": body }))?,
        )
        .await
    }
}
