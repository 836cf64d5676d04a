//! Collaboration requests between members and idea owners.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

/// Decision state of a collaboration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Payload for asking to join an idea.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub idea_id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub id: ResourceId,
    #[serde(default)]
    pub idea_id: Option<ResourceId>,
    pub status: CollaborationStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiGateway {
    pub async fn request_collaboration(
        &self,
        request: &CollaborationRequest,
    ) -> Result<Collaboration, ApiError> {
        self.request(ApiRequest::post("/collaborations").json(request)?)
            .await
    }

    /// Accept or reject a pending request.
    pub async fn update_collaboration_status(
        &self,
        id: &ResourceId,
        status: CollaborationStatus,
    ) -> Result<Collaboration, ApiError> {
        self.request(
            ApiRequest::patch(format!("/collaborations/{id}/status"))
                .json(&json!({ "status": status }))?,
        )
        .await
    }
}
