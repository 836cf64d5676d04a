//! Kanban boards attached to ideas, with saved versions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCard {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<BoardCard>,
}

/// Whole board state. Saving replaces the stored board.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanBoard {
    #[serde(default)]
    pub columns: Vec<BoardColumn>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Named snapshot of a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardVersion {
    pub id: ResourceId,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub board: Option<KanbanBoard>,
}

impl ApiGateway {
    pub async fn save_board(
        &self,
        idea: &ResourceId,
        board: &KanbanBoard,
    ) -> Result<KanbanBoard, ApiError> {
        self.request(ApiRequest::put(format!("/ideas/{idea}/board")).json(board)?)
            .await
    }

    pub async fn board_versions(&self, idea: &ResourceId) -> Result<Vec<BoardVersion>, ApiError> {
        self.request(ApiRequest::get(format!("/ideas/{idea}/board/versions")))
            .await
    }

    /// Snapshot the current board under `label`.
    pub async fn create_board_version(
        &self,
        idea: &ResourceId,
        label: &str,
    ) -> Result<BoardVersion, ApiError> {
        self.request(
            ApiRequest::post(format!("/ideas/{idea}/board/versions"))
                .json(&json!({ "label": label }))?,
        )
        .await
    }
}
