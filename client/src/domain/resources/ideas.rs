//! Idea endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use url::form_urlencoded;

use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

/// Lifecycle stage of an idea on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaStage {
    Concept,
    Validation,
    Prototype,
    Launch,
    /// Any stage this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// An idea as listed in the catalogue and feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stage: Option<IdeaStage>,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author_id: Option<ResourceId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for publishing a new idea.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Filters for listing ideas. Unset filters are omitted from the query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdeaQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub stage: Option<IdeaStage>,
    pub search: Option<String>,
}

impl IdeaQuery {
    fn endpoint(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.page {
            query.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(stage) = self.stage.and_then(stage_name) {
            query.append_pair("stage", stage);
        }
        if let Some(search) = self.search.as_deref().filter(|term| !term.is_empty()) {
            query.append_pair("search", search);
        }
        let query = query.finish();
        if query.is_empty() {
            "/ideas".to_owned()
        } else {
            format!("/ideas?{query}")
        }
    }
}

fn stage_name(stage: IdeaStage) -> Option<&'static str> {
    match stage {
        IdeaStage::Concept => Some("concept"),
        IdeaStage::Validation => Some("validation"),
        IdeaStage::Prototype => Some("prototype"),
        IdeaStage::Launch => Some("launch"),
        IdeaStage::Unknown => None,
    }
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

impl ApiGateway {
    pub async fn ideas(&self, query: &IdeaQuery) -> Result<Vec<Idea>, ApiError> {
        self.request(ApiRequest::get(query.endpoint())).await
    }

    pub async fn create_idea(&self, draft: &IdeaDraft) -> Result<Idea, ApiError> {
        self.request(ApiRequest::post("/ideas").json(draft)?).await
    }

    /// Move an idea to another lifecycle stage.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidRequest`] for [`IdeaStage::Unknown`], which has no
    /// wire name; otherwise request failures.
    pub async fn update_idea_stage(
        &self,
        id: &ResourceId,
        stage: IdeaStage,
    ) -> Result<Idea, ApiError> {
        let stage = stage_name(stage)
            .ok_or_else(|| ApiError::invalid_request("cannot move an idea to an unknown stage"))?;
        self.request(
            ApiRequest::patch(format!("/ideas/{id}/stage")).json(&json!({ "stage": stage }))?,
        )
        .await
    }

    pub async fn vote_idea(&self, id: &ResourceId, vote: Vote) -> Result<Idea, ApiError> {
        self.request(ApiRequest::post(format!("/ideas/{id}/vote")).json(&json!({ "vote": vote }))?)
            .await
    }
}
