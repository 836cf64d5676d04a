//! AI assistance endpoints. Analysis happens server-side; the client only
//! forwards the idea text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::{ApiError, ApiGateway, ApiRequest};

/// Idea text submitted for analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaAnalysisRequest {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaAnalysis {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedSummary {
    #[serde(default)]
    pub summary: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiGateway {
    pub async fn analyze_idea(
        &self,
        idea: &IdeaAnalysisRequest,
    ) -> Result<IdeaAnalysis, ApiError> {
        self.request(ApiRequest::post("/ai/analyze-idea").json(idea)?)
            .await
    }

    pub async fn refine_summary(&self, text: &str) -> Result<RefinedSummary, ApiError> {
        self.request(ApiRequest::post("/ai/refine-summary").json(&json!({ "text": text }))?)
            .await
    }
}
