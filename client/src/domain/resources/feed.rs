//! Personalised feed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ideas::Idea;
use crate::domain::{ApiError, ApiGateway, ApiRequest};

/// One page of the feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    #[serde(default)]
    pub items: Vec<Idea>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiGateway {
    /// Fetch a feed page; `None` lets the backend pick the first page.
    pub async fn feed(&self, page: Option<u32>) -> Result<FeedPage, ApiError> {
        let endpoint = match page {
            Some(page) => format!("/feed?page={page}"),
            None => "/feed".to_owned(),
        };
        self.request(ApiRequest::get(endpoint)).await
    }
}
