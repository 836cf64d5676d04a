//! Direct conversations and message reactions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::Acknowledgement;
use crate::domain::{ApiError, ApiGateway, ApiRequest, ResourceId};

/// Payload for opening a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConversation {
    pub participant_ids: Vec<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea_id: Option<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ResourceId,
    #[serde(default)]
    pub participant_ids: Vec<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: ResourceId,
    pub content: String,
    #[serde(default)]
    pub sender_id: Option<ResourceId>,
    #[serde(default)]
    pub reactions: Map<String, Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ApiGateway {
    pub async fn create_conversation(
        &self,
        conversation: &NewConversation,
    ) -> Result<Conversation, ApiError> {
        self.request(ApiRequest::post("/chat/conversations").json(conversation)?)
            .await
    }

    pub async fn messages(&self, conversation: &ResourceId) -> Result<Vec<ChatMessage>, ApiError> {
        self.request(ApiRequest::get(format!(
            "/chat/conversations/{conversation}/messages"
        )))
        .await
    }

    pub async fn send_message(
        &self,
        conversation: &ResourceId,
        content: &str,
    ) -> Result<ChatMessage, ApiError> {
        self.request(
            ApiRequest::post(format!("/chat/conversations/{conversation}/messages"))
                .json(&json!({ "content": content }))?,
        )
        .await
    }

    pub async fn react_to_message(
        &self,
        message: &ResourceId,
        emoji: &str,
    ) -> Result<Acknowledgement, ApiError> {
        self.request(
            ApiRequest::post(format!("/chat/messages/{message}/reactions"))
                .json(&json!({ "emoji": emoji }))?,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::HttpMethod;
    use crate::domain::resources::test_support::{gateway_expecting, json_body};

    #[tokio::test]
    async fn messages_are_posted_to_the_conversation() {
        let (gateway, _store) = gateway_expecting(
            HttpMethod::Post,
            "/chat/conversations/t1/messages",
            |request| json_body(request) == json!({ "content": "hello" }),
            json!({ "id": "m1", "content": "hello" }),
        );
        let conversation = ResourceId::new("t1").expect("valid id");
        let message = gateway
            .send_message(&conversation, "hello")
            .await
            .expect("sent");
        assert_eq!(message.content, "hello");
    }

    #[tokio::test]
    async fn reactions_accept_bare_acknowledgements() {
        let (gateway, _store) = gateway_expecting(
            HttpMethod::Post,
            "/chat/messages/m1/reactions",
            |request| json_body(request) == json!({ "emoji": "🚀" }),
            json!({ "success": true }),
        );
        let message = ResourceId::new("m1").expect("valid id");
        let ack = gateway
            .react_to_message(&message, "🚀")
            .await
            .expect("reacted");
        assert_eq!(ack.success, Some(true));
    }
}
