//! Typed operations over the backend's REST resources.
//!
//! Each submodule adds an `impl ApiGateway` block for one resource. DTOs use
//! camelCase on the wire and tolerate fields they do not know about; the
//! backend owns validation, so nothing here second-guesses payload content.

mod ai;
mod auth;
mod boards;
mod chat;
mod collaborations;
mod comments;
mod feed;
mod forum;
mod ideas;
mod notifications;
mod users;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use ai::{IdeaAnalysis, IdeaAnalysisRequest, RefinedSummary};
pub use auth::{AuthResponse, LoginRequest, SignupRequest, VerifiedSession};
pub use boards::{BoardCard, BoardColumn, BoardVersion, KanbanBoard};
pub use chat::{ChatMessage, Conversation, NewConversation};
pub use collaborations::{Collaboration, CollaborationRequest, CollaborationStatus};
pub use comments::Comment;
pub use feed::FeedPage;
pub use forum::ForumMessage;
pub use ideas::{Idea, IdeaDraft, IdeaQuery, IdeaStage, Vote};
pub use notifications::{Notification, NotificationSettings};
pub use users::{UserPatch, UserProfile};

/// Body of endpoints that only confirm an action.
///
/// Bodiless confirmations (`204`) deserialize to the default value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
