//! Conversation log and generation request state

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{GenerateResponse, SceneObject};
use tokio::sync::oneshot;

use crate::generator::GenerationError;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// System notice (backup, restore). Rendered on the user side.
    pub is_system: bool,
}

impl ChatMessage {
    fn new(role: ChatRole, text: String, is_system: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text,
            timestamp: Utc::now(),
            is_system,
        }
    }
}

/// Where the single in-flight generation request stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Awaiting {
        prompt: String,
        /// Scene as it was when the prompt was submitted
        scene_snapshot: Vec<SceneObject>,
    },
}

pub(crate) type PendingReply = oneshot::Receiver<Result<GenerateResponse, GenerationError>>;

/// Chat transcript plus the generation request state
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    /// Draft prompt being typed
    pub input: String,
    pub(crate) phase: GenerationPhase,
    pub(crate) pending: Option<PendingReply>,
    pub last_failed_input: Option<String>,
}

impl ChatState {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> &GenerationPhase {
        &self.phase
    }

    /// True while a request is in flight; submission is disabled
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, GenerationPhase::Awaiting { .. })
    }

    /// Whether the send button should be enabled for the current draft
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::User, text.into(), false));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::Model, text.into(), false));
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        let text = format!("[System] {}", text.into());
        self.messages.push(ChatMessage::new(ChatRole::User, text, true));
    }

    /// Drop the transcript. An in-flight request is left alone.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.input.clear();
        self.last_failed_input = None;
    }
}
