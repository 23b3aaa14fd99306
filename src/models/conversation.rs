use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::booking::BookingForm;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Idle,
    AwaitingConfirmation,
    CollectingForm,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::AwaitingConfirmation => "awaiting_confirmation",
            ConversationState::CollectingForm => "collecting_form",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationMessage {
    pub role: String,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Per-conversation state carried between turns. Lives only in memory.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub messages: Vec<ConversationMessage>,
    pub state: ConversationState,
    pub form: BookingForm,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, welcome: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let mut messages = Vec::new();
        if !welcome.is_empty() {
            messages.push(ConversationMessage::assistant(welcome));
        }
        Self {
            id: id.into(),
            messages,
            state: ConversationState::Idle,
            form: BookingForm::default(),
            created_at: now,
            last_activity: now,
            expires_at: now + ttl,
        }
    }

    pub fn awaiting_schedule_confirmation(&self) -> bool {
        self.state == ConversationState::AwaitingConfirmation
    }

    pub fn show_schedule_form(&self) -> bool {
        self.state == ConversationState::CollectingForm
    }

    pub fn push_user(&mut self, content: &str) {
        self.messages.push(ConversationMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: &str) {
        self.messages.push(ConversationMessage::assistant(content));
    }

    pub fn touch(&mut self, ttl: Duration) {
        let now = Utc::now();
        self.last_activity = now;
        self.expires_at = now + ttl;
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Closes any open sub-dialog and drops the partially collected form.
    pub fn reset(&mut self) {
        self.state = ConversationState::Idle;
        self.form = BookingForm::default();
    }
}

/// What one turn produced, returned to whichever surface drove it.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<super::Route>,
    pub state: ConversationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<serde_json::Value>,
}
