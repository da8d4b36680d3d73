use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chat::format::{format_assistant_reply, signals_completion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    /// Local text (errors, hints) shown in the assistant's voice but never
    /// produced by the service.
    Notice,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub is_checklist: bool,
    pub sent_at: DateTime<Utc>,
}

/// Conversation shown to the user, oldest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Records what the user typed. Blank input is not sent and returns `None`;
    /// otherwise returns the text to forward to the service.
    pub fn push_user(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            content: text.to_string(),
            is_checklist: false,
            sent_at: Utc::now(),
        });
        Some(text.to_string())
    }

    /// Records an assistant reply after list-marker normalization.
    pub fn push_assistant(&mut self, raw: &str) -> &ChatMessage {
        let formatted = format_assistant_reply(raw);
        self.push(ChatMessage {
            role: Role::Assistant,
            content: formatted.text,
            is_checklist: formatted.is_checklist,
            sent_at: Utc::now(),
        })
    }

    /// Records a local notice without reformatting.
    pub fn push_notice(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage {
            role: Role::Notice,
            content: text.into(),
            is_checklist: false,
            sent_at: Utc::now(),
        })
    }

    /// Whether the service's assistant has said it has enough to build the
    /// CV. Local notices do not count.
    pub fn has_completion_signal(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.role == Role::Assistant && signals_completion(&m.content))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}
