// src/models/chat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::subject::validate_not_blank;

pub const GREETING: &str =
    "Hi! I'm here to help you understand this question. Feel free to ask me anything about it!";

pub const TUTOR_REPLY: &str = "That's a great question! Let me help you understand this concept better. The key to solving this problem is to break it down step by step...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Tutor conversation attached to one question.
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    /// A fresh log opens with the tutor's greeting.
    pub fn new() -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        log.push(Sender::Ai, GREETING.to_string());
        log
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, sender: Sender, text: String) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_id.to_string(),
            text,
            sender,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000), custom(function = validate_not_blank))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_starts_with_greeting() {
        let log = ChatLog::new();
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].sender, Sender::Ai);
        assert_eq!(log.messages()[0].text, GREETING);
    }

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut log = ChatLog::new();
        let first = log.push(Sender::User, "why?".into());
        let second = log.push(Sender::Ai, TUTOR_REPLY.into());
        assert_eq!(first.id, "2");
        assert_eq!(second.id, "3");
        assert_eq!(log.messages().len(), 3);
    }

    #[test]
    fn test_blank_message_fails_validation() {
        let req = SendMessageRequest { text: "   ".into() };
        assert!(req.validate().is_err());
    }
}
