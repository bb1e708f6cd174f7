//! Chat panel — open/closed state and the in-memory transcript.
//!
//! Replies come from the chat rule table in `intent`. The transcript lives
//! only as long as the panel value; nothing here is persisted.

use serde::Serialize;

use crate::intent::{self, CHAT_GREETING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPanel {
    open: bool,
    messages: Vec<ChatMessage>,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanel {
    /// Closed panel seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            open: false,
            messages: vec![ChatMessage {
                sender: Sender::Bot,
                text: CHAT_GREETING.to_string(),
            }],
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Post a user message and the assistant's reply.
    ///
    /// Surrounding whitespace is trimmed; blank input is ignored and yields
    /// no reply.
    pub fn send(&mut self, text: &str) -> Option<&'static str> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let reply = intent::chat_reply(text);
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: text.to_string(),
        });
        self.messages.push(ChatMessage {
            sender: Sender::Bot,
            text: reply.to_string(),
        });
        Some(reply)
    }
}
