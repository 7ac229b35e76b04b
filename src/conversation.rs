//! Conversation log
//!
//! Append-only message records for one chat session. Messages are never
//! mutated or deleted; the whole log is destroyed when the session resets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Advisor,
}

/// A single message in the conversation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Monotonic, creation-order id within one session
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered message log for a single session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a message and return a reference to the stored record
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> &Message {
        let message = Message {
            id: self.next_id,
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        let index = self.messages.len();
        self.messages.push(message);
        &self.messages[index]
    }

    /// Iterate over all messages in chronological order
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message and restart the id counter
    pub fn clear(&mut self) {
        self.messages.clear();
        self.next_id = 1;
    }
}
