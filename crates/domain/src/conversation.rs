//! Conversation turns — the replies produced for one inbound message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC time a reply was produced.
pub type Timestamp = DateTime<Utc>;

/// One reply sent back to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub timestamp: Timestamp,
}

/// Outcome of handling one inbound message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Replies in the order they were produced.
    pub replies: Vec<Reply>,
    /// Whether the handler ended the dialog.
    pub end_dialog: bool,
}

impl Turn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reply.
    pub fn send(&mut self, text: impl Into<String>) {
        self.replies.push(Reply {
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// Mark the dialog as ended.
    pub fn end_dialog(&mut self) {
        self.end_dialog = true;
    }

    /// Append a reply and end the dialog.
    pub fn send_and_end(&mut self, text: impl Into<String>) {
        self.send(text);
        self.end_dialog();
    }

    /// Texts of all replies, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.replies.iter().map(|reply| reply.text.as_str())
    }
}
