//! Chat message model
//!
//! Messages are created once (user messages on send, AI messages on reply)
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a message in the transcript, assigned at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Ai,
}

/// Three-way mood classification attached to AI messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// Badge presentation for a sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentStyle {
    pub label: &'static str,
    /// Text colour class for the badge
    pub class: &'static str,
    /// Bootstrap icon class
    pub icon: &'static str,
}

impl Sentiment {
    /// Parse a server label. Anything unrecognised maps to neutral.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn style(self) -> SentimentStyle {
        match self {
            Sentiment::Positive => SentimentStyle {
                label: "Positive",
                class: "text-success",
                icon: "bi-emoji-smile",
            },
            Sentiment::Negative => SentimentStyle {
                label: "Negative",
                class: "text-danger",
                icon: "bi-emoji-frown",
            },
            Sentiment::Neutral => SentimentStyle {
                label: "Neutral",
                class: "text-muted",
                icon: "bi-emoji-neutral",
            },
        }
    }

    /// Emoji used by the terminal client
    pub fn emoji(self) -> &'static str {
        match self {
            Sentiment::Positive => "🙂",
            Sentiment::Negative => "🙁",
            Sentiment::Neutral => "😐",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.style().label)
    }
}

/// One exchanged utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    /// Raw text as typed or received; sanitised only at render time
    pub text: String,
    pub timestamp: String,
    /// Only present on AI messages
    pub sentiment: Option<Sentiment>,
}

impl ChatMessage {
    pub fn user(id: MessageId, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id,
            sender: Sender::User,
            text: text.into(),
            timestamp: timestamp.into(),
            sentiment: None,
        }
    }

    pub fn ai(
        id: MessageId,
        text: impl Into<String>,
        timestamp: impl Into<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            id,
            sender: Sender::Ai,
            text: text.into(),
            timestamp: timestamp.into(),
            sentiment: Some(sentiment),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Local wall-clock time in the transcript's `10:00 AM` style
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%I:%M %p").to_string()
}
