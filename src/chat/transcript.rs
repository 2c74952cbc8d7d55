//! Transcript
//!
//! Ordered list of rendered messages. Append-only during a session; the only
//! removal is [`Transcript::reset_to_welcome`], which always keeps the first
//! (welcome) entry.

use super::message::{ChatMessage, MessageId, Sender, Sentiment};

#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    /// Start a transcript with the counterpart's welcome entry
    pub fn new(welcome: impl Into<String>) -> Self {
        let welcome = ChatMessage {
            id: MessageId(0),
            sender: Sender::Ai,
            text: welcome.into(),
            timestamp: String::new(),
            sentiment: None,
        };

        Self {
            messages: vec![welcome],
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn push_user(&mut self, text: impl Into<String>, timestamp: impl Into<String>) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(ChatMessage::user(id, text, timestamp));
        id
    }

    pub fn push_ai(
        &mut self,
        text: impl Into<String>,
        timestamp: impl Into<String>,
        sentiment: Sentiment,
    ) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(ChatMessage::ai(id, text, timestamp, sentiment));
        id
    }

    /// Drop everything after the welcome entry
    pub fn reset_to_welcome(&mut self) {
        self.messages.truncate(1);
    }

    pub fn welcome(&self) -> &ChatMessage {
        &self.messages[0]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of entries including the welcome entry
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when only the welcome entry is present
    pub fn is_empty(&self) -> bool {
        self.messages.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_welcome() {
        let transcript = Transcript::new("Welcome");
        assert_eq!(transcript.len(), 1);
        assert!(transcript.is_empty());
        assert_eq!(transcript.welcome().text, "Welcome");
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut transcript = Transcript::new("Welcome");
        let a = transcript.push_user("one", "10:00 AM");
        let b = transcript.push_ai("two", "10:01 AM", Sentiment::Neutral);
        assert!(a < b);
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn test_reset_keeps_welcome() {
        let mut transcript = Transcript::new("Welcome");
        transcript.push_user("one", "10:00 AM");
        transcript.push_ai("two", "10:01 AM", Sentiment::Positive);

        transcript.reset_to_welcome();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.welcome().text, "Welcome");

        // Resetting an already reset transcript still keeps the welcome entry
        transcript.reset_to_welcome();
        assert_eq!(transcript.len(), 1);
    }
}
