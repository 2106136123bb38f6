//! Transcript: the ordered history of chat messages.

use serde::Serialize;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The collaborator (or the widget speaking on its behalf).
    Bot,
}

impl Sender {
    /// Lowercase name, as used in CSS classes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// A single rendered chat message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    text: String,
    sender: Sender,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Create a bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Append-only message list whose first entry is the greeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript that starts with a bot greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::bot(greeting)],
        }
    }

    /// Append a message and return a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Drop everything but the first message. Returns how many were removed.
    pub fn truncate_to_first(&mut self) -> usize {
        let removed = self.messages.len().saturating_sub(1);
        self.messages.truncate(1);
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Messages appended after the first `from` entries.
    #[must_use]
    pub fn since(&self, from: usize) -> &[Message] {
        self.messages.get(from..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_greeting() {
        let mut transcript = Transcript::with_greeting("Hola");
        transcript.push(Message::user("a"));
        transcript.push(Message::bot("b"));

        assert_eq!(transcript.truncate_to_first(), 2);
        assert_eq!(transcript.messages(), &[Message::bot("Hola")]);
    }

    #[test]
    fn test_truncate_empty() {
        let mut transcript = Transcript::default();
        assert_eq!(transcript.truncate_to_first(), 0);
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_since() {
        let mut transcript = Transcript::with_greeting("Hola");
        transcript.push(Message::user("a"));
        assert_eq!(transcript.since(1), &[Message::user("a")]);
        assert!(transcript.since(5).is_empty());
    }
}
