//! Conversation history owned by a chat session

use crate::providers::Message;

/// Ordered, append-only list of messages, oldest first
///
/// Only `clear` removes messages; it restores the opening greeting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
    greeting: Option<String>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation that opens with an assistant greeting
    ///
    /// # Examples
    ///
    /// ```
    /// use trading_mentor::chat::Conversation;
    ///
    /// let conversation = Conversation::with_greeting("Welcome!");
    /// assert_eq!(conversation.len(), 1);
    /// ```
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            messages: vec![Message::assistant(greeting.clone())],
            greeting: Some(greeting),
        }
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message, if any
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation holds no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop all exchanged messages, keeping the greeting if there is one
    pub fn clear(&mut self) {
        self.messages.clear();
        if let Some(greeting) = &self.greeting {
            self.messages.push(Message::assistant(greeting.clone()));
        }
    }
}
