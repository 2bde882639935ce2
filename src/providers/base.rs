//! Base provider trait and common types
//!
//! This module defines the Provider trait that generative-language backends
//! implement, along with the conversation message type and the request
//! structure handed to a provider.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human using the chat
    User,
    /// The mentor replying through the provider
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message structure for conversation
///
/// Messages carry no identity beyond their position in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use trading_mentor::providers::{Message, Role};
    ///
    /// let msg = Message::user("Should I buy AAPL?");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use trading_mentor::providers::{Message, Role};
    ///
    /// let msg = Message::assistant("Check the RSI first.");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single text-generation request
///
/// Built fresh for every call from a conversation snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Conversation history, oldest first
    pub contents: Vec<Message>,
    /// Persona / context instruction
    pub system_instruction: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// Provider trait for generative-language backends
///
/// Implementations issue exactly one request per call and do not retry.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate a reply for the given request
    ///
    /// # Returns
    ///
    /// Returns the generated text, or `None` when the backend answered
    /// successfully but produced no text
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is invalid
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>>;

    /// Name of the model requests are sent to
    fn model(&self) -> String;
}
