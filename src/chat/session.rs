//! Chat session: the consumer of the advice service
//!
//! A session owns the conversation and an `is_loading` flag. Submissions
//! are serialized: while one request is in flight every other submission
//! is ignored without touching the conversation or the advisor.

use crate::advisor::Advisor;
use crate::chat::Conversation;
use crate::providers::Message;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Result of a single submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The advisor answered; the reply was appended to the conversation
    Replied(String),
    /// Input was empty or whitespace-only; nothing happened
    Rejected,
    /// A request was already in flight; nothing happened
    Busy,
}

/// Interactive chat session
pub struct ChatSession {
    advisor: Arc<dyn Advisor>,
    conversation: Mutex<Conversation>,
    loading: AtomicBool,
}

/// Clears the loading flag when the in-flight submission ends or is dropped
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChatSession {
    /// Create a new session
    ///
    /// # Arguments
    ///
    /// * `advisor` - Service asked for a reply on each submission
    /// * `conversation` - Initial conversation, usually holding a greeting
    pub fn new(advisor: Arc<dyn Advisor>, conversation: Conversation) -> Self {
        Self {
            advisor,
            conversation: Mutex::new(conversation),
            loading: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Conversation> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a request is currently in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Snapshot of the conversation, oldest first
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages().to_vec()
    }

    /// Number of messages in the conversation
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the conversation holds no messages
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Reset the conversation to its greeting
    ///
    /// Returns false, leaving the conversation untouched, while a request
    /// is in flight.
    pub fn clear(&self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.lock().clear();
        true
    }

    /// Submit user input
    ///
    /// Appends the user message, asks the advisor with a snapshot that
    /// includes it, and appends the reply as an assistant message. The
    /// conversation lock is not held while waiting for the advisor.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::Rejected;
        }

        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Ignoring submission while a request is in flight");
            return SubmitOutcome::Busy;
        }
        let _guard = LoadingGuard(&self.loading);

        let snapshot = {
            let mut conversation = self.lock();
            conversation.push(Message::user(input));
            conversation.messages().to_vec()
        };

        tracing::debug!("Requesting advice for {} messages", snapshot.len());
        let reply = self.advisor.get_advice(&snapshot).await;

        self.lock().push(Message::assistant(reply.clone()));
        SubmitOutcome::Replied(reply)
    }
}
