//! Advice request service
//!
//! Turns a conversation snapshot into exactly one assistant reply. Every
//! outcome is a reply-shaped string: provider failures are logged and
//! replaced by a fixed message, so callers never see an error.

use crate::config::MentorConfig;
use crate::error::MentorError;
use crate::providers::{GenerationRequest, Message, Provider};
use async_trait::async_trait;

/// Reply used when the provider succeeds without producing text
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "The mentor returned an empty response. Please try rephrasing your question.";

/// Reply used when the credential was rejected or is missing
pub const REAUTHORIZE_MESSAGE: &str =
    "The API key was rejected. Please re-authorize with a valid key and try again.";

/// Prefix of the reply used for every other failure
pub const LINK_FAILURE_MESSAGE: &str = "Link failure: could not reach the mentor service.";

/// Anything that can answer a conversation with a single reply
///
/// Implementations must not fail: errors are folded into the returned text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Produce one assistant reply for the conversation so far
    async fn get_advice(&self, history: &[Message]) -> String;
}

/// Classification of a failed provider call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The credential was rejected or absent
    Authorization,
    /// Transport, parsing, or any other API failure
    Generic,
}

/// Classify a provider error
///
/// Structured information on `MentorError` is consulted first. Text
/// matching on the rendered error only runs when nothing in the chain is
/// structured, so digits in a URL or port never decide the outcome.
///
/// # Examples
///
/// ```
/// use trading_mentor::advisor::{classify_failure, FailureKind};
///
/// let err = anyhow::anyhow!("HTTP 403 Forbidden");
/// assert_eq!(classify_failure(&err), FailureKind::Authorization);
///
/// let err = anyhow::anyhow!("network timeout");
/// assert_eq!(classify_failure(&err), FailureKind::Generic);
/// ```
pub fn classify_failure(error: &anyhow::Error) -> FailureKind {
    let mut structured = false;
    for cause in error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<MentorError>())
    {
        if cause.is_authorization_failure() {
            return FailureKind::Authorization;
        }
        structured |= cause.is_structured();
    }
    if structured {
        return FailureKind::Generic;
    }

    let text = format!("{:#}", error).to_ascii_lowercase();
    if text.contains("entity was not found") || text.contains("403") {
        FailureKind::Authorization
    } else {
        FailureKind::Generic
    }
}

/// Render the reply that stands in for a failed call
pub fn failure_reply(error: &anyhow::Error) -> String {
    match classify_failure(error) {
        FailureKind::Authorization => REAUTHORIZE_MESSAGE.to_string(),
        FailureKind::Generic => {
            let detail = format!("{:#}", error);
            if detail.trim().is_empty() {
                LINK_FAILURE_MESSAGE.to_string()
            } else {
                format!("{} ({})", LINK_FAILURE_MESSAGE, detail)
            }
        }
    }
}

/// Advice service backed by a generative-language provider
///
/// Holds the provider and the persona settings attached to every request.
pub struct AdviceService {
    provider: Box<dyn Provider>,
    system_instruction: String,
    temperature: f32,
}

impl AdviceService {
    /// Create a new advice service
    ///
    /// # Arguments
    ///
    /// * `provider` - Backend used for every request
    /// * `mentor` - System instruction and temperature
    pub fn new(provider: Box<dyn Provider>, mentor: &MentorConfig) -> Self {
        Self {
            provider,
            system_instruction: mentor.system_instruction.clone(),
            temperature: mentor.temperature,
        }
    }

    /// Model requests are sent to
    pub fn model(&self) -> String {
        self.provider.model()
    }

    fn build_request(&self, history: &[Message]) -> GenerationRequest {
        GenerationRequest {
            contents: history.to_vec(),
            system_instruction: self.system_instruction.clone(),
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl Advisor for AdviceService {
    async fn get_advice(&self, history: &[Message]) -> String {
        let request = self.build_request(history);

        match self.provider.generate(&request).await {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                tracing::warn!("Provider returned no text for {} messages", history.len());
                EMPTY_RESPONSE_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::error!(error = ?e, "Advice request failed: {:#}", e);
                failure_reply(&e)
            }
        }
    }
}
