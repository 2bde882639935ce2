//! Provider module
//!
//! This module contains the generative-language provider abstraction and
//! the Gemini implementation.

pub mod base;
pub mod gemini;

pub use base::{GenerationRequest, Message, Provider, Role};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::credentials::resolve_api_key;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// Resolves the credential at runtime before constructing the client.
///
/// # Errors
///
/// Returns error if the provider type is unknown, no credential is
/// available, or client initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => {
            let api_key = resolve_api_key(&config.gemini)?;
            Ok(Box::new(GeminiProvider::new(config.gemini.clone(), api_key)?))
        }
        other => Err(crate::error::MentorError::Provider(format!(
            "Unknown provider type: {}",
            other
        ))
        .into()),
    }
}
