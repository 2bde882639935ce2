//! Runtime credential resolution
//!
//! The API key is looked up at startup: first in the environment variable
//! named by the configuration, then in the system keyring. Keys never live
//! in source or in the YAML configuration.

use crate::config::GeminiConfig;
use crate::error::{MentorError, Result};
use std::fmt;

/// An API key for the generative-language provider
///
/// `Debug` output is redacted so the key never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key for use in a request header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Resolve the API key for the Gemini provider
///
/// # Errors
///
/// Returns `MentorError::MissingCredentials` when neither the environment
/// variable nor the keyring entry yields a non-empty key.
pub fn resolve_api_key(config: &GeminiConfig) -> Result<ApiKey> {
    if let Some(key) = from_env(&config.api_key_env) {
        tracing::debug!("Using API key from ${}", config.api_key_env);
        return Ok(key);
    }

    match from_keyring(&config.keyring_service, &config.keyring_user) {
        Ok(key) => {
            tracing::debug!(
                "Using API key from keyring entry {}/{}",
                config.keyring_service,
                config.keyring_user
            );
            Ok(key)
        }
        Err(e) => {
            tracing::debug!("Keyring lookup failed: {}", e);
            Err(MentorError::MissingCredentials(format!(
                "gemini (set ${} or store a key in keyring service '{}', user '{}')",
                config.api_key_env, config.keyring_service, config.keyring_user
            ))
            .into())
        }
    }
}

/// Read a non-empty key from an environment variable
fn from_env(var: &str) -> Option<ApiKey> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(ApiKey)
}

fn from_keyring(service: &str, user: &str) -> Result<ApiKey> {
    let entry = keyring::Entry::new(service, user)?;
    let password = entry.get_password()?;
    let password = password.trim();
    if password.is_empty() {
        return Err(MentorError::MissingCredentials(format!("{}/{}", service, user)).into());
    }
    Ok(ApiKey(password.to_string()))
}
