//! Error types for the trading mentor
//!
//! This module defines the error type used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for trading mentor operations
///
/// Covers configuration loading, credential resolution and every
/// failure the generative-language provider can report.
#[derive(Error, Debug)]
pub enum MentorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (transport, unexpected payloads, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Structured error returned by the generative-language API
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code of the failed response
        status: u16,
        /// API status string (e.g. `PERMISSION_DENIED`), when reported
        code: Option<String>,
        /// Human-readable message from the API
        message: String,
    },

    /// Authentication errors (credential rejected)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// No credential could be resolved for the provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl MentorError {
    /// Returns true when the error means the credential was rejected or absent
    ///
    /// Only structured information is inspected here; free-text matching
    /// is left to the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use trading_mentor::error::MentorError;
    ///
    /// let err = MentorError::Api {
    ///     status: 403,
    ///     code: Some("PERMISSION_DENIED".to_string()),
    ///     message: "API key not valid".to_string(),
    /// };
    /// assert!(err.is_authorization_failure());
    /// assert!(!MentorError::Provider("timeout".to_string()).is_authorization_failure());
    /// ```
    pub fn is_authorization_failure(&self) -> bool {
        match self {
            Self::Authentication(_) | Self::MissingCredentials(_) => true,
            Self::Api {
                status,
                code,
                message,
            } => {
                matches!(status, 401 | 403)
                    || matches!(
                        code.as_deref(),
                        Some("PERMISSION_DENIED") | Some("UNAUTHENTICATED")
                    )
                    || message
                        .to_ascii_lowercase()
                        .contains("requested entity was not found")
            }
            Self::Http(e) => matches!(
                e.status().map(|s| s.as_u16()),
                Some(401) | Some(403)
            ),
            _ => false,
        }
    }

    /// Returns true when the variant alone settles the classification
    ///
    /// API errors, HTTP errors and credential errors carry a status or a
    /// kind. Free-text variants such as `Provider` do not.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_)
                | Self::MissingCredentials(_)
                | Self::Api { .. }
                | Self::Http(_)
        )
    }
}

/// Result type alias for trading mentor operations
///
/// Uses `anyhow::Error` so callers can attach context while the
/// structured `MentorError` stays reachable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
