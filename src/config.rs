//! Configuration management for the trading mentor
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! Credentials are never part of the configuration file; only the name of
//! the environment variable and keyring entry that hold them.

use crate::error::{MentorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (generative-language backend)
    pub provider: ProviderConfig,
    /// Mentor persona and sampling configuration
    #[serde(default)]
    pub mentor: MentorConfig,
}

/// Provider configuration
///
/// Specifies which AI provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model identifier used in the `generateContent` path
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Optional API base URL (useful for tests and local mocks)
    ///
    /// When unset, `https://generativelanguage.googleapis.com` is used.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Keyring service consulted when the environment variable is unset
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Keyring user consulted when the environment variable is unset
    #[serde(default = "default_keyring_user")]
    pub keyring_user: String,

    /// Optional request timeout in seconds; the HTTP client default applies when unset
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

fn default_gemini_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_keyring_service() -> String {
    "trading-mentor".to_string()
}

fn default_keyring_user() -> String {
    "gemini".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: None,
            api_key_env: default_api_key_env(),
            keyring_service: default_keyring_service(),
            keyring_user: default_keyring_user(),
            request_timeout_seconds: None,
        }
    }
}

/// Mentor persona configuration
///
/// The system instruction and temperature are attached to every request;
/// the greeting seeds each new conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorConfig {
    /// System instruction sent with every request
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Assistant message that opens a new conversation, if any
    #[serde(default = "default_greeting")]
    pub greeting: Option<String>,
}

fn default_system_instruction() -> String {
    "You are a day trading mentor helping the user build and operate an \
     algorithmic trading bot against a paper-trading brokerage account. \
     Explain technical indicators (RSI, MACD), insist on stop losses and \
     position sizing, and recommend backtesting before risking real money. \
     When the user reports a bot failure, diagnose the error first and \
     suggest the smallest fix that gets the bot running again."
        .to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_greeting() -> Option<String> {
    Some(
        "Welcome to the advanced day trading module!\n\n\
         I can help you build a bot that analyses the market minute by minute. \
         To keep the margin for error small we should talk about:\n\n\
         1. Technical indicators (RSI, MACD).\n\
         2. Stop losses, so one mistake does not cost you the account.\n\
         3. Backtesting, to try your idea on past data.\n\n\
         Which asset would you like to analyse first?"
            .to_string(),
    )
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            system_instruction: default_system_instruction(),
            temperature: default_temperature(),
            greeting: default_greeting(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command-line arguments
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig::default(),
            mentor: MentorConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MentorError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| MentorError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("TRADING_MENTOR_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("TRADING_MENTOR_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("TRADING_MENTOR_API_BASE") {
            self.provider.gemini.api_base = Some(api_base);
        }

        if let Ok(timeout) = std::env::var("TRADING_MENTOR_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.gemini.request_timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid TRADING_MENTOR_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(temperature) = std::env::var("TRADING_MENTOR_TEMPERATURE") {
            if let Ok(value) = temperature.parse() {
                self.mentor.temperature = value;
            } else {
                tracing::warn!("Invalid TRADING_MENTOR_TEMPERATURE: {}", temperature);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(model) = &cli.model {
            tracing::debug!("Using model override from CLI: {}", model);
            self.provider.gemini.model = model.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(MentorError::Config("Provider type cannot be empty".to_string()).into());
        }

        let valid_providers = ["gemini"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(MentorError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(
                MentorError::Config("provider.gemini.model cannot be empty".to_string()).into(),
            );
        }

        if self.provider.gemini.api_key_env.trim().is_empty() {
            return Err(MentorError::Config(
                "provider.gemini.api_key_env cannot be empty".to_string(),
            )
            .into());
        }

        if self.provider.gemini.request_timeout_seconds == Some(0) {
            return Err(MentorError::Config(
                "provider.gemini.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if !(0.0..=2.0).contains(&self.mentor.temperature) {
            return Err(MentorError::Config(format!(
                "mentor.temperature must be between 0.0 and 2.0, got {}",
                self.mentor.temperature
            ))
            .into());
        }

        if self.mentor.system_instruction.trim().is_empty() {
            return Err(MentorError::Config(
                "mentor.system_instruction cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
