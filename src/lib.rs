//! Trading mentor - conversational day trading assistant library
//!
//! This library forwards a chat conversation to a generative-language API
//! configured with a trading-mentor persona and turns every outcome into
//! an assistant reply.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `advisor`: Advice request service and failure classification
//! - `chat`: Conversation state and the session that serializes submissions
//! - `providers`: Provider abstraction and the Gemini implementation
//! - `credentials`: Runtime API key resolution (environment, keyring)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trading_mentor::advisor::AdviceService;
//! use trading_mentor::chat::{ChatSession, Conversation};
//! use trading_mentor::providers::create_provider;
//! use trading_mentor::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let service = AdviceService::new(provider, &config.mentor);
//!     let session = ChatSession::new(Arc::new(service), Conversation::new());
//!     let outcome = session.submit("Is RSI above 70 a sell signal?").await;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod advisor;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod providers;

// Re-export commonly used types
pub use advisor::{AdviceService, Advisor};
pub use chat::{ChatSession, Conversation, SubmitOutcome};
pub use config::Config;
pub use error::{MentorError, Result};
