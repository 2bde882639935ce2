//! Command-line interface definition for the trading mentor
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};

/// Trading mentor - conversational day trading assistant
///
/// Chat with a generative-language model configured as a trading mentor.
#[derive(Parser, Debug, Clone)]
#[command(name = "trading-mentor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the model from config
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat with the mentor
    Chat,

    /// Ask a single question and print the reply
    Ask {
        /// Question to send
        prompt: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            model: None,
            command: Commands::Chat,
        }
    }
}
