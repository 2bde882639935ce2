/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat` — Interactive chat with the mentor
- `ask`  — Single question, reply printed to stdout

Both build the advice service from configuration and drive it through a
`ChatSession`, so the terminal behaves like the original chat widget.
*/

use crate::advisor::{AdviceService, Advisor};
use crate::chat::{ChatSession, Conversation, SubmitOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;
use std::sync::Arc;

// Special commands parser for the interactive loop
pub mod special_commands;

/// Build the advice service for the configured provider
///
/// # Errors
///
/// Returns error if the provider cannot be created (unknown type,
/// missing credential, client initialization failure)
pub fn build_advice_service(config: &Config) -> Result<AdviceService> {
    let provider = create_provider(&config.provider)?;
    Ok(AdviceService::new(provider, &config.mentor))
}

/// Initial conversation, seeded with the configured greeting
pub fn initial_conversation(config: &Config) -> Conversation {
    match &config.mentor.greeting {
        Some(greeting) => Conversation::with_greeting(greeting.clone()),
        None => Conversation::new(),
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Runs a readline loop that submits each line to a `ChatSession` and
    //! prints the mentor's reply.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let service = build_advice_service(&config)?;
        let model = service.model();
        let advisor: Arc<dyn Advisor> = Arc::new(service);
        let session = ChatSession::new(advisor, initial_conversation(&config));

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&model);
        if let Some(greeting) = session.messages().first() {
            print_reply(&greeting.content);
        }

        loop {
            match rl.readline(&format!("{} ", "you>".green().bold())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Clear) => {
                            let cleared = session.clear();
                            println!("{}\n", clear_notice(cleared).yellow());
                            if cleared {
                                if let Some(greeting) = session.messages().first() {
                                    print_reply(&greeting.content);
                                }
                            }
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status(&model, session.len());
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "mentor is thinking...".dimmed());
                    match session.submit(&line).await {
                        SubmitOutcome::Replied(reply) => print_reply(&reply),
                        SubmitOutcome::Busy => {
                            println!("{}\n", "Still waiting for the previous reply.".yellow())
                        }
                        SubmitOutcome::Rejected => {}
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    return Err(e.into());
                }
            }
        }

        tracing::info!("Chat session ended after {} messages", session.len());
        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome_banner(model: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              Day Trading Mentor - Analysis Mode              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model: {}", model.cyan());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    fn print_status(model: &str, conversation_len: usize) {
        println!("\nModel:    {}", model.cyan());
        println!("Messages: {}\n", conversation_len);
    }

    fn print_reply(reply: &str) {
        println!("{} {}\n", "mentor>".cyan().bold(), reply);
    }

    /// Notice shown after `/clear`, depending on whether it took effect
    pub(crate) fn clear_notice(cleared: bool) -> &'static str {
        if cleared {
            "Conversation cleared."
        } else {
            "Cannot clear while the mentor is answering."
        }
    }
}

// One-shot question handler
pub mod ask {
    //! Single-question mode: one submission, reply on stdout.

    use super::*;

    /// Ask one question and print the reply
    ///
    /// The greeting, when configured, is part of the history sent along
    /// with the question, as in the interactive chat.
    pub async fn run_ask(config: Config, prompt: String) -> Result<()> {
        tracing::info!("Asking a single question");

        let service = build_advice_service(&config)?;
        let session = ChatSession::new(Arc::new(service), initial_conversation(&config));

        match session.submit(&prompt).await {
            SubmitOutcome::Replied(reply) => println!("{}", reply),
            SubmitOutcome::Rejected => {
                return Err(crate::error::MentorError::Config(
                    "Prompt cannot be empty".to_string(),
                )
                .into())
            }
            SubmitOutcome::Busy => {
                return Err(crate::error::MentorError::Provider(
                    "A request is already in flight".to_string(),
                )
                .into())
            }
        }

        Ok(())
    }
}
