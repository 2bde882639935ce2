//! Special commands parser for interactive chat mode
//!
//! Special commands are handled by the terminal front-end and never reach
//! the mentor. They are prefixed with `/` and are case-insensitive; the
//! bare words `exit` and `quit` are accepted as well.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// Start over from the greeting
    Clear,

    /// Show model and conversation size
    ShowStatus,

    /// Exit the interactive session
    Exit,

    /// Not a special command; the input goes to the mentor
    None,
}

/// Parse user input into a special command
///
/// # Examples
///
/// ```
/// use trading_mentor::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
/// assert_eq!(parse_special_command("quit").unwrap(), SpecialCommand::Exit);
/// assert_eq!(parse_special_command("Buy or wait?").unwrap(), SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/clear" | "/reset" => Ok(SpecialCommand::Clear),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the list of special commands
pub fn print_help() {
    use colored::Colorize;

    println!("\n{}", "Available commands:".bold());
    println!("  {}    Show this help", "/help".cyan());
    println!("  {}   Start over from the greeting", "/clear".cyan());
    println!("  {}  Show model and conversation size", "/status".cyan());
    println!("  {}    Leave the chat (also 'exit' or 'quit')\n", "/exit".cyan());
}
