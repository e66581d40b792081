//! Special commands parser for interactive chat mode
//!
//! This module parses the special commands that can be entered during an
//! interactive chat session. Special commands allow users to:
//! - Save the current chat and start a new one
//! - List, open, and delete saved chats
//! - Redraw the current conversation
//! - Display help information
//! - Exit the session
//!
//! Commands are prefixed with `/` and their names are case-insensitive.
//! Arguments keep their original case.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Command takes no argument but one was given
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands act on saved chats or the display, rather than being
/// sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Save the current chat and start an empty one
    NewChat,

    /// Show the saved chats, newest-looking names first
    List,

    /// Open a saved chat by file name or 1-based listing index
    Open(String),

    /// Delete a saved chat by file name or 1-based listing index
    Delete(String),

    /// Redraw the whole current conversation
    Show,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the model as a regular message.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::MissingArgument if `/open` or `/delete` has no argument.
/// Returns CommandError::UnsupportedArgument if an argument-less command receives one.
///
/// # Examples
///
/// ```
/// use chatkeep::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/open 2").unwrap();
/// assert_eq!(cmd, SpecialCommand::Open("2".to_string()));
///
/// let cmd = parse_special_command("hello model").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name.to_lowercase(), arg.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "exit" | "quit" | "/exit" | "/quit" => no_argument(&name, arg, SpecialCommand::Exit),
        "/new" => no_argument(&name, arg, SpecialCommand::NewChat),
        "/list" | "/ls" => no_argument(&name, arg, SpecialCommand::List),
        "/show" => no_argument(&name, arg, SpecialCommand::Show),
        "/help" | "/?" => no_argument(&name, arg, SpecialCommand::Help),
        "/open" | "/load" => with_argument("/open", "/open <file name|index>", arg)
            .map(SpecialCommand::Open),
        "/delete" | "/rm" => with_argument("/delete", "/delete <file name|index>", arg)
            .map(SpecialCommand::Delete),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn no_argument(
    name: &str,
    arg: &str,
    command: SpecialCommand,
) -> Result<SpecialCommand, CommandError> {
    if arg.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: name.to_string(),
            arg: arg.to_string(),
        })
    }
}

fn with_argument(command: &str, usage: &str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(arg.to_string())
    }
}

/// Display help information for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

CHATS:
  /new            - Save the current chat and start a new one
  /list           - Show saved chats (newest-looking names first)
  /ls             - Same as /list
  /open <ref>     - Open a saved chat by file name or list index
  /delete <ref>   - Delete a saved chat by file name or list index
  /show           - Redraw the current conversation

SESSION:
  /help           - Show this help message
  /?              - Same as /help
  exit            - Exit interactive mode
  quit            - Same as exit

NOTES:
  - Command names are case-insensitive
  - Regular text (not starting with /) is sent to the model
  - A chat is only saved when you start a new one with /new
  - Saving a chat whose first message matches an existing one overwrites it
"#
    );
}
