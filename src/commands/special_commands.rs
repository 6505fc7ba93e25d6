//! Special commands parser for interactive chat mode
//!
//! Lines starting with `/` manage the conversation instead of being sent
//! to the agents:
//! - List the agents and change the selection
//! - Toggle email reminders
//! - Start a new conversation or save the transcript
//! - Display status and help
//! - Exit the session
//!
//! Command names are case-insensitive; arguments keep their case.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Show the agent catalog with the current selection marked
    ListAgents,

    /// Select or deselect an agent by id
    ToggleAgent(String),

    /// Deselect every agent
    ClearAgents,

    /// Clear the transcript and selection and start over
    NewConversation,

    /// Turn email reminders on or off
    SetReminders(bool),

    /// Display selection, reminder and connection status
    ShowStatus,

    /// Write the transcript as JSON to a file
    Save(PathBuf),

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; the input is a question for the agents
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use dhraviq::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/toggle skill-map").unwrap();
/// assert_eq!(cmd, SpecialCommand::ToggleAgent("skill-map".to_string()));
///
/// let cmd = parse_special_command("/reminders on").unwrap();
/// assert_eq!(cmd, SpecialCommand::SetReminders(true));
///
/// let cmd = parse_special_command("Help me plan my week").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "/agents" => Ok(SpecialCommand::ListAgents),
        "/toggle" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/toggle".to_string(),
                    usage: "/toggle <agent-id>".to_string(),
                })
            } else {
                Ok(SpecialCommand::ToggleAgent(arg.to_lowercase()))
            }
        }
        "/clear" => Ok(SpecialCommand::ClearAgents),
        "/new" => Ok(SpecialCommand::NewConversation),
        "/reminders" => match arg.to_lowercase().as_str() {
            "on" | "enable" => Ok(SpecialCommand::SetReminders(true)),
            "off" | "disable" => Ok(SpecialCommand::SetReminders(false)),
            "" => Err(CommandError::MissingArgument {
                command: "/reminders".to_string(),
                usage: "/reminders <on|off>".to_string(),
            }),
            other => Err(CommandError::UnsupportedArgument {
                command: "/reminders".to_string(),
                arg: other.to_string(),
            }),
        },
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/save" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/save".to_string(),
                    usage: "/save <path>".to_string(),
                })
            } else {
                Ok(SpecialCommand::Save(PathBuf::from(arg)))
            }
        }
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Display help information for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

AGENTS:
  /agents           - List the coaching agents (selected ones are marked)
  /toggle <id>      - Select or deselect an agent (at most two)
  /clear            - Deselect all agents

CONVERSATION:
  /new              - Clear the transcript and selection and start over
  /save <path>      - Write the transcript as JSON to a file
  /reminders on     - Ask for an email reminder with each question
  /reminders off    - Stop email reminders

SESSION INFORMATION:
  /status           - Show selection, reminders and connection status
  /help             - Show this help message
  /?                - Same as /help

SESSION CONTROL:
  exit              - Exit interactive mode
  quit              - Same as exit

NOTES:
  - Command names are case-insensitive
  - Regular text (not starting with /) is sent to the selected agents
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("How do I stay motivated?").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_exit_aliases() {
        for input in ["exit", "QUIT", "/exit", "/quit", "  exit  "] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_toggle_requires_argument() {
        assert!(matches!(
            parse_special_command("/toggle"),
            Err(CommandError::MissingArgument { .. })
        ));
        assert_eq!(
            parse_special_command("/TOGGLE Goal-Clarifier").unwrap(),
            SpecialCommand::ToggleAgent("goal-clarifier".to_string())
        );
    }

    #[test]
    fn test_reminders_arguments() {
        assert_eq!(
            parse_special_command("/reminders off").unwrap(),
            SpecialCommand::SetReminders(false)
        );
        assert!(matches!(
            parse_special_command("/reminders maybe"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
        assert!(matches!(
            parse_special_command("/reminders"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_save_keeps_path_case() {
        assert_eq!(
            parse_special_command("/save Notes/Plan.json").unwrap(),
            SpecialCommand::Save(PathBuf::from("Notes/Plan.json"))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(
            parse_special_command("/agents").unwrap(),
            SpecialCommand::ListAgents
        );
        assert_eq!(
            parse_special_command("/clear").unwrap(),
            SpecialCommand::ClearAgents
        );
        assert_eq!(
            parse_special_command("/new").unwrap(),
            SpecialCommand::NewConversation
        );
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_special_command("/mode write").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/mode write".to_string()));
        assert!(err.to_string().contains("/help"));
    }
}
