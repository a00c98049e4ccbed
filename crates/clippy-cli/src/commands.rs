//! Slash commands for interactive mode

/// Result of parsing a slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Clear the conversation and re-seed the greeting
    Reset,
    /// Print every message in the conversation
    History,
    /// Show a message to the user (not sent to Clippy)
    Message(String),
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse a slash command. Returns `None` for ordinary chat input.
pub fn execute_command(input: &str) -> Option<CommandResult> {
    let command = input.trim().strip_prefix('/')?;
    let command = command
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),
        "reset" | "clear" | "r" => CommandResult::Reset,
        "history" | "hist" => CommandResult::History,
        "quit" | "exit" | "q" => CommandResult::Exit,
        _ => CommandResult::Unknown(command),
    })
}

fn help_message() -> String {
    r#"Available commands:
  /help, /h, /?        Show this help message
  /reset, /clear, /r   Start a fresh conversation
  /history             Show the whole conversation
  /quit, /exit, /q     Exit clippy-chat"#
        .to_string()
}
