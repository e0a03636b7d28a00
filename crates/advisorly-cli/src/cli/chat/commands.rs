//! Slash command parsing and execution for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for history,
//! customer lookups, and conversation reset.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Show conversation history for this session.
    History,
    /// List the advisor's customers.
    Customers,
    /// Clear the conversation and drop the session.
    Reset,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/customers" => Some(ChatCommand::Customers),
        "/reset" => Some(ChatCommand::Reset),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}      {}", style("/help").cyan(), "Show this help message");
    println!("  {}     {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}      {}", style("/exit").cyan(), "End the chat session");
    println!(
        "  {}   {}",
        style("/history").cyan(),
        "Show conversation history"
    );
    println!(
        "  {} {}",
        style("/customers").cyan(),
        "List your customers"
    );
    println!(
        "  {}     {}",
        style("/reset").cyan(),
        "Clear the conversation and start a new session"
    );
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
