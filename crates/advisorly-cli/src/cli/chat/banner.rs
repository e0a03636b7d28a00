//! Welcome banner display for chat sessions.
//!
//! Prints a styled banner when a chat session starts, showing the advisor
//! identity, backend, and session information.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(advisor_id: &str, server_url: &str, session_id: Option<&str>) {
    println!();
    println!("  {}", style("Advisorly").cyan().bold());
    println!(
        "  {}",
        style("Ask questions about your customers and get insights").dim()
    );
    println!();
    println!("  {}  {}", style("Advisor:").bold(), style(advisor_id).dim());
    println!("  {}  {}", style("Backend:").bold(), style(server_url).dim());
    match session_id {
        Some(id) => println!(
            "  {}  {}",
            style("Session:").bold(),
            style(&id[..8.min(id.len())]).dim()
        ),
        None => println!(
            "  {}  {}",
            style("Session:").bold(),
            style("pending").yellow().dim()
        ),
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
