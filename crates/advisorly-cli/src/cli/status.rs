//! Client status dashboard.
//!
//! Shows the effective configuration and the persisted conversation state
//! without acquiring a session or touching the backend.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Print client configuration and conversation state.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    state.conversation.restore().await;

    let session = state.conversation.session_manager().session().await;
    let turn_count = state.conversation.turns().await.len();

    if json {
        let report = serde_json::json!({
            "server_url": state.config.server_url,
            "advisor_id": state.config.advisor_id,
            "data_dir": state.data_dir.display().to_string(),
            "session_id": session.as_ref().map(|s| s.id.clone()),
            "turns": turn_count,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Advisorly status").cyan().bold());
    println!();
    println!(
        "  {}   {}",
        style("Backend:").bold(),
        state.config.server_url
    );
    println!(
        "  {}   {}",
        style("Advisor:").bold(),
        state.config.advisor_id
    );
    println!(
        "  {}  {}",
        style("Data dir:").bold(),
        state.data_dir.display()
    );
    match &session {
        Some(session) => println!("  {}   {}", style("Session:").bold(), session.id),
        None => println!(
            "  {}   {}",
            style("Session:").bold(),
            style("none (acquired on first chat)").dim()
        ),
    }
    println!("  {}     {}", style("Turns:").bold(), turn_count);
    println!();

    Ok(())
}
