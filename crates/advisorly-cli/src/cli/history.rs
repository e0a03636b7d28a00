//! Conversation history CLI command.
//!
//! Shows the locally persisted log by default; `--remote` fetches the
//! server-side record for the current session instead. Neither path
//! triggers session acquisition.

use anyhow::{Context, Result};
use console::style;

use advisorly_core::api::AdvisorApi;
use advisorly_types::chat::{Turn, TurnRole};

use crate::state::AppState;

/// Show the conversation history.
pub async fn show_history(state: &AppState, remote: bool, json: bool) -> Result<()> {
    state.conversation.restore().await;

    let turns: Vec<Turn> = if remote {
        let Some(session) = state.conversation.session_manager().session().await else {
            println!();
            println!(
                "  {}",
                style("No session yet. Start a chat first with `advy chat`.").dim()
            );
            println!();
            return Ok(());
        };
        state
            .conversation
            .api()
            .chat_history(&session.id, &session.advisor_id)
            .await
            .context("Failed to fetch remote history")?
    } else {
        state.conversation.turns().await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&turns)?);
        return Ok(());
    }

    println!();
    if turns.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        println!();
        return Ok(());
    }

    for turn in &turns {
        let role_label = match turn.role {
            TurnRole::User => format!("{}", style("You").green().bold()),
            TurnRole::Assistant => format!("{}", style("Advisor").cyan().bold()),
        };
        let timestamp = turn.timestamp.format("%Y-%m-%d %H:%M");
        println!("  {} {}", role_label, style(timestamp).dim());
        println!("  {}", turn.content);
        if turn.chart_data.is_some() {
            println!("  {}", style("[chart attached]").dim());
        }
        println!();
    }

    Ok(())
}
