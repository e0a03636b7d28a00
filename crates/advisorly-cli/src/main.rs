//! Advisorly CLI entry point.
//!
//! Binary name: `advy`
//!
//! Parses CLI arguments, initializes the local store and HTTP client, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use console::style;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,advisorly=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "advy", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (local DB, HTTP client)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat => {
            cli::chat::run_chat_loop(&state).await?;
        }

        Commands::History { remote } => {
            cli::history::show_history(&state, remote, cli.json).await?;
        }

        Commands::Customers => {
            cli::customer::list_customers(&state, cli.json).await?;
        }

        Commands::Customer { id } => {
            cli::customer::show_customer(&state, id, cli.json).await?;
        }

        Commands::Chart {
            data_type,
            chart_type,
            filter,
        } => {
            cli::chart_cmd::generate_chart(&state, &data_type, &chart_type, &filter, cli.json)
                .await?;
        }

        Commands::Reset { force } => {
            let confirmed = force
                || dialoguer::Confirm::new()
                    .with_prompt("Clear the conversation and drop the session?")
                    .default(false)
                    .interact()?;

            if confirmed {
                state.conversation.reset().await;
                println!(
                    "  {} Conversation cleared; a fresh session will be acquired on next chat.",
                    style("✓").green()
                );
            } else {
                println!("  {}", style("Reset cancelled.").dim());
            }
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
