//! Interactive chat loop.
//!
//! Coordinates the conversation lifecycle at the terminal: session
//! acquisition, restored-turn replay, the input loop with slash commands,
//! and rendering of assistant replies with their charts.

pub mod banner;
pub mod chart;
pub mod commands;
pub mod input;
pub mod renderer;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use advisorly_core::chart::resolve;
use advisorly_types::chat::{Turn, TurnRole};
use advisorly_types::error::{ChartError, SendError};

use crate::state::AppState;

use banner::print_welcome_banner;
use commands::ChatCommand;
use input::{ChatInput, InputEvent};
use renderer::ChatRenderer;

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let conversation = &state.conversation;

    let spinner = thinking_spinner("connecting...");
    let init_result = conversation.init().await;
    spinner.finish_and_clear();

    if let Err(err) = init_result {
        eprintln!(
            "  {} Could not acquire a session: {err}",
            style("!").yellow().bold()
        );
        eprintln!(
            "  {}",
            style("Sending a message will retry acquisition.").dim()
        );
    }

    let session_id = conversation.session_manager().session().await.map(|s| s.id);
    print_welcome_banner(
        &state.config.advisor_id,
        &state.config.server_url,
        session_id.as_deref(),
    );

    let renderer = ChatRenderer::new();

    // Replay the persisted conversation, like the web client restoring
    // messages on mount.
    let restored = conversation.turns().await;
    if !restored.is_empty() {
        println!(
            "  {}",
            style(format!("Restored {} turns", restored.len())).dim()
        );
        println!();
        for turn in &restored {
            print_turn(&renderer, turn);
        }
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::History => {
                            print_history(conversation.turns().await.as_slice());
                        }
                        ChatCommand::Customers => {
                            if let Err(err) =
                                crate::cli::customer::list_customers(state, false).await
                            {
                                println!(
                                    "\n  {} Could not list customers: {err}\n",
                                    style("!").red().bold()
                                );
                            }
                        }
                        ChatCommand::Reset => {
                            conversation.reset().await;
                            println!(
                                "\n  {} Conversation cleared; acquiring a new session.\n",
                                style("*").cyan().bold()
                            );
                            if let Err(err) = conversation.init().await {
                                println!(
                                    "  {} Session acquisition failed: {err}\n",
                                    style("!").yellow().bold()
                                );
                            }
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                // The session may still be missing after a failed startup;
                // retry acquisition before the send is attempted.
                if !conversation.session_manager().is_active().await {
                    let spinner = thinking_spinner("connecting...");
                    let result = conversation.init().await;
                    spinner.finish_and_clear();
                    if let Err(err) = result {
                        println!(
                            "\n  {} Still no session: {err}\n",
                            style("!").red().bold()
                        );
                        continue;
                    }
                }

                let spinner = thinking_spinner("thinking...");
                let result = conversation.send_user_message(&text).await;
                spinner.finish_and_clear();

                match result {
                    Ok(turn) => {
                        println!();
                        print_turn(&renderer, &turn);
                    }
                    Err(SendError::EmptyMessage) => continue,
                    Err(SendError::SendInFlight) => {
                        println!(
                            "\n  {}\n",
                            style("A message is already being sent; wait for the reply.").dim()
                        );
                    }
                    Err(SendError::SessionNotActive) => {
                        println!(
                            "\n  {}\n",
                            style("No session yet; try again in a moment.").dim()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn thinking_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Print one turn: styled role label, rendered prose, and any chart.
fn print_turn(renderer: &ChatRenderer, turn: &Turn) {
    match turn.role {
        TurnRole::User => {
            println!("  {} {}", style("You >").green().bold(), turn.content);
        }
        TurnRole::Assistant => {
            println!("  {}", style("Advisor >").cyan().bold());
            println!("{}", renderer.render(&turn.content));
            if let Some(descriptor) = &turn.chart_data {
                print_chart(descriptor);
            }
        }
    }
    println!();
}

/// Resolve and draw a chart descriptor, or its diagnostic label.
fn print_chart(descriptor: &advisorly_types::chart::ChartDescriptor) {
    match resolve(descriptor) {
        Ok(Some(plan)) => {
            println!();
            print!("{}", chart::render_plan(&plan));
        }
        Ok(None) => {}
        Err(ChartError::UnsupportedType(chart_type)) => {
            println!(
                "  {}",
                style(format!("Unsupported chart type: {chart_type}")).red()
            );
        }
    }
}

/// Compact history listing for the /history command.
fn print_history(turns: &[Turn]) {
    println!();
    if turns.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for turn in turns {
        let role_label = match turn.role {
            TurnRole::User => format!("{}", style("You").green()),
            TurnRole::Assistant => format!("{}", style("Advisor").cyan()),
        };
        let preview: String = if turn.content.chars().count() > 100 {
            let truncated: String = turn.content.chars().take(97).collect();
            format!("{truncated}...")
        } else {
            turn.content.clone()
        };
        println!("  {} {}", style(role_label).bold(), preview);
    }
    println!();
}
