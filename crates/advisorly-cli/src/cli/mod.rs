//! CLI command definitions for the `advy` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! verb-noun pattern (e.g., `advy chat`, `advy customers`, `advy chart`).

pub mod chart_cmd;
pub mod chat;
pub mod customer;
pub mod history;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with your advisory assistant about your customers.
#[derive(Parser)]
#[command(name = "advy", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session with the advisory assistant.
    Chat,

    /// Show the conversation history.
    History {
        /// Fetch the server-side history instead of the local log.
        #[arg(long)]
        remote: bool,
    },

    /// List all customers assigned to the advisor.
    #[command(alias = "ls")]
    Customers,

    /// Show one customer's detail, including accounts.
    Customer {
        /// Customer id to display.
        id: i64,
    },

    /// Generate and render a chart from backend data.
    Chart {
        /// Data type to chart (accounts, portfolio, performance).
        data_type: String,

        /// Chart variant (bar, line, pie, doughnut).
        #[arg(long, default_value = "bar")]
        chart_type: String,

        /// Filters as key=value pairs (repeatable).
        #[arg(long, value_name = "KEY=VALUE")]
        filter: Vec<String>,
    },

    /// Clear the conversation and drop the session.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Show client configuration and conversation state.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
