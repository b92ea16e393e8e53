use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Argus: route guard and AI assistant for the monitoring console.
#[derive(Parser, Debug)]
#[command(name = "argus", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `argus=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive conversation with the assistant.
    Chat {
        /// Print the reply as it arrives.
        #[arg(long)]
        stream: bool,
    },
    /// Send one message and print the reply.
    Ask {
        message: String,
        #[arg(long)]
        stream: bool,
    },
    /// Check whether the AI endpoint accepts requests.
    Status,
    /// Resolve a path through the route guard.
    Navigate { path: String },
    /// Set the persisted login flag.
    Login,
    /// Clear the persisted login flag.
    Logout,
}

pub fn parse() -> Args {
    Args::parse()
}
