//! Command-line interface definition for Dhraviq
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chatting with the coaching agents, signing in
//! and inspecting progress.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dhraviq - goal coaching from a team of AI agents
///
/// Ask questions of up to two coaching personas at a time and keep
/// track of your progress.
#[derive(Parser, Debug, Clone)]
#[command(name = "dhraviq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the agent service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Dhraviq
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat with the coaching agents
    Chat {
        /// Agent to select at start (repeatable, at most two)
        #[arg(short, long = "agent")]
        agents: Vec<String>,

        /// Ask the service to email reminders for each question
        #[arg(long)]
        reminders: bool,
    },

    /// Ask a single question and print the answers
    Ask {
        /// The question to ask
        question: String,

        /// Agent to ask (repeatable, at most two)
        #[arg(short, long = "agent")]
        agents: Vec<String>,

        /// Ask the service to email a reminder
        #[arg(long)]
        reminders: bool,

        /// Write the resulting transcript as JSON to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Store sign-in credentials issued by the identity provider
    Login {
        /// Identity provider user id
        #[arg(long)]
        uid: String,

        /// Account email address
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Id token sent as the bearer token
        #[arg(long)]
        token: Option<String>,

        /// Seconds until the id token expires
        #[arg(long)]
        expires_in: Option<i64>,
    },

    /// Remove stored sign-in credentials
    Logout,

    /// Show who is signed in
    Whoami,

    /// List the available coaching agents
    Agents {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show session and streak counters for the signed-in user
    Progress {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the agent service is reachable
    Health,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            base_url: None,
            json_logs: false,
            command: Commands::Agents { json: false },
        }
    }
}
