//! CLI command definitions.

pub mod connection;
pub mod recurrence;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the orgadmin GraphQL API.
#[derive(Debug, Parser)]
#[command(name = "orgadmin-client")]
#[command(about = "CLI client for the orgadmin GraphQL API", long_about = None)]
pub struct Cli {
    /// GraphQL endpoint URL.
    #[arg(long, env = "ORGADMIN_GRAPHQL_URL")]
    pub graphql_url: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, env = "ORGADMIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Describe and validate recurrence rules.
    Recurrence(recurrence::RecurrenceCommand),
    /// Page through GraphQL connections.
    Connection(connection::ConnectionCommand),
}
