//! Connection CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use orgadmin_core::pagination::Variables;
use serde_json::Value;

/// Connection commands.
#[derive(Debug, Parser)]
pub struct ConnectionCommand {
    #[command(subcommand)]
    pub action: ConnectionAction,
}

/// Available connection actions.
#[derive(Debug, Subcommand)]
pub enum ConnectionAction {
    /// List the nodes of a paginated connection.
    List {
        /// File containing the GraphQL query. It must accept `$first` and `$after`.
        #[arg(long)]
        query_file: PathBuf,
        /// Dot-separated path to the connection (e.g. organization.members).
        #[arg(long)]
        data_path: String,
        /// Extra query variable as NAME=VALUE. VALUE is parsed as JSON when possible.
        #[arg(long = "var", value_parser = parse_variable)]
        vars: Vec<(String, Value)>,
        /// Items per page.
        #[arg(long)]
        page_size: Option<u32>,
        /// Follow `hasNextPage` until the connection is exhausted.
        #[arg(long)]
        all: bool,
        /// Drop nodes whose id was already listed.
        #[arg(long)]
        dedupe: bool,
    },
}

/// Parses `NAME=VALUE`, reading VALUE as JSON and falling back to a string.
pub fn parse_variable(s: &str) -> Result<(String, Value), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in `{}`", s));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

/// Collects parsed variables into a map; later duplicates win.
pub fn into_variables(vars: Vec<(String, Value)>) -> Variables {
    vars.into_iter().collect()
}
