//! orgadmin_client - CLI client for the orgadmin GraphQL API.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;

pub use client::{GraphQlClient, GraphQlPageFetcher};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
