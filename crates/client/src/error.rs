//! Client error types.

use orgadmin_core::pagination::PaginationError;
use orgadmin_core::recurrence::RecurrenceError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Invalid recurrence: {0}")]
    Recurrence(#[from] RecurrenceError),

    #[error("Pagination failed: {0}")]
    Pagination(#[from] PaginationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ClientError> for PaginationError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Pagination(error) => error,
            other => PaginationError::FetchFailure(other.to_string()),
        }
    }
}
