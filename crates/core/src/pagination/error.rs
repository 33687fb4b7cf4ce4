use thiserror::Error;

/// Errors surfaced by the pagination manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// The injected fetch capability rejected the request.
    #[error("Failed to fetch page: {0}")]
    FetchFailure(String),
    /// A node in the response could not be decoded into the item type.
    #[error("Malformed node at position {index}: {message}")]
    MalformedNode { index: usize, message: String },
}

/// Result type for pagination operations.
pub type Result<T> = std::result::Result<T, PaginationError>;
