//! Cursor-based pagination over GraphQL connections.

mod error;
mod manager;
mod path;
mod traits;
mod types;

pub use error::{PaginationError, Result};
pub use manager::{
    CursorPaginationManager, PaginationOptions, PaginationPhase, PaginationProps,
    PaginationState, DEFAULT_PAGE_SIZE,
};
pub use path::extract_connection;
pub use traits::{PageFetcher, Variables};
pub use types::{node_id, Connection, Edge, PageInfo};
