//! orgadmin_core - recurrence formatting and cursor pagination for the
//! organization admin dashboard.

pub mod pagination;
pub mod recurrence;
pub mod serde;
