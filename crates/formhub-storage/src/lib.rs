//! Persistence layer for formhub notifications and meetings.
//!
//! A single SeaORM/SQLite database accessed through [`store::Store`].
//! Notifications are written once by the dispatch core and only their
//! read-lifecycle columns (`is_read`, `read_at`) are mutated afterwards,
//! by the portal-facing operations in [`store::notification`].

pub mod entities;
pub mod error;
pub mod store;

#[cfg(test)]
mod tests;

pub use store::{
    MarkReadOutcome, NewMeeting, NotificationFilter, NotificationRow, Store, DEFAULT_LIST_LIMIT,
};
