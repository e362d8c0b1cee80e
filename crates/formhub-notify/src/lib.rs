//! Notification dispatch core.
//!
//! Domain events (a booked meeting, an order update, a project milestone)
//! are mapped to persisted notification rows by
//! [`dispatcher::NotificationDispatcher`]. Meeting reminders are evaluated
//! reactively against a configurable lead time (24 hours by default): there
//! is no internal timer, so callers re-evaluate on every meeting
//! create/update or from a periodic external sweep.

pub mod dispatcher;
pub mod error;
pub mod reminder;


use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formhub_common::types::NewNotification;
use formhub_storage::{NotificationRow, Store};

/// Source of the current instant.
///
/// Injected into the dispatcher so reminder-due evaluation is deterministic
/// under test; production code uses [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] reading the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The single persistence capability the dispatch core consumes: insert one
/// notification row. The core never queries, updates, or deletes through
/// this interface.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Persists the notification and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store rejects or fails the insert.
    async fn insert_notification(&self, new: &NewNotification) -> Result<NotificationRow>;
}

#[async_trait]
impl NotificationGateway for Store {
    async fn insert_notification(&self, new: &NewNotification) -> Result<NotificationRow> {
        Ok(Store::insert_notification(self, new).await?)
    }
}
