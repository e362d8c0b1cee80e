use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{NotifyError, Result};
use crate::reminder::{reminder_dueness, ReminderDueness, ReminderPolicy};
use crate::{Clock, NotificationGateway, SystemClock};
use formhub_common::types::{
    format_meeting_start, Meeting, NewNotification, NotificationKind, RelatedEntity,
};

/// Maps domain events to persisted notification rows.
///
/// Both entrypoints return a plain success flag: `false` means the
/// notification was not persisted and a diagnostic line was logged — never
/// that the business operation which triggered the event should fail.
pub struct NotificationDispatcher {
    gateway: Arc<dyn NotificationGateway>,
    clock: Arc<dyn Clock>,
    policy: ReminderPolicy,
}

impl NotificationDispatcher {
    pub fn new(
        gateway: Arc<dyn NotificationGateway>,
        clock: Arc<dyn Clock>,
        policy: ReminderPolicy,
    ) -> Self {
        Self {
            gateway,
            clock,
            policy,
        }
    }

    /// Dispatcher on the system clock with the default 24 h reminder lead.
    pub fn with_system_clock(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self::new(gateway, Arc::new(SystemClock), ReminderPolicy::default())
    }

    /// Validates and persists one notification. Exactly one row is inserted
    /// on `true`, zero on `false`. Duplicate calls insert duplicate rows;
    /// callers needing at-most-once semantics must de-duplicate upstream.
    pub async fn create_notification(&self, new: &NewNotification) -> bool {
        match self.try_create(new).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    user_id = %new.user_id,
                    kind = %new.kind,
                    error = %e,
                    "Failed to create notification"
                );
                false
            }
        }
    }

    async fn try_create(&self, new: &NewNotification) -> Result<()> {
        validate(new)?;
        self.gateway.insert_notification(new).await?;
        tracing::info!(user_id = %new.user_id, title = %new.title, "Notification created");
        Ok(())
    }

    /// Evaluates the reminder window for `meeting` and, when due, persists
    /// the `meeting_reminder` notification addressed to the consultant.
    /// A still-pending reminder is logged and reported as success.
    pub async fn create_meeting_reminder(&self, meeting: &Meeting) -> bool {
        match self.try_meeting_reminder(meeting).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!(
                    meeting_id = %meeting.id,
                    error = %e,
                    "Failed to create meeting reminder"
                );
                false
            }
        }
    }

    async fn try_meeting_reminder(&self, meeting: &Meeting) -> Result<bool> {
        let start = DateTime::parse_from_rfc3339(&meeting.start_time).map_err(|e| {
            NotifyError::Extraction(format!(
                "unparsable start_time '{}': {e}",
                meeting.start_time
            ))
        })?;

        let now = self.clock.now();
        match reminder_dueness(start.with_timezone(&Utc), now, &self.policy) {
            ReminderDueness::Due => {
                let new = meeting_reminder(meeting, &start);
                let created = self.create_notification(&new).await;
                if created {
                    tracing::info!(
                        consultant_id = %meeting.consultant_id,
                        meeting_id = %meeting.id,
                        "Meeting reminder notification created"
                    );
                }
                Ok(created)
            }
            ReminderDueness::Pending(reminder_time) => {
                tracing::info!(
                    meeting_id = %meeting.id,
                    reminder_time = %reminder_time.to_rfc3339(),
                    "Meeting reminder pending"
                );
                Ok(true)
            }
        }
    }
}

fn validate(new: &NewNotification) -> Result<()> {
    if new.user_id.trim().is_empty() {
        return Err(NotifyError::Validation("user_id must not be empty".into()));
    }
    if new.title.trim().is_empty() {
        return Err(NotifyError::Validation("title must not be empty".into()));
    }
    if new.message.trim().is_empty() {
        return Err(NotifyError::Validation("message must not be empty".into()));
    }
    Ok(())
}

fn meeting_reminder(meeting: &Meeting, start: &DateTime<FixedOffset>) -> NewNotification {
    NewNotification {
        user_id: meeting.consultant_id.clone(),
        kind: NotificationKind::MeetingReminder,
        title: "Upcoming Meeting Reminder".to_string(),
        message: format!(
            "You have a meeting \"{}\" scheduled for {}",
            meeting.title,
            format_meeting_start(start),
        ),
        related: RelatedEntity::Meeting(meeting.id.clone()),
        action_url: Some(format!("/meetings/{}", meeting.id)),
    }
}
