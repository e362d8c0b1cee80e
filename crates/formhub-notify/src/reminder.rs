use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating a meeting's reminder window against a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderDueness {
    /// The reminder instant has passed; notify now.
    Due,
    /// The reminder comes due at the carried instant.
    Pending(DateTime<Utc>),
}

/// Lead-time policy for meeting reminders.
///
/// # Examples
///
/// ```
/// use formhub_notify::reminder::ReminderPolicy;
///
/// let policy = ReminderPolicy::default();
/// assert_eq!(policy.lead_time_hours, 24);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPolicy {
    /// Hours before `start_time` at which the reminder becomes due.
    #[serde(default = "default_lead_time_hours")]
    pub lead_time_hours: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            lead_time_hours: default_lead_time_hours(),
        }
    }
}

fn default_lead_time_hours() -> i64 {
    24
}

/// Pure dueness check: `Due` once `start_time - lead <= now`, otherwise
/// `Pending` carrying the computed reminder instant.
///
/// A `start_time` already in the past is still `Due`; suppressing reminders
/// for finished meetings is the caller's policy.
pub fn reminder_dueness(
    start_time: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: &ReminderPolicy,
) -> ReminderDueness {
    let reminder_time = start_time - Duration::hours(policy.lead_time_hours);
    if reminder_time <= now {
        ReminderDueness::Due
    } else {
        ReminderDueness::Pending(reminder_time)
    }
}
