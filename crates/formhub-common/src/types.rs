use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Notification category tag, as stored in the `kind` column.
///
/// The tag set mirrors the events the client portals render; unknown tags
/// are rejected at the boundary by [`FromStr`](std::str::FromStr).
///
/// # Examples
///
/// ```
/// use formhub_common::types::NotificationKind;
///
/// let kind: NotificationKind = "meeting_reminder".parse().unwrap();
/// assert_eq!(kind, NotificationKind::MeetingReminder);
/// assert_eq!(kind.to_string(), "meeting_reminder");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    MeetingReminder,
    MeetingScheduled,
    InvoiceCreated,
    PaymentReminder,
    PaymentOverdue,
    PaymentReceived,
    DocumentUploaded,
    MessageSent,
    TaskAssigned,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            NotificationKind::MeetingReminder => "meeting_reminder",
            NotificationKind::MeetingScheduled => "meeting_scheduled",
            NotificationKind::InvoiceCreated => "invoice_created",
            NotificationKind::PaymentReminder => "payment_reminder",
            NotificationKind::PaymentOverdue => "payment_overdue",
            NotificationKind::PaymentReceived => "payment_received",
            NotificationKind::DocumentUploaded => "document_uploaded",
            NotificationKind::MessageSent => "message_sent",
            NotificationKind::TaskAssigned => "task_assigned",
        };
        write!(f, "{tag}")
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meeting_reminder" => Ok(NotificationKind::MeetingReminder),
            "meeting_scheduled" => Ok(NotificationKind::MeetingScheduled),
            "invoice_created" => Ok(NotificationKind::InvoiceCreated),
            "payment_reminder" => Ok(NotificationKind::PaymentReminder),
            "payment_overdue" => Ok(NotificationKind::PaymentOverdue),
            "payment_received" => Ok(NotificationKind::PaymentReceived),
            "document_uploaded" => Ok(NotificationKind::DocumentUploaded),
            "message_sent" => Ok(NotificationKind::MessageSent),
            "task_assigned" => Ok(NotificationKind::TaskAssigned),
            _ => Err(format!("unknown notification kind: {s}")),
        }
    }
}

/// Typed reference from a notification back to the entity that caused it.
///
/// At most one variant is ever carried; the union is flattened to the three
/// nullable `related_*` columns only at the persistence boundary.
///
/// # Examples
///
/// ```
/// use formhub_common::types::RelatedEntity;
///
/// let related = RelatedEntity::Meeting("m-17".to_string());
/// assert_eq!(related.meeting_id(), Some("m-17"));
/// assert_eq!(related.order_id(), None);
/// assert_eq!(RelatedEntity::default(), RelatedEntity::None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "entity", content = "id")]
pub enum RelatedEntity {
    Meeting(String),
    Project(String),
    Order(String),
    #[default]
    None,
}

impl RelatedEntity {
    pub fn meeting_id(&self) -> Option<&str> {
        match self {
            RelatedEntity::Meeting(id) => Some(id),
            _ => None,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            RelatedEntity::Project(id) => Some(id),
            _ => None,
        }
    }

    pub fn order_id(&self) -> Option<&str> {
        match self {
            RelatedEntity::Order(id) => Some(id),
            _ => None,
        }
    }
}

/// A notification to be persisted.
///
/// `user_id`, `kind`, `title`, and `message` are always present; the
/// optional fields default to explicit "absent" values so persistence
/// always receives a total record. Validation of the string fields happens
/// in the dispatch core before any insert is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub related: RelatedEntity,
    #[serde(default)]
    pub action_url: Option<String>,
}

impl NewNotification {
    /// Bare notification with no related entity and no action link
    /// (e.g. `message_sent`).
    pub fn new(user_id: &str, kind: NotificationKind, title: &str, message: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            related: RelatedEntity::None,
            action_url: None,
        }
    }

    /// "Meeting booked" event for the given recipient, linking back to the
    /// meeting detail page.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use formhub_common::types::{Meeting, NewNotification, NotificationKind};
    ///
    /// let now = Utc::now();
    /// let meeting = Meeting {
    ///     id: "m-17".to_string(),
    ///     client_id: "client-01".to_string(),
    ///     consultant_id: "consultant-01".to_string(),
    ///     title: "Formation kickoff".to_string(),
    ///     description: None,
    ///     start_time: "2026-12-05T14:30:00+00:00".to_string(),
    ///     end_time: "2026-12-05T15:30:00+00:00".to_string(),
    ///     status: "scheduled".to_string(),
    ///     meeting_type: "consultation".to_string(),
    ///     created_at: now,
    ///     updated_at: now,
    /// };
    /// let event = NewNotification::meeting_scheduled("client-01", &meeting);
    /// assert_eq!(event.kind, NotificationKind::MeetingScheduled);
    /// assert_eq!(event.action_url.as_deref(), Some("/meetings/m-17"));
    /// assert!(event.message.contains("Dec 5, 02:30 PM"));
    /// ```
    pub fn meeting_scheduled(user_id: &str, meeting: &Meeting) -> Self {
        let when = match DateTime::parse_from_rfc3339(&meeting.start_time) {
            Ok(dt) => format_meeting_start(&dt),
            Err(_) => meeting.start_time.clone(),
        };
        Self {
            user_id: user_id.to_string(),
            kind: NotificationKind::MeetingScheduled,
            title: "New Meeting Scheduled".to_string(),
            message: format!("Meeting \"{}\" is booked for {}", meeting.title, when),
            related: RelatedEntity::Meeting(meeting.id.clone()),
            action_url: Some(format!("/meetings/{}", meeting.id)),
        }
    }

    /// Billing event (`invoice_created`, `payment_*`), linking the order.
    pub fn order_event(
        user_id: &str,
        kind: NotificationKind,
        order_id: &str,
        title: &str,
        message: &str,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            related: RelatedEntity::Order(order_id.to_string()),
            action_url: Some(format!("/orders/{order_id}")),
        }
    }

    /// Project event (`document_uploaded`, `task_assigned`, ...), linking
    /// the project.
    ///
    /// # Examples
    ///
    /// ```
    /// use formhub_common::types::{NewNotification, NotificationKind, RelatedEntity};
    ///
    /// let event = NewNotification::project_event(
    ///     "client-01",
    ///     NotificationKind::DocumentUploaded,
    ///     "p-3",
    ///     "Document Uploaded",
    ///     "Articles of incorporation uploaded",
    /// );
    /// assert_eq!(event.related, RelatedEntity::Project("p-3".to_string()));
    /// assert_eq!(event.action_url.as_deref(), Some("/projects/p-3"));
    /// ```
    pub fn project_event(
        user_id: &str,
        kind: NotificationKind,
        project_id: &str,
        title: &str,
        message: &str,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            related: RelatedEntity::Project(project_id.to_string()),
            action_url: Some(format!("/projects/{project_id}")),
        }
    }
}

/// A consulting meeting record (full row from the `meetings` table).
///
/// The dispatch core consumes this read-only; scheduling and status
/// transitions belong to the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub client_id: String,
    pub consultant_id: String,
    pub title: String,
    pub description: Option<String>,
    /// RFC 3339; parsed by the reminder path, carried verbatim otherwise.
    pub start_time: String,
    pub end_time: String,
    /// scheduled / completed / cancelled
    pub status: String,
    pub meeting_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Render a meeting start instant the way the portals show it
/// (en-US short month, zero-padded clock, AM/PM).
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use formhub_common::types::format_meeting_start;
///
/// let start = DateTime::parse_from_rfc3339("2026-12-05T14:30:00+00:00").unwrap();
/// assert_eq!(format_meeting_start(&start), "Dec 5, 02:30 PM");
/// ```
pub fn format_meeting_start(start: &DateTime<FixedOffset>) -> String {
    start.format("%b %-d, %I:%M %p").to_string()
}
