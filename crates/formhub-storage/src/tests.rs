use chrono::{Duration, Utc};
use tempfile::TempDir;

use crate::error::StorageError;
use crate::store::{MarkReadOutcome, NewMeeting, NotificationFilter, Store};
use formhub_common::types::{NewNotification, NotificationKind, RelatedEntity};

async fn setup() -> (TempDir, Store) {
    formhub_common::id::init(1, 1);
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}/formhub.db?mode=rwc", dir.path().display());
    let store = Store::new(&url).await.unwrap();
    (dir, store)
}

fn make_notification(user: &str, title: &str) -> NewNotification {
    NewNotification::new(user, NotificationKind::MessageSent, title, "You have a new message")
}

fn make_meeting(consultant: &str, title: &str, start_in_hours: i64) -> NewMeeting {
    let start = Utc::now() + Duration::hours(start_in_hours);
    let end = start + Duration::hours(1);
    NewMeeting {
        client_id: "client-01".to_string(),
        consultant_id: consultant.to_string(),
        title: title.to_string(),
        description: None,
        start_time: start.to_rfc3339(),
        end_time: end.to_rfc3339(),
    }
}

#[tokio::test]
async fn insert_defaults_optional_fields_to_absent() {
    let (_dir, store) = setup().await;

    let row = store
        .insert_notification(&make_notification("consultant-01", "Hello"))
        .await
        .unwrap();

    assert_eq!(row.user_id, "consultant-01");
    assert_eq!(row.kind, "message_sent");
    assert!(row.related_meeting_id.is_none());
    assert!(row.related_project_id.is_none());
    assert!(row.related_order_id.is_none());
    assert!(row.action_url.is_none());
    assert!(!row.is_read);
    assert!(row.read_at.is_none());
}

#[tokio::test]
async fn insert_flattens_related_reference() {
    let (_dir, store) = setup().await;

    let mut new = make_notification("consultant-01", "Reminder");
    new.kind = NotificationKind::MeetingReminder;
    new.related = RelatedEntity::Meeting("m-17".to_string());
    new.action_url = Some("/meetings/m-17".to_string());

    let row = store.insert_notification(&new).await.unwrap();
    assert_eq!(row.kind, "meeting_reminder");
    assert_eq!(row.related_meeting_id.as_deref(), Some("m-17"));
    assert!(row.related_project_id.is_none());
    assert!(row.related_order_id.is_none());
    assert_eq!(row.action_url.as_deref(), Some("/meetings/m-17"));
}

#[tokio::test]
async fn list_is_newest_first_and_capped() {
    let (_dir, store) = setup().await;

    for title in ["first", "second", "third"] {
        store
            .insert_notification(&make_notification("consultant-01", title))
            .await
            .unwrap();
    }

    let rows = store
        .list_notifications("consultant-01", &NotificationFilter::default(), Some(2))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].created_at >= rows[1].created_at);

    // Other users see nothing
    let rows = store
        .list_notifications("someone-else", &NotificationFilter::default(), None)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn unread_filter_and_count() {
    let (_dir, store) = setup().await;

    let a = store
        .insert_notification(&make_notification("consultant-01", "a"))
        .await
        .unwrap();
    store
        .insert_notification(&make_notification("consultant-01", "b"))
        .await
        .unwrap();

    assert_eq!(
        store.count_unread_notifications("consultant-01").await.unwrap(),
        2
    );

    let outcome = store
        .mark_notification_read(&a.id, "consultant-01")
        .await
        .unwrap();
    assert_eq!(outcome, MarkReadOutcome::Marked);

    let unread = store
        .list_notifications(
            "consultant-01",
            &NotificationFilter { unread_only: true },
            None,
        )
        .await
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].title, "b");
    assert_eq!(
        store.count_unread_notifications("consultant-01").await.unwrap(),
        1
    );

    let read_back = store.get_notification_by_id(&a.id).await.unwrap().unwrap();
    assert!(read_back.is_read);
    assert!(read_back.read_at.is_some());
}

#[tokio::test]
async fn mark_read_checks_ownership() {
    let (_dir, store) = setup().await;

    let row = store
        .insert_notification(&make_notification("consultant-01", "private"))
        .await
        .unwrap();

    let outcome = store
        .mark_notification_read(&row.id, "intruder")
        .await
        .unwrap();
    assert_eq!(outcome, MarkReadOutcome::NotOwner);

    let untouched = store.get_notification_by_id(&row.id).await.unwrap().unwrap();
    assert!(!untouched.is_read);

    let err = store
        .mark_notification_read("no-such-id", "consultant-01")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "notification", .. }));
}

#[tokio::test]
async fn mark_all_read_returns_rows_affected() {
    let (_dir, store) = setup().await;

    for title in ["a", "b", "c"] {
        store
            .insert_notification(&make_notification("consultant-01", title))
            .await
            .unwrap();
    }
    store
        .insert_notification(&make_notification("consultant-02", "other"))
        .await
        .unwrap();

    assert_eq!(
        store.mark_all_notifications_read("consultant-01").await.unwrap(),
        3
    );
    assert_eq!(
        store.mark_all_notifications_read("consultant-01").await.unwrap(),
        0
    );
    // The other user's row is untouched
    assert_eq!(
        store.count_unread_notifications("consultant-02").await.unwrap(),
        1
    );
}

#[tokio::test]
async fn duplicate_inserts_create_duplicate_rows() {
    let (_dir, store) = setup().await;

    let new = make_notification("consultant-01", "dup");
    store.insert_notification(&new).await.unwrap();
    store.insert_notification(&new).await.unwrap();

    let rows = store
        .list_notifications("consultant-01", &NotificationFilter::default(), None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);
}

#[tokio::test]
async fn meeting_roundtrip() {
    let (_dir, store) = setup().await;

    let meeting = store
        .insert_meeting(&make_meeting("consultant-01", "Formation kickoff", 48))
        .await
        .unwrap();
    assert_eq!(meeting.status, "scheduled");
    assert_eq!(meeting.meeting_type, "consultation");

    let fetched = store.get_meeting_by_id(&meeting.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Formation kickoff");
    assert_eq!(fetched.consultant_id, "consultant-01");

    assert!(store.get_meeting_by_id("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn sweep_query_respects_cutoff() {
    let (_dir, store) = setup().await;

    store
        .insert_meeting(&make_meeting("consultant-01", "soon", 23))
        .await
        .unwrap();
    store
        .insert_meeting(&make_meeting("consultant-01", "later", 48))
        .await
        .unwrap();

    let cutoff = Utc::now() + Duration::hours(24);
    let due_soon = store.list_meetings_starting_before(cutoff).await.unwrap();
    assert_eq!(due_soon.len(), 1);
    assert_eq!(due_soon[0].title, "soon");

    let all = store
        .list_meetings_starting_before(Utc::now() + Duration::hours(72))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "soon");
}
