//! Tests for notification history and preferences

use super::*;
use crate::app::adapters::kv_store::KeyValueStore;
use crate::app::models::notification::{NotificationPreferences, default_preferences};

#[tokio::test]
async fn test_empty_history() {
    let center = create_center();
    assert!(center.history().await.unwrap().is_empty());
    assert_eq!(center.unread_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_prepends_unread_entries() {
    let center = create_center();
    let first = center.add(grade_update("First")).await.unwrap();
    let second = center.add(grade_update("Second")).await.unwrap();

    let history = center.history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);
    assert_eq!(history[0].kind, "grade_update");
    assert!(!history[0].read);
    assert_eq!(center.unread_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_mark_read_and_mark_all_read() {
    let center = create_center();
    let first = center.add(grade_update("First")).await.unwrap();
    center.add(grade_update("Second")).await.unwrap();
    center.add(grade_update("Third")).await.unwrap();

    let marked = center.mark_read(&first.id).await.unwrap();
    assert!(marked.read);
    assert_eq!(center.unread_count().await.unwrap(), 2);

    assert_eq!(center.mark_all_read().await.unwrap(), 2);
    assert_eq!(center.unread_count().await.unwrap(), 0);
    assert_eq!(center.mark_all_read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_mark_read_unknown_id() {
    let center = create_center();
    let err = center.mark_read("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_and_clear() {
    let center = create_center();
    let first = center.add(grade_update("First")).await.unwrap();
    center.add(grade_update("Second")).await.unwrap();

    let removed = center.delete(&first.id).await.unwrap();
    assert_eq!(removed.title, "First");
    assert!(center.delete(&first.id).await.unwrap_err().is_not_found());

    assert_eq!(center.clear().await.unwrap(), 1);
    assert!(center.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreadable_history_reads_as_empty() {
    let center = create_center_with(&[("notificationHistory", "[{broken")]);
    assert!(center.history().await.unwrap().is_empty());

    // A later write replaces the broken blob
    center.add(grade_update("Fresh")).await.unwrap();
    assert_eq!(center.history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_history_written_by_other_clients_loads() {
    let stored = r#"[{"id":"1700000000000","type":"custom_alert","title":"Hi","message":"x","timestamp":"2024-01-02T03:04:05.000Z","read":false}]"#;
    let center = create_center_with(&[("notificationHistory", stored)]);

    let history = center.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, "custom_alert");
    assert_eq!(history[0].notification_type(), None);
}

#[tokio::test]
async fn test_missing_preferences_enable_everything() {
    let center = create_center();
    assert_eq!(center.preferences().await.unwrap(), default_preferences());
    for kind in NotificationType::ALL {
        assert!(center.is_enabled(kind).await.unwrap());
    }
}

#[tokio::test]
async fn test_only_explicit_true_is_enabled() {
    let center = create_center_with(&[(
        "notificationPreferences_user-1",
        r#"{"grade_update": true, "attendance_alert": false}"#,
    )]);

    assert!(center.is_enabled(NotificationType::GradeUpdate).await.unwrap());
    assert!(!center.is_enabled(NotificationType::AttendanceAlert).await.unwrap());
    // Absent from a stored map means disabled
    assert!(!center.is_enabled(NotificationType::PerformanceUpdate).await.unwrap());
}

#[tokio::test]
async fn test_unreadable_preferences_disable_everything() {
    let center = create_center_with(&[("notificationPreferences_user-1", "not json")]);
    assert_eq!(center.preferences().await.unwrap(), NotificationPreferences::new());
    assert!(!center.is_enabled(NotificationType::GradeUpdate).await.unwrap());
}

#[tokio::test]
async fn test_set_enabled_persists_per_user() {
    let center = create_center();
    center
        .set_enabled(NotificationType::AssignmentReminder, false)
        .await
        .unwrap();

    assert!(!center.is_enabled(NotificationType::AssignmentReminder).await.unwrap());
    assert!(center.is_enabled(NotificationType::GradeUpdate).await.unwrap());

    let raw = center
        .kv()
        .get("notificationPreferences_user-1")
        .await
        .unwrap();
    assert!(raw.is_some_and(|text| text.contains("\"assignment_reminder\":false")));
}

#[tokio::test]
async fn test_notify_respects_preferences() {
    let center = create_center();
    center
        .set_enabled(NotificationType::GradeUpdate, false)
        .await
        .unwrap();

    assert!(center.notify(grade_update("Muted")).await.unwrap().is_none());

    let announcement = NewNotification::new(
        NotificationType::GeneralAnnouncement,
        "Closed Friday",
        "No classes on Friday",
    );
    assert!(center.notify(announcement).await.unwrap().is_some());
    assert_eq!(center.history().await.unwrap().len(), 1);
}
