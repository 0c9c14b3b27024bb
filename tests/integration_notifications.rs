//! End-to-end tests for notifications and the HTTP-shaped student routes
//! over a file-backed store shared by both services.

use roster::app::adapters::kv_store::JsonFileStore;
use roster::app::adapters::student_api::{MockApiOptions, MockStudentApi, StudentApi};
use roster::app::models::AttendanceStatus;
use roster::app::models::notification::NotificationType;
use roster::app::services::notifications::{NotificationCenter, TemplateRenderer};
use roster::app::services::roster::Roster;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_attendance_alerts_respect_preferences_and_persist() {
    let temp_dir = TempDir::new().unwrap();
    let kv = Arc::new(JsonFileStore::new(temp_dir.path()));

    let options = MockApiOptions {
        seed_sample_data: true,
        ..Default::default()
    };
    let roster = Roster::new(MockStudentApi::open(Arc::clone(&kv), options).await.unwrap());
    let center = NotificationCenter::new(Arc::clone(&kv), "user-1");

    let monday = chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let api = roster.api();
    api.mark_attendance(3, monday, AttendanceStatus::Absent).await.unwrap();
    api.mark_attendance(4, monday, AttendanceStatus::Present).await.unwrap();

    let renderer = TemplateRenderer::new().unwrap();
    for record in roster.at_risk(75).await.unwrap() {
        if let Some(alert) = renderer.low_attendance_alert(&record, 75) {
            center.notify(alert).await.unwrap();
        }
    }

    let history = center.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, "attendance_alert");
    assert_eq!(history[0].title, "Attendance Alert for Physics");

    // Disabled alerts are skipped
    center
        .set_enabled(NotificationType::AttendanceAlert, false)
        .await
        .unwrap();
    let record = api.get(3).await.unwrap();
    let alert = renderer.low_attendance_alert(&record, 75).unwrap();
    assert!(center.notify(alert).await.unwrap().is_none());

    // Another center on the same directory sees the same history
    let reopened = NotificationCenter::new(
        Arc::new(JsonFileStore::new(temp_dir.path())),
        "user-2",
    );
    assert_eq!(reopened.unread_count().await.unwrap(), 1);
    assert!(reopened
        .is_enabled(NotificationType::AttendanceAlert)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_routes_over_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let api = MockStudentApi::empty(Arc::new(JsonFileStore::new(temp_dir.path())))
        .await
        .unwrap();

    let body = json!({"name": "Kim Lo", "email": "kim@example.com", "course": "Art"});
    let created = api.route("POST", "/api/students", Some(&body)).await;
    assert_eq!(created.status, 201);
    assert_eq!(created.body["student"]["id"], 1);

    let listed = api.route("GET", "/api/students", None).await;
    assert!(listed.is_success());
    assert_eq!(listed.body["students"].as_array().map(Vec::len), Some(1));

    let deleted = api.route("DELETE", "/api/students/1", None).await;
    assert!(deleted.is_success());

    let missing = api.route("GET", "/api/students/1", None).await;
    assert_eq!(missing.status, 404);

    let reopened = MockStudentApi::empty(Arc::new(JsonFileStore::new(temp_dir.path())))
        .await
        .unwrap();
    assert!(reopened.list().await.unwrap().is_empty());
}
