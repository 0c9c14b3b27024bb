//! Tests for template rendering

use super::*;
use crate::app::models::{Grade, Performance, StudentRecord};
use crate::app::services::notifications::{TemplateRenderer, template_for};
use std::collections::BTreeMap;

fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn student_with_attendance(attendance: Option<u8>) -> StudentRecord {
    StudentRecord {
        id: 1,
        name: "Ann Lee".to_string(),
        email: "ann@example.com".to_string(),
        course: "Physics".to_string(),
        grade: Grade::new("B"),
        enrollment_date: "2023-09-01".to_string(),
        avatar: String::new(),
        performance: attendance.map(|attendance| Performance {
            attendance,
            ..Default::default()
        }),
        notes: None,
    }
}

#[test]
fn test_every_type_has_a_template() {
    for kind in NotificationType::ALL {
        let template = template_for(kind);
        assert!(!template.subject.is_empty());
        assert!(template.body.contains("{studentName}"));
    }
}

#[test]
fn test_fill_replaces_known_and_keeps_unknown() {
    let renderer = TemplateRenderer::new().unwrap();
    let text = renderer.fill(
        "{studentName} in {courseName} due {dueDate} {studentName}",
        &values(&[("studentName", "Ann"), ("courseName", "Art")]),
    );
    assert_eq!(text, "Ann in Art due {dueDate} Ann");
}

#[test]
fn test_fill_does_not_reinterpret_substituted_values() {
    let renderer = TemplateRenderer::new().unwrap();
    let text = renderer.fill(
        "{a}",
        &values(&[("a", "{b}"), ("b", "nope")]),
    );
    assert_eq!(text, "{b}");
}

#[test]
fn test_render_grade_update() {
    let renderer = TemplateRenderer::new().unwrap();
    let rendered = renderer.render(
        NotificationType::GradeUpdate,
        &values(&[("studentName", "Ann"), ("courseName", "Physics"), ("grade", "A-")]),
    );

    assert_eq!(rendered.subject, "Grade Update for Physics");
    assert!(rendered.body.starts_with("Hello Ann,\n\nYour grade for Physics has been updated to A-."));
    assert!(rendered.body.ends_with("Best regards,\nStudent Dashboard Team"));
}

#[test]
fn test_low_attendance_alert() {
    let renderer = TemplateRenderer::new().unwrap();

    let alert = renderer
        .low_attendance_alert(&student_with_attendance(Some(60)), 75)
        .unwrap();
    assert_eq!(alert.kind, NotificationType::AttendanceAlert);
    assert_eq!(alert.title, "Attendance Alert for Physics");
    assert_eq!(alert.message, "Ann Lee is at 60% attendance in Physics");

    assert!(renderer.low_attendance_alert(&student_with_attendance(Some(75)), 75).is_none());
    assert!(renderer.low_attendance_alert(&student_with_attendance(None), 75).is_none());
}
