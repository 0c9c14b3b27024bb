//! Tests for attendance, performance and note sub-operations

use super::*;
use crate::Error;
use crate::app::models::{
    AttendanceStatus, NewNote, NoteCategory, NotePatch, Performance, ScoredItem,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

#[test]
fn test_mark_attendance_creates_performance() {
    let mut store = create_populated_store(1);

    let record = store
        .mark_attendance(1, day(1), AttendanceStatus::Present)
        .unwrap();

    let performance = record.performance.unwrap();
    assert_eq!(performance.attendance, 100);
    assert_eq!(performance.attendance_records.len(), 1);
}

#[test]
fn test_mark_attendance_last_write_wins_per_day() {
    let mut store = create_populated_store(1);
    store.mark_attendance(1, day(1), AttendanceStatus::Present).unwrap();
    store.mark_attendance(1, day(2), AttendanceStatus::Present).unwrap();
    store.mark_attendance(1, day(3), AttendanceStatus::Absent).unwrap();
    let record = store.mark_attendance(1, day(1), AttendanceStatus::Absent).unwrap();

    let performance = record.performance.unwrap();
    assert_eq!(performance.attendance_records.len(), 3);
    // 1 of 3 present rounds to 33
    assert_eq!(performance.attendance, 33);
}

#[test]
fn test_mark_attendance_unknown_student() {
    let mut store = create_populated_store(1);
    let err = store
        .mark_attendance(5, day(1), AttendanceStatus::Present)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_set_performance_and_summary() {
    let mut store = create_populated_store(1);
    let performance = Performance {
        attendance: 90,
        assignments: vec![
            ScoredItem::new("Essay", 45.0, 50.0),
            ScoredItem::new("Lab", 35.0, 50.0),
        ],
        exams: vec![ScoredItem::new("Midterm", 80.0, 100.0)],
        ..Default::default()
    };

    let record = store.set_performance(1, performance).unwrap();
    let summary = record.performance.unwrap().summary();

    assert_eq!(summary.attendance, 90);
    assert_eq!(summary.average_assignment, Some(80.0));
    assert_eq!(summary.average_exam, Some(80.0));
    assert_eq!(summary.days_recorded, 0);
}

#[test]
fn test_set_performance_rejects_attendance_over_100() {
    let mut store = create_populated_store(1);
    let performance = Performance {
        attendance: 250,
        ..Default::default()
    };

    let err = store.set_performance(1, performance).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(store.get(1).unwrap().performance.is_none());
}

#[test]
fn test_add_rejects_attendance_over_100() {
    let mut store = create_populated_store(1);
    let new = NewStudent {
        performance: Some(Performance {
            attendance: 101,
            ..Default::default()
        }),
        ..NewStudent::new("Nia", "nia@example.com", "Art")
    };

    assert!(matches!(store.add(new), Err(Error::Validation { .. })));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_add_note_assigns_id_and_timestamp() {
    let mut store = create_populated_store(1);
    let note = store
        .add_note(
            1,
            NewNote::new("  Great improvement in lab work ")
                .with_category(NoteCategory::Achievement)
                .important(),
        )
        .unwrap();

    assert!(!note.id.is_empty());
    assert_eq!(note.content, "Great improvement in lab work");
    assert_eq!(note.category, NoteCategory::Achievement);
    assert!(note.important);
    assert!(note.updated_at.is_none());
    assert_eq!(store.get(1).unwrap().notes().len(), 1);
}

#[test]
fn test_add_note_rejects_blank_content() {
    let mut store = create_populated_store(1);
    assert!(store.add_note(1, NewNote::new("   ")).is_err());
    assert!(store.get(1).unwrap().notes().is_empty());
}

#[test]
fn test_update_note_sets_updated_at() {
    let mut store = create_populated_store(1);
    let note = store.add_note(1, NewNote::new("Missed homework")).unwrap();

    let updated = store
        .update_note(
            1,
            &note.id,
            &NotePatch {
                content: Some("Handed homework in late".to_string()),
                category: Some(NoteCategory::Behavior),
                important: None,
            },
        )
        .unwrap();

    assert_eq!(updated.id, note.id);
    assert_eq!(updated.content, "Handed homework in late");
    assert_eq!(updated.category, NoteCategory::Behavior);
    assert!(!updated.important);
    assert!(updated.updated_at.is_some());
    assert_eq!(updated.created_at, note.created_at);
}

#[test]
fn test_delete_note() {
    let mut store = create_populated_store(1);
    let first = store.add_note(1, NewNote::new("First")).unwrap();
    let second = store.add_note(1, NewNote::new("Second")).unwrap();

    let removed = store.delete_note(1, &first.id).unwrap();
    assert_eq!(removed.id, first.id);

    let remaining = store.get(1).unwrap();
    assert_eq!(remaining.notes().len(), 1);
    assert_eq!(remaining.notes()[0].id, second.id);

    assert!(store.delete_note(1, &first.id).unwrap_err().is_not_found());
}
