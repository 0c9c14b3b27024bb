//! Tests for the collection store
//!
//! Fixture builders shared by the store test modules.

pub mod attendance_notes_tests;

use crate::app::models::{Grade, NewStudent, StudentRecord};
use crate::app::services::collection_store::StudentStore;
use chrono::NaiveDate;

/// Fixed "today" used wherever the store fills an enrollment date
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// Create a valid new-student payload
pub fn create_new_student(name: &str, course: &str) -> NewStudent {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    NewStudent::new(name, email, course)
}

/// Create a stored record with an explicit id
pub fn create_test_record(id: u64, name: &str, course: &str, grade: &str) -> StudentRecord {
    StudentRecord {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        course: course.to_string(),
        grade: Grade::new(grade),
        enrollment_date: "2023-09-01".to_string(),
        avatar: String::new(),
        performance: None,
        notes: None,
    }
}

/// Create a store holding `count` students added through the public API
pub fn create_populated_store(count: usize) -> StudentStore {
    let mut store = StudentStore::new();
    for i in 0..count {
        store
            .add_on(
                create_new_student(&format!("Student {}", i + 1), "Computer Science"),
                test_today(),
            )
            .unwrap();
    }
    store
}
