//! Tests for the filter-sort engine

pub mod criteria_tests;

use crate::app::models::{Grade, Performance, StudentRecord};

/// Create a record with the fields the engine looks at
pub fn create_record(
    id: u64,
    name: &str,
    course: &str,
    grade: &str,
    enrollment_date: &str,
    attendance: Option<u8>,
) -> StudentRecord {
    StudentRecord {
        id,
        name: name.to_string(),
        email: format!("{}@school.test", name.to_lowercase().replace(' ', ".")),
        course: course.to_string(),
        grade: Grade::new(grade),
        enrollment_date: enrollment_date.to_string(),
        avatar: String::new(),
        performance: attendance.map(|attendance| Performance {
            attendance,
            ..Default::default()
        }),
        notes: None,
    }
}

/// A small mixed collection used across the engine tests
pub fn create_sample_records() -> Vec<StudentRecord> {
    vec![
        create_record(1, "Zoe Park", "Physics", "B", "2023-09-01", Some(92)),
        create_record(2, "Émile Durand", "Mathematics", "A-", "2022-01-15", Some(80)),
        create_record(3, "adam smith", "Physics", "F", "2024-02-10", None),
        create_record(4, "Bea Khan", "Computer Science", "A+", "not a date", Some(65)),
        create_record(5, "Carl Ode", "Mathematics", "B", "2023-09-01", Some(80)),
    ]
}

pub fn ids(records: &[StudentRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}
