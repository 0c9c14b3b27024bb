//! Sample students seeded into an empty collection on first run

use crate::app::models::{Grade, StudentRecord};

const SAMPLES: &[(&str, &str, &str, &str, &str)] = &[
    ("John Doe", "john.doe@example.com", "Computer Science", "A", "2023-09-01"),
    ("Jane Smith", "jane.smith@example.com", "Mathematics", "B+", "2023-08-15"),
    ("Robert Johnson", "robert.johnson@example.com", "Physics", "A-", "2023-09-05"),
    ("Emily Davis", "emily.davis@example.com", "Computer Science", "B", "2023-09-10"),
    ("Michael Wilson", "michael.wilson@example.com", "Mathematics", "A+", "2023-08-20"),
    ("Sarah Brown", "sarah.brown@example.com", "Physics", "B-", "2023-09-03"),
    ("David Miller", "david.miller@example.com", "Computer Science", "A", "2023-08-25"),
    ("Jessica Taylor", "jessica.taylor@example.com", "Mathematics", "B+", "2023-09-07"),
];

/// The eight sample students with ids 1 to 8
pub fn sample_students() -> Vec<StudentRecord> {
    SAMPLES
        .iter()
        .zip(1u64..)
        .map(|(&(name, email, course, grade, enrolled), id)| StudentRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            course: course.to_string(),
            grade: Grade::new(grade),
            enrollment_date: enrolled.to_string(),
            avatar: format!("https://mui.com/static/images/avatar/{}.jpg", id),
            performance: None,
            notes: None,
        })
        .collect()
}
