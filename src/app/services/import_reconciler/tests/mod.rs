//! Tests for the import reconciler

pub mod export_tests;

use crate::app::models::NewStudent;
use crate::app::services::collection_store::StudentStore;
use crate::app::services::csv_codec::{CsvRow, decode};
use chrono::NaiveDate;

pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// Decode CSV text into rows, panicking on failure
pub fn rows_from_csv(text: &str) -> Vec<CsvRow> {
    decode(text).unwrap().rows
}

/// Three valid rows and one with the email missing
pub const MIXED_IMPORT: &str = "name,email,course,grade,enrollmentDate\n\
Ann Lee,ann@example.com,Art,B+,2023-01-09\n\
Bo Chen,bo@example.com,Physics,,\n\
Cy Diaz,,Maths,A,2022-09-01\n\
Di Eze,di@example.com,History,C,2021-02-02\n";

/// Create `count` valid incoming students
pub fn create_incoming(count: usize) -> Vec<NewStudent> {
    (1..=count)
        .map(|i| {
            NewStudent::new(
                format!("Imported {}", i),
                format!("imported{}@example.com", i),
                "Chemistry",
            )
        })
        .collect()
}

/// Store holding `count` students
pub fn create_store(count: usize) -> StudentStore {
    let mut store = StudentStore::new();
    for i in 1..=count {
        store
            .add_on(
                NewStudent::new(
                    format!("Existing {}", i),
                    format!("existing{}@example.com", i),
                    "Biology",
                ),
                test_today(),
            )
            .unwrap();
    }
    store
}
