//! Tests for the roster service


use std::sync::Arc;

use chrono::NaiveDate;

use crate::app::adapters::kv_store::MemoryStore;
use crate::app::adapters::student_api::{MockApiOptions, MockStudentApi};

use super::Roster;

pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

/// Roster over an empty in-memory collection
pub async fn create_empty_roster() -> Roster<MockStudentApi<MemoryStore>> {
    let api = MockStudentApi::empty(Arc::new(MemoryStore::new()))
        .await
        .unwrap();
    Roster::new(api)
}

/// Roster over the eight sample students
pub async fn create_sample_roster() -> Roster<MockStudentApi<MemoryStore>> {
    let options = MockApiOptions {
        seed_sample_data: true,
        ..Default::default()
    };
    let api = MockStudentApi::open(Arc::new(MemoryStore::new()), options)
        .await
        .unwrap();
    Roster::new(api)
}

/// Two valid rows and one without a course
pub const SMALL_IMPORT: &str = "name,email,course,grade,enrollmentDate\n\
Eva Ruiz,eva@example.com,Biology,A-,2023-02-01\n\
Finn Holt,finn@example.com,,B,2023-02-01\n\
Gus Ward,gus@example.com,Chemistry,,\n";
