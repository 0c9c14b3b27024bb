//! Export rows for CSV download
//!
//! Only the portable core fields leave the system; ids, avatars, performance
//! and notes stay behind.

use chrono::NaiveDate;

use crate::app::models::StudentRecord;
use crate::app::services::csv_codec::FieldRow;
use crate::constants::EXPORT_FILE_PREFIX;

/// Core fields of one record in export column order
pub fn export_row(record: &StudentRecord) -> FieldRow {
    vec![
        ("name".to_string(), record.name.clone()),
        ("email".to_string(), record.email.clone()),
        ("course".to_string(), record.course.clone()),
        ("grade".to_string(), record.grade.to_string()),
        ("enrollmentDate".to_string(), record.enrollment_date.clone()),
    ]
}

pub fn export_rows(records: &[StudentRecord]) -> Vec<FieldRow> {
    records.iter().map(export_row).collect()
}

/// Download name such as `student_data_2024-05-01.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}{}.csv", EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"))
}
