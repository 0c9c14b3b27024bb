//! Row validation and normalisation
//!
//! Invalid rows are reported and skipped; they never stop the valid rows
//! from importing.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::app::models::{Grade, NewStudent};
use crate::app::services::collection_store::RecordDefaults;
use crate::app::services::csv_codec::CsvRow;
use crate::constants::REQUIRED_IMPORT_COLUMNS;

/// Validation failure for one data row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// Data row number, starting at 1
    pub row: usize,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Result of validating a batch of rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    pub errors: Vec<RowError>,
    pub normalized: Vec<NewStudent>,
}

impl ValidationOutcome {
    pub fn total_rows(&self) -> usize {
        self.errors.len() + self.normalized.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Validate decoded rows and normalise the valid ones
///
/// A row is valid when `name`, `email` and `course` are all non-empty. Valid
/// rows get `N/A` for a missing grade, `today` for a missing enrollment date
/// and a placeholder avatar built from the name.
pub fn validate(rows: &[CsvRow], today: NaiveDate, defaults: &RecordDefaults) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for row in rows {
        let missing: Vec<&str> = REQUIRED_IMPORT_COLUMNS
            .iter()
            .copied()
            .filter(|column| row.non_empty(column).is_none())
            .collect();

        if !missing.is_empty() {
            let error = RowError {
                row: row.row,
                message: format!("Missing {}", missing.join(", ")),
            };
            debug!("Rejected import row: {}", error);
            outcome.errors.push(error);
            continue;
        }

        outcome.normalized.push(normalize_row(row, today, defaults));
    }

    info!(
        "Validated {} import rows: {} valid, {} rejected",
        rows.len(),
        outcome.normalized.len(),
        outcome.errors.len()
    );
    outcome
}

fn normalize_row(row: &CsvRow, today: NaiveDate, defaults: &RecordDefaults) -> NewStudent {
    let name = row.non_empty("name").unwrap_or_default().to_string();
    let avatar = row
        .non_empty("avatar")
        .map(str::to_string)
        .unwrap_or_else(|| defaults.placeholder_avatar(&name));

    NewStudent {
        email: row.non_empty("email").unwrap_or_default().to_string(),
        course: row.non_empty("course").unwrap_or_default().to_string(),
        grade: Some(row.non_empty("grade").map(Grade::new).unwrap_or_default()),
        enrollment_date: Some(
            row.non_empty("enrollmentDate")
                .map(str::to_string)
                .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        ),
        avatar: Some(avatar),
        name,
        ..Default::default()
    }
}
