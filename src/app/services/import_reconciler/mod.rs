//! Import reconciliation for student collections
//!
//! Takes decoded CSV rows through validation into the collection store and
//! back out again for export.
//!
//! # Architecture
//!
//! - [`validation`] - Per-row validation and normalisation (partial failure)
//! - [`reconcile`] - Merge/replace of validated rows into the store
//! - [`export`] - Portable export rows and the download file name
//! - [`stats`] - Import reports
//!
//! # Import pipeline
//!
//! 1. **Validate**: every row missing `name`, `email` or `course` produces one
//!    row error and is excluded; the remaining rows are normalised with
//!    defaults for grade, enrollment date and avatar
//! 2. **Decide**: importing into a non-empty collection needs an explicit
//!    [`ImportMode`]; without one the counts are handed back to the caller
//! 3. **Reconcile**: `Replace` clears the collection first, `Merge` keeps it;
//!    either way every incoming row is added and receives a fresh id
//!
//! # Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use roster::app::services::collection_store::{RecordDefaults, StudentStore};
//! use roster::app::services::csv_codec::decode;
//! use roster::app::services::import_reconciler::{ImportMode, reconcile, validate};
//!
//! # fn example(text: &str) -> roster::Result<()> {
//! let decoded = decode(text)?;
//! let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
//! let outcome = validate(&decoded.rows, today, &RecordDefaults::default());
//!
//! let mut store = StudentStore::new();
//! let result = reconcile(&mut store, outcome.normalized, Some(ImportMode::Merge), None)?;
//! println!("{:?}", result);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod reconcile;
pub mod stats;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use export::{export_file_name, export_row, export_rows};
pub use reconcile::{ImportMode, ReconcileOutcome, reconcile};
pub use stats::ImportReport;
pub use validation::{RowError, ValidationOutcome, validate};
