//! Roster service: the dashboard flows over a student API
//!
//! [`Roster`] composes the student API with the filter-sort engine, the CSV
//! codec and the import reconciler. Every read goes to the API, so views are
//! always derived from a fresh snapshot.
//!
//! # Import flow
//!
//! 1. [`Roster::prepare_import`] decodes and validates the file and records
//!    how many students already exist
//! 2. The caller shows row errors and, when [`ImportPlan::needs_decision`] is
//!    true, asks for merge or replace
//! 3. [`Roster::commit_import`] applies the valid rows with that mode
//!
//! # Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use roster::app::adapters::kv_store::MemoryStore;
//! use roster::app::adapters::student_api::MockStudentApi;
//! use roster::app::services::import_reconciler::ImportMode;
//! use roster::app::services::roster::Roster;
//!
//! # async fn example(csv_text: &str) -> roster::Result<()> {
//! let api = MockStudentApi::empty(Arc::new(MemoryStore::new())).await?;
//! let roster = Roster::new(api);
//!
//! let plan = roster.prepare_import(csv_text).await?;
//! for error in &plan.validation.errors {
//!     println!("{}", error);
//! }
//! let report = roster.commit_import(plan, Some(ImportMode::Merge), None).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod plan;
pub mod service;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use plan::ImportPlan;
pub use service::{CsvExport, Roster};
