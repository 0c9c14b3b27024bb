//! Filter-sort engine for student collections
//!
//! Derives the ordered view of the collection shown to the user. The engine
//! is a pure function of `(records, spec)`: applying the same spec to its own
//! output gives the same output, and the input slice is never touched.
//!
//! # Architecture
//!
//! - [`criteria`] - The filter spec, sort keys and their string forms
//! - [`predicates`] - Per-record filter checks, ANDed together
//! - [`ordering`] - Total, stable comparators per sort key
//! - [`engine`] - `apply` and the course list helper
//!
//! # Ordering rules
//!
//! - Names compare accent- and case-insensitively, with ties left in input order
//! - Grades follow the fixed rank table `F` (0) to `A+` (12); unknown grades rank 0
//! - Enrollment dates compare chronologically; unparseable dates sort earliest
//! - Performance compares attendance, with missing performance counted as 0
//!
//! # Example Usage
//!
//! ```rust
//! use roster::app::services::filter_sort::{FilterSpec, SortSpec, apply};
//!
//! # fn example(records: &[roster::StudentRecord]) {
//! let spec = FilterSpec::new()
//!     .with_course("Computer Science")
//!     .with_performance_range(75, 100)
//!     .with_sort(SortSpec::parse("grade_desc").unwrap());
//! let view = apply(records, &spec);
//! println!("{} students match", view.len());
//! # }
//! ```

pub mod criteria;
pub mod engine;
pub mod ordering;
pub mod predicates;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use criteria::{FilterSpec, PerformanceRange, SortDirection, SortKey, SortSpec};
pub use engine::{apply, distinct_courses};
pub use ordering::fold_name;
