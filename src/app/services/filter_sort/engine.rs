//! View derivation over a student collection

use std::collections::BTreeSet;

use tracing::debug;

use crate::app::models::StudentRecord;

use super::criteria::FilterSpec;
use super::ordering::{compare, fold_name};
use super::predicates::matches;

/// Filter then sort `records` according to `spec`
///
/// Returns copies in the derived order. An inverted performance range yields
/// an empty view. Without a sort the input order is kept.
pub fn apply(records: &[StudentRecord], spec: &FilterSpec) -> Vec<StudentRecord> {
    if spec.performance_range.is_some_and(|r| r.is_inverted()) {
        debug!("Inverted performance range, returning empty view");
        return Vec::new();
    }

    let mut view: Vec<StudentRecord> = records
        .iter()
        .filter(|record| matches(record, spec))
        .cloned()
        .collect();

    if let Some(sort) = &spec.sort {
        // sort_by is stable
        view.sort_by(|a, b| compare(a, b, sort));
    }

    debug!(
        "Filter-sort: {} -> {} records (sort: {})",
        records.len(),
        view.len(),
        spec.sort
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    view
}

/// Distinct course names, ordered by folded name
pub fn distinct_courses(records: &[StudentRecord]) -> Vec<String> {
    let unique: BTreeSet<&str> = records.iter().map(|r| r.course.as_str()).collect();
    let mut courses: Vec<String> = unique.into_iter().map(str::to_string).collect();
    courses.sort_by_cached_key(|c| fold_name(c));
    courses
}
