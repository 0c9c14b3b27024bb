//! Filter predicates
//!
//! Each check returns true when its criterion is absent. Text criteria are
//! plain case-insensitive substring containment; blank needles match all.

use crate::app::models::StudentRecord;

use super::criteria::FilterSpec;

/// True when `record` passes every criterion in `spec`
pub fn matches(record: &StudentRecord, spec: &FilterSpec) -> bool {
    matches_search(record, spec.search.as_deref())
        && contains_ci(&record.name, spec.name_contains.as_deref())
        && contains_ci(&record.email, spec.email_contains.as_deref())
        && matches_exact(&record.course, spec.course.as_deref())
        && spec
            .grade
            .as_ref()
            .is_none_or(|grade| record.grade.as_str() == grade.as_str())
        && matches_enrollment(record, spec)
        && spec
            .performance_range
            .is_none_or(|range| range.contains(record.attendance()))
}

/// Quick search: the needle in either the name or the email
fn matches_search(record: &StudentRecord, needle: Option<&str>) -> bool {
    match normalized_needle(needle) {
        None => true,
        Some(needle) => {
            record.name.to_lowercase().contains(&needle)
                || record.email.to_lowercase().contains(&needle)
        }
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    normalized_needle(needle).is_none_or(|needle| haystack.to_lowercase().contains(&needle))
}

fn matches_exact(value: &str, wanted: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| value == wanted)
}

fn normalized_needle(needle: Option<&str>) -> Option<String> {
    needle
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_lowercase)
}

/// Inclusive date bounds; a record whose date does not parse fails any bound
fn matches_enrollment(record: &StudentRecord, spec: &FilterSpec) -> bool {
    if spec.enrollment_date_from.is_none() && spec.enrollment_date_to.is_none() {
        return true;
    }
    let Some(date) = record.enrollment_date() else {
        return false;
    };
    spec.enrollment_date_from.is_none_or(|from| date >= from)
        && spec.enrollment_date_to.is_none_or(|to| date <= to)
}
