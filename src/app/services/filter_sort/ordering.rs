//! Comparators for each sort key
//!
//! All comparators are total. Records that compare equal keep their input
//! order because the engine sorts with a stable sort.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::app::models::StudentRecord;

use super::criteria::{SortDirection, SortKey, SortSpec};

/// Collation key for a name: decomposed, combining marks removed, lowercased
///
/// `"Émile"` and `"emile"` fold to the same key.
pub fn fold_name(name: &str) -> String {
    name.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two records under a sort spec
pub fn compare(a: &StudentRecord, b: &StudentRecord, sort: &SortSpec) -> Ordering {
    let ordering = compare_key(a, b, sort.key);
    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_key(a: &StudentRecord, b: &StudentRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => fold_name(&a.name).cmp(&fold_name(&b.name)),
        SortKey::Grade => a.grade.rank().cmp(&b.grade.rank()),
        // None < Some, so unparseable dates sort earliest
        SortKey::EnrollmentDate => a.enrollment_date().cmp(&b.enrollment_date()),
        SortKey::Performance => a.attendance().cmp(&b.attendance()),
    }
}
