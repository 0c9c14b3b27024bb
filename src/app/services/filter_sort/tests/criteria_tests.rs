//! Tests for sort option parsing and range checks

use crate::app::services::filter_sort::{PerformanceRange, SortDirection, SortKey, SortSpec};

#[test]
fn test_parse_sort_options() {
    assert_eq!(SortSpec::parse("name_asc"), Some(SortSpec::asc(SortKey::Name)));
    assert_eq!(SortSpec::parse("grade_desc"), Some(SortSpec::desc(SortKey::Grade)));
    assert_eq!(
        SortSpec::parse("enrollmentDate_asc"),
        Some(SortSpec::asc(SortKey::EnrollmentDate))
    );
    assert_eq!(
        SortSpec::parse("enrollment_date_desc"),
        Some(SortSpec::desc(SortKey::EnrollmentDate))
    );
    assert_eq!(
        SortSpec::parse("performance:DESC"),
        Some(SortSpec::desc(SortKey::Performance))
    );
}

#[test]
fn test_parse_unknown_sort_options() {
    assert_eq!(SortSpec::parse(""), None);
    assert_eq!(SortSpec::parse("name"), None);
    assert_eq!(SortSpec::parse("age_asc"), None);
    assert_eq!(SortSpec::parse("name_sideways"), None);
    assert!("shoe_size_asc".parse::<SortSpec>().is_err());
}

#[test]
fn test_sort_spec_display_round_trips() {
    let spec = SortSpec::new(SortKey::EnrollmentDate, SortDirection::Desc);
    assert_eq!(spec.to_string(), "enrollmentDate_desc");
    assert_eq!(SortSpec::parse(&spec.to_string()), Some(spec));
}

#[test]
fn test_performance_range_bounds_are_inclusive() {
    let range = PerformanceRange::new(80, 80);
    assert!(range.contains(80));
    assert!(!range.contains(79));
    assert!(!range.contains(81));

    let inverted = PerformanceRange::new(90, 10);
    assert!(inverted.is_inverted());
    assert!(!inverted.contains(50));
}
