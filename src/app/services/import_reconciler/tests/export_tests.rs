//! Tests for export rows and file naming

use super::*;
use crate::app::models::{NewNote, Performance};
use crate::app::services::csv_codec::{decode, encode};
use crate::app::services::import_reconciler::{export_file_name, export_rows};
use crate::constants::EXPORT_COLUMNS;

#[test]
fn test_export_file_name() {
    assert_eq!(export_file_name(test_today()), "student_data_2024-05-01.csv");
}

#[test]
fn test_export_excludes_internal_fields() {
    let mut store = create_store(1);
    store.set_performance(1, Performance::default()).unwrap();
    store.add_note(1, NewNote::new("Keep this private")).unwrap();

    let decoded = decode(&encode(&export_rows(&store.list())).unwrap()).unwrap();

    assert_eq!(decoded.headers, EXPORT_COLUMNS);
    for hidden in ["id", "avatar", "performance", "notes"] {
        assert!(!decoded.has_column(hidden));
    }
}

#[test]
fn test_export_then_import_preserves_core_fields() {
    let mut store = create_store(0);
    store
        .add_on(
            NewStudent::new("O'Neil, \"Sam\"", "sam@example.com", "Art\nHistory")
                .with_grade("A-")
                .with_enrollment_date("2020-02-29"),
            test_today(),
        )
        .unwrap();

    let decoded = decode(&encode(&export_rows(&store.list())).unwrap()).unwrap();
    let row = &decoded.rows[0];

    assert_eq!(row.get("name"), Some("O'Neil, \"Sam\""));
    assert_eq!(row.get("course"), Some("Art\nHistory"));
    assert_eq!(row.get("grade"), Some("A-"));
    assert_eq!(row.get("enrollmentDate"), Some("2020-02-29"));
}
