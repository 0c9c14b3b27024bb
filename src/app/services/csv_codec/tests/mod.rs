//! Tests for the CSV codec

pub mod decoder_tests;

use crate::app::services::csv_codec::FieldRow;

/// Build a field row from string pairs
pub fn field_row(pairs: &[(&str, &str)]) -> FieldRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Sample import file with the quirks seen in spreadsheet exports
pub const SPREADSHEET_EXPORT: &str = "name,email,course,grade\r\n\
\"Lee, Ann\",ann@example.com,Art,B+\r\n\
\"Omar \"\"The Hammer\"\" Ali\",omar@example.com,Physics,A\r\n\
\x20\x20\r\n\
\r\n";
