//! Tests for CSV decoding

use super::*;
use crate::Error;
use crate::app::services::csv_codec::{decode, decode_file};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_decode_empty_text_is_parse_error() {
    assert!(matches!(decode(""), Err(Error::Parse { .. })));
    assert!(matches!(decode("\r\n\n  \n"), Err(Error::Parse { .. })));
}

#[test]
fn test_decode_header_only() {
    let decoded = decode("name,email,course\n").unwrap();
    assert_eq!(decoded.headers, vec!["name", "email", "course"]);
    assert!(decoded.rows.is_empty());
}

#[test]
fn test_decode_spreadsheet_export() {
    let decoded = decode(SPREADSHEET_EXPORT).unwrap();

    assert_eq!(decoded.headers, vec!["name", "email", "course", "grade"]);
    assert_eq!(decoded.rows.len(), 2);
    assert_eq!(decoded.rows[0].get("name"), Some("Lee, Ann"));
    assert_eq!(decoded.rows[0].get("grade"), Some("B+"));
    assert_eq!(decoded.rows[1].get("name"), Some("Omar \"The Hammer\" Ali"));
    assert_eq!(decoded.rows[1].row, 2);
    assert_eq!(decoded.stats.blank_lines, 1);
    assert!(!decoded.stats.has_warnings());
}

#[test]
fn test_decode_crlf_and_lf_are_equivalent() {
    let lf = decode("name,course\nAnn,Art\nBo,Maths\n").unwrap();
    let crlf = decode("name,course\r\nAnn,Art\r\nBo,Maths\r\n").unwrap();
    assert_eq!(lf.rows, crlf.rows);
}

#[test]
fn test_decode_trims_fields() {
    let decoded = decode(" name , course \n  Ann  ,  Art \n").unwrap();
    assert_eq!(decoded.headers, vec!["name", "course"]);
    assert_eq!(decoded.rows[0].get("course"), Some("Art"));
}

#[test]
fn test_decode_pads_short_rows() {
    let decoded = decode("name,email,course\nAnn,ann@example.com\n").unwrap();

    assert_eq!(decoded.rows.len(), 1);
    assert_eq!(decoded.rows[0].get("course"), Some(""));
    assert_eq!(decoded.rows[0].non_empty("course"), None);
    assert_eq!(decoded.stats.rows_padded, 1);
    assert_eq!(decoded.stats.warnings.len(), 1);
}

#[test]
fn test_decode_truncates_long_rows() {
    let decoded = decode("name,course\nAnn,Art,extra,more\n").unwrap();

    assert_eq!(decoded.rows[0].fields.len(), 2);
    assert_eq!(decoded.rows[0].get("course"), Some("Art"));
    assert_eq!(decoded.stats.rows_truncated, 1);
    assert_eq!(decoded.stats.ragged_rows(), 1);
}

#[test]
fn test_decode_keeps_mid_value_quote_and_later_rows() {
    let decoded = decode("name,email,course\nO\"Brien,o@x.com,Art\nBob,b@x.com,Math\n").unwrap();

    assert_eq!(decoded.rows.len(), 2);
    assert_eq!(decoded.rows[0].get("name"), Some("O\"Brien"));
    assert_eq!(decoded.rows[0].get("course"), Some("Art"));
    assert_eq!(decoded.rows[1].get("name"), Some("Bob"));
    assert!(!decoded.stats.has_warnings());
}

#[test]
fn test_decode_unclosed_quote_does_not_swallow_later_rows() {
    let text = "name,email,course\n\"Ann,ann@x.com,Art\nBob,b@x.com,Math\nCy,c@x.com,Art\n";
    let decoded = decode(text).unwrap();

    assert_eq!(decoded.rows.len(), 3);
    assert_eq!(decoded.rows[0].get("name"), Some("Ann"));
    assert_eq!(decoded.rows[0].get("email"), Some("ann@x.com"));
    assert_eq!(decoded.rows[1].get("name"), Some("Bob"));
    assert_eq!(decoded.rows[1].line, 3);
    assert_eq!(decoded.rows[2].get("course"), Some("Art"));
    assert_eq!(decoded.stats.ragged_rows(), 0);
    assert_eq!(decoded.stats.warnings.len(), 1);
    assert!(decoded.stats.warnings[0].starts_with("Line 2:"));
}

#[tokio::test]
async fn test_decode_file_reads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", SPREADSHEET_EXPORT).unwrap();

    let decoded = decode_file(file.path()).await.unwrap();
    assert_eq!(decoded.rows.len(), 2);
}

#[tokio::test]
async fn test_decode_file_missing_is_io_error() {
    let result = decode_file(std::path::Path::new("/definitely/not/here.csv")).await;
    assert!(matches!(result, Err(Error::Io { .. })));
}
