//! Decoding statistics and result structures

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A decoded data row keyed by header name
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// Data row number, starting at 1 for the first row after the header
    pub row: usize,

    /// Physical line the row starts on
    pub line: usize,

    pub fields: HashMap<String, String>,
}

impl CsvRow {
    /// Value of a column, `None` when the column does not exist
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of a column with empty strings treated as absent
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }
}

/// Decoded CSV: headers in file order plus the data rows
#[derive(Debug, Clone)]
pub struct DecodedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
    pub stats: DecodeStats,
}

impl DecodedCsv {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// Simple decoding statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Data rows decoded (header excluded)
    pub rows_decoded: usize,

    /// Rows padded because they had fewer fields than the header
    pub rows_padded: usize,

    /// Rows truncated because they had more fields than the header
    pub rows_truncated: usize,

    /// Whitespace-only lines skipped
    pub blank_lines: usize,

    /// Diagnostics for the caller; none of these stopped decoding
    pub warnings: Vec<String>,
}

impl DecodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows whose width did not match the header
    pub fn ragged_rows(&self) -> usize {
        self.rows_padded + self.rows_truncated
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
